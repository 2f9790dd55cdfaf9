use glam::DVec2;

/// Orbital period substituted for a declared period of zero.
pub const DEFAULT_ORBITAL_PERIOD: f64 = 100.0;

/// Eccentricity ceiling. Values at or above 1 would degenerate the ellipse
/// (the major axis divides by `1 - e`), so they clamp to just below it.
pub const ECCENTRICITY_MAX: f64 = 0.999_999_999_9;

/// One body in the orbital tree: static orbital parameters, owned ordered
/// children, and the derived state from the most recent evaluation.
///
/// Topology is fixed after construction. The derived fields (`position`,
/// `rotation_angle`, `current_procession`) are overwritten on every
/// [`OrbitalTree::evaluate`](crate::orbit::OrbitalTree::evaluate) and are
/// only meaningful until the next one.
#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    /// Opaque display color (CSS-style string); the engine never
    /// interprets it, it is passed through to subscribers/renderers.
    pub color: String,
    /// Drawn radius, also the unit of radial clearance between orbits.
    pub size: f64,
    /// Time units per full orbit around the parent.
    pub orbital_period: f64,
    /// Phase epoch: the time at which this body sits at true anomaly zero.
    pub offset: f64,
    eccentricity: f64,
    /// Apsidal precession period; zero means the ellipse never turns.
    pub procession: f64,
    /// Orbital plane tilt in radians, drawn as minor-axis foreshortening.
    pub orbital_incline: f64,
    /// Axial spin period. `None` means no spin is modeled.
    pub rotation: Option<f64>,
    /// Axial tilt in radians (affects how hosts draw the spin marker).
    pub rotational_incline: f64,
    pub children: Vec<Body>,

    // Derived per-query state, valid until the next evaluation.
    pub position: DVec2,
    pub rotation_angle: f64,
    pub current_procession: f64,
}

impl Body {
    pub fn new(name: impl Into<String>, size: f64) -> Self {
        Self {
            name: name.into(),
            color: String::from("#FFFFFF"),
            size,
            orbital_period: DEFAULT_ORBITAL_PERIOD,
            offset: 0.0,
            eccentricity: 0.0,
            procession: 0.0,
            orbital_incline: 0.0,
            rotation: None,
            rotational_incline: 0.0,
            children: Vec::new(),
            position: DVec2::ZERO,
            rotation_angle: 0.0,
            current_procession: 0.0,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the orbital period. Zero is coerced to
    /// [`DEFAULT_ORBITAL_PERIOD`] to keep the anomaly math finite.
    pub fn with_orbital_period(mut self, period: f64) -> Self {
        self.orbital_period = if period == 0.0 {
            DEFAULT_ORBITAL_PERIOD
        } else {
            period
        };
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the eccentricity. Stored raw; reads clamp below 1.
    pub fn with_eccentricity(mut self, eccentricity: f64) -> Self {
        self.eccentricity = eccentricity;
        self
    }

    pub fn with_procession(mut self, procession: f64) -> Self {
        self.procession = procession;
        self
    }

    /// Orbital incline in radians.
    pub fn with_orbital_incline(mut self, incline: f64) -> Self {
        self.orbital_incline = incline;
        self
    }

    /// Set the axial spin period. Zero means no spin.
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = if rotation == 0.0 { None } else { Some(rotation) };
        self
    }

    /// Rotational incline in radians.
    pub fn with_rotational_incline(mut self, incline: f64) -> Self {
        self.rotational_incline = incline;
        self
    }

    pub fn with_child(mut self, child: Body) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<Body>) -> Self {
        self.children = children;
        self
    }

    /// Eccentricity clamped below 1 so the ellipse never degenerates.
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity.min(ECCENTRICITY_MAX)
    }

    /// This body plus all descendants. Trees are small; recomputed on
    /// demand rather than cached.
    pub fn tree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.tree_size())
            .sum::<usize>()
    }
}
