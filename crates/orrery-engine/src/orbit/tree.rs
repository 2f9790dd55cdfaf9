use std::collections::HashMap;
use std::f64::consts::{PI, TAU};

use glam::DVec2;

use crate::orbit::body::Body;

/// The solved geometry of one child's orbit at one instant: the ellipse
/// parameters a renderer needs for path drawing, the resolved position,
/// and the radial clearance to hand to the next sibling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSolution {
    /// Angular position along the unprocessed ellipse, in `[0, 2π)`.
    pub true_anomaly: f64,
    /// Current apsidal precession angle (zero when the body has none).
    pub procession: f64,
    pub major_axis: f64,
    /// Minor axis, foreshortened by the orbital incline.
    pub minor_axis: f64,
    /// Ellipse center, offset from the parent (the focus) along the
    /// precession direction.
    pub center: DVec2,
    /// Distance of the body from the ellipse center.
    pub radius: f64,
    pub position: DVec2,
    /// Clearance consumed so far, fed as `preceding_radius` to the next
    /// sibling in declared order.
    pub next_radius: f64,
}

/// Solve a child's orbit around its parent at `time`.
///
/// `preceding_radius` is the radial clearance already consumed by earlier
/// siblings; the child reserves extra clearance proportional to its own
/// subtree size so nested systems do not overlap their neighbors.
pub fn compute_orbit(
    parent_position: DVec2,
    parent_size: f64,
    child: &Body,
    time: f64,
    preceding_radius: f64,
) -> OrbitSolution {
    let subtree = child.tree_size() as f64;
    let base_radius = preceding_radius + (subtree - 1.0) * child.size + parent_size;

    let mut true_anomaly =
        TAU * ((time - child.offset) % child.orbital_period) / child.orbital_period;
    if true_anomaly < 0.0 {
        true_anomaly += TAU;
    }

    let procession = if child.procession == 0.0 {
        0.0
    } else {
        TAU * ((time - child.offset) % child.procession) / child.procession
    };

    let eccentricity = child.eccentricity();
    let major_axis = base_radius / (1.0 - eccentricity);
    let minor_axis = (major_axis * major_axis * (1.0 - eccentricity * eccentricity)).sqrt()
        * child.orbital_incline.cos();

    // The parent sits at a focus; the center is offset toward the current
    // apsis direction.
    let center = parent_position
        - major_axis * eccentricity * DVec2::new(procession.cos(), procession.sin());

    // Position on the ellipse before precession is applied.
    let flat = DVec2::new(
        center.x + major_axis * true_anomaly.cos(),
        center.y + minor_axis * true_anomaly.sin(),
    );
    let radius = flat.distance(center);

    // Recover the polar angle about the center. atan alone covers the
    // right half-plane; a negative x-offset needs the +π correction.
    let mut polar_angle = ((flat.y - center.y) / (flat.x - center.x)).atan();
    if flat.x < center.x {
        polar_angle += PI;
    }

    // Precession rotates the whole ellipse rigidly about the center.
    let turned = polar_angle - procession;
    let position = center + radius * DVec2::new(turned.cos(), turned.sin());

    let next_radius =
        base_radius + (subtree - 1.0) * child.size + parent_size * (subtree - 1.0).min(1.0);

    OrbitSolution {
        true_anomaly,
        procession,
        major_axis,
        minor_axis,
        center,
        radius,
        position,
        next_radius,
    }
}

/// Greatest distance any body in the subtree can reach from `body`'s
/// position, probing each child at its apoapsis. Hosts use this to size a
/// viewport that the whole system stays inside.
pub fn max_orbital_distance(body: &Body) -> f64 {
    let mut max_distance = body.size;
    let mut next_radius = body.size;
    for child in &body.children {
        let apoapsis_time = child.offset + child.orbital_period / 2.0;
        let orbit = compute_orbit(body.position, body.size, child, apoapsis_time, next_radius);
        next_radius = orbit.next_radius;
        max_distance = max_distance.max(orbit.major_axis + body.size + max_orbital_distance(child));
    }
    max_distance
}

type Subscriber = Box<dyn FnMut(&Body)>;

/// The orbital tree: a root body (the coordinate origin unless the host
/// repositions it) plus a name-keyed observer table.
///
/// Evaluation takes `&mut self`, so the borrow checker enforces the
/// one-evaluation-at-a-time discipline: no reader can observe a
/// half-updated tree.
pub struct OrbitalTree {
    root: Body,
    subscribers: HashMap<String, Vec<Subscriber>>,
}

impl OrbitalTree {
    pub fn new(root: Body) -> Self {
        Self {
            root,
            subscribers: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Body {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Body {
        &mut self.root
    }

    /// Re-solve every body's position for `time`, then notify subscribers
    /// in tree-traversal order.
    ///
    /// Children are processed in declared order; each child's
    /// `next_radius` feeds the next sibling, starting from the parent's
    /// own size. The whole tree is recomputed from scratch; there is no
    /// incremental update.
    pub fn evaluate(&mut self, time: f64) {
        log::trace!("evaluating orbital tree at t={time}");
        Self::evaluate_node(&mut self.root, time);
        Self::notify(&self.root, &mut self.subscribers);
    }

    fn evaluate_node(body: &mut Body, time: f64) {
        // Negated because screen Y grows downward relative to the math
        // convention hosts draw in.
        body.rotation_angle = match body.rotation {
            Some(rotation) => -(PI + TAU * ((time - body.offset) % rotation) / rotation),
            None => 0.0,
        };

        let parent_position = body.position;
        let parent_size = body.size;
        let mut preceding_radius = parent_size;
        for child in &mut body.children {
            let orbit = compute_orbit(parent_position, parent_size, child, time, preceding_radius);
            child.position = orbit.position;
            child.current_procession = orbit.procession;
            preceding_radius = orbit.next_radius;
            Self::evaluate_node(child, time);
        }
    }

    fn notify(body: &Body, subscribers: &mut HashMap<String, Vec<Subscriber>>) {
        if let Some(callbacks) = subscribers.get_mut(&body.name) {
            for callback in callbacks.iter_mut() {
                callback(body);
            }
        }
        for child in &body.children {
            Self::notify(child, subscribers);
        }
    }

    /// Register a callback for every node named `name`. Duplicate names
    /// fire once per matching node; a name matching no node is a no-op.
    pub fn subscribe(&mut self, name: impl Into<String>, callback: impl FnMut(&Body) + 'static) {
        self.subscribers
            .entry(name.into())
            .or_default()
            .push(Box::new(callback));
    }

    /// Remove every registered callback, tree-wide.
    pub fn clear_subscriptions(&mut self) {
        self.subscribers.clear();
    }

    /// See [`max_orbital_distance`].
    pub fn max_orbital_distance(&self) -> f64 {
        max_orbital_distance(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn two_body_tree() -> OrbitalTree {
        OrbitalTree::new(
            Body::new("Sun", 1.0).with_child(
                Body::new("Planet", 1.0)
                    .with_orbital_period(360.0)
                    .with_eccentricity(0.0),
            ),
        )
    }

    fn planet_position(tree: &OrbitalTree) -> DVec2 {
        tree.root().children[0].position
    }

    #[test]
    fn orbit_is_periodic() {
        let mut tree = two_body_tree();
        tree.evaluate(0.0);
        let at_zero = planet_position(&tree);
        tree.evaluate(360.0);
        let at_period = planet_position(&tree);
        assert_eq!(at_zero, at_period);
    }

    #[test]
    fn quarter_orbit_is_quarter_turn() {
        let mut tree = two_body_tree();
        tree.evaluate(90.0);
        let pos = planet_position(&tree);
        let angle = pos.y.atan2(pos.x);
        assert!(
            (angle - PI / 2.0).abs() < 1e-9,
            "quarter orbit angle was {angle}"
        );
    }

    #[test]
    fn circular_orbit_keeps_constant_radius() {
        let mut tree = two_body_tree();
        for step in 0..12 {
            tree.evaluate(step as f64 * 30.0);
            let distance = planet_position(&tree).length();
            // Leaf child of a size-1 parent: base radius 1 + 1 = 2.
            assert!(
                (distance - 2.0).abs() < 1e-9,
                "distance at step {step} was {distance}"
            );
        }
    }

    #[test]
    fn negative_time_normalizes_anomaly() {
        let child = Body::new("Planet", 1.0).with_orbital_period(360.0);
        let orbit = compute_orbit(DVec2::ZERO, 1.0, &child, -90.0, 1.0);
        assert!((orbit.true_anomaly - 3.0 * PI / 2.0).abs() < 1e-9);
    }

    #[test]
    fn siblings_accumulate_clearance() {
        let mut tree = OrbitalTree::new(
            Body::new("Sun", 5.0)
                .with_child(Body::new("Inner", 1.0).with_orbital_period(100.0))
                .with_child(Body::new("Outer", 1.0).with_orbital_period(200.0)),
        );
        tree.evaluate(17.0);
        // Inner leaf: base = 5 (preceding) + 0 + 5 = 10, next stays 10.
        // Outer leaf: base = 10 + 0 + 5 = 15.
        let inner = tree.root().children[0].position.length();
        let outer = tree.root().children[1].position.length();
        assert!((inner - 10.0).abs() < 1e-9, "inner radius {inner}");
        assert!((outer - 15.0).abs() < 1e-9, "outer radius {outer}");
    }

    #[test]
    fn subtree_reserves_extra_clearance() {
        let child = Body::new("Planet", 2.0)
            .with_orbital_period(100.0)
            .with_child(Body::new("Moon", 1.0));
        let orbit = compute_orbit(DVec2::ZERO, 5.0, &child, 0.0, 5.0);
        // tree_size 2: base = 5 + 1*2 + 5 = 12; next = 12 + 2 + 5*1 = 19.
        assert_eq!(orbit.major_axis, 12.0);
        assert_eq!(orbit.next_radius, 19.0);
    }

    #[test]
    fn eccentricity_clamp_is_bit_identical() {
        let wild = Body::new("X", 1.0)
            .with_orbital_period(360.0)
            .with_eccentricity(1.5);
        let clamped = Body::new("X", 1.0)
            .with_orbital_period(360.0)
            .with_eccentricity(0.999_999_999_9);
        let a = compute_orbit(DVec2::ZERO, 1.0, &wild, 123.0, 1.0);
        let b = compute_orbit(DVec2::ZERO, 1.0, &clamped, 123.0, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn procession_turns_the_ellipse_rigidly() {
        // Circular orbit, so precession shows up purely as an angular
        // offset: anomaly π/2 minus precession π/4.
        let child = Body::new("Planet", 1.0)
            .with_orbital_period(360.0)
            .with_procession(720.0);
        let orbit = compute_orbit(DVec2::ZERO, 1.0, &child, 90.0, 1.0);
        let angle = orbit.position.y.atan2(orbit.position.x);
        assert!((angle - PI / 4.0).abs() < 1e-9, "angle was {angle}");
        assert!((orbit.procession - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn incline_foreshortens_minor_axis() {
        let child = Body::new("Planet", 1.0)
            .with_orbital_period(360.0)
            .with_orbital_incline(PI / 3.0);
        let orbit = compute_orbit(DVec2::ZERO, 1.0, &child, 0.0, 1.0);
        assert!((orbit.minor_axis - orbit.major_axis * 0.5).abs() < 1e-9);
    }

    #[test]
    fn rotation_angle_tracks_spin_period() {
        let mut tree = OrbitalTree::new(Body::new("Spinner", 1.0).with_rotation(60.0));
        tree.evaluate(30.0);
        let angle = tree.root().rotation_angle;
        assert!((angle + TAU).abs() < 1e-9, "half a spin from -π is -2π, got {angle}");

        let mut still = OrbitalTree::new(Body::new("Locked", 1.0));
        still.evaluate(30.0);
        assert_eq!(still.root().rotation_angle, 0.0);
    }

    #[test]
    fn moons_orbit_their_planet() {
        let mut tree = OrbitalTree::new(
            Body::new("Sun", 5.0).with_child(
                Body::new("Planet", 1.0)
                    .with_orbital_period(360.0)
                    .with_child(Body::new("Moon", 0.5).with_orbital_period(30.0)),
            ),
        );
        tree.evaluate(45.0);
        let planet = tree.root().children[0].position;
        let moon = tree.root().children[0].children[0].position;
        // Moon leaf under a size-1 planet: base = 1 + 0 + 1 = 2.
        let separation = moon.distance(planet);
        assert!((separation - 2.0).abs() < 1e-9, "separation {separation}");
    }

    #[test]
    fn subscribers_fire_once_per_matching_node() {
        let mut tree = OrbitalTree::new(
            Body::new("Sun", 1.0)
                .with_child(Body::new("Twin", 1.0).with_orbital_period(10.0))
                .with_child(Body::new("Twin", 1.0).with_orbital_period(20.0)),
        );
        let count = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&count);
        tree.subscribe("Twin", move |body| {
            assert_eq!(body.name, "Twin");
            *seen.borrow_mut() += 1;
        });
        tree.evaluate(1.0);
        assert_eq!(*count.borrow(), 2);

        tree.clear_subscriptions();
        tree.evaluate(2.0);
        assert_eq!(*count.borrow(), 2, "cleared subscribers must not fire");
    }

    #[test]
    fn unknown_subscription_name_is_noop() {
        let mut tree = two_body_tree();
        tree.subscribe("Nonesuch", |_| panic!("must never fire"));
        tree.evaluate(5.0);
    }

    #[test]
    fn subscribers_see_fresh_positions() {
        let mut tree = two_body_tree();
        let seen = Rc::new(RefCell::new(DVec2::ZERO));
        let slot = Rc::clone(&seen);
        tree.subscribe("Planet", move |body| {
            *slot.borrow_mut() = body.position;
        });
        tree.evaluate(90.0);
        assert_eq!(*seen.borrow(), planet_position(&tree));
    }

    #[test]
    fn max_orbital_distance_covers_apoapsis() {
        let tree = OrbitalTree::new(
            Body::new("Sun", 5.0).with_child(Body::new("Planet", 1.0).with_orbital_period(100.0)),
        );
        // Leaf child: major axis 10, plus parent size, plus the child's
        // own extent.
        assert!((tree.max_orbital_distance() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn root_repositioning_offsets_the_whole_system() {
        let mut tree = two_body_tree();
        tree.root_mut().position = DVec2::new(100.0, 50.0);
        tree.evaluate(0.0);
        let planet = planet_position(&tree);
        let offset = planet - DVec2::new(100.0, 50.0);
        assert!((offset.length() - 2.0).abs() < 1e-9);
    }
}
