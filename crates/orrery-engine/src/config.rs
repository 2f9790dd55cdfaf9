//! Declarative configuration descriptors.
//!
//! Mirrors the JSON wire format worldbuilding data files use (camelCase
//! keys, degrees for inclines, `0` meaning "unset" for periods). Loaded
//! from a JSON string at runtime and built into engine types with the
//! documented coercions applied.

use serde::{Deserialize, Serialize};

use crate::calendar::{Calendar, LeapPeriod, LeapRule, Month};
use crate::orbit::{Body, OrbitalTree};

/// Error building engine types from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A calendar needs at least one month; the ordinal scan has nothing
    /// to count otherwise.
    #[error("calendar has no months")]
    EmptyCalendar,

    /// Month names are the lookup key for date construction, so they must
    /// be unique within a calendar.
    #[error("duplicate month name: {name}")]
    DuplicateMonth { name: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

// ── Calendar descriptors ─────────────────────────────────────────────

/// "Every N years", with an optional nested exception period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeapPeriodDescriptor {
    pub every: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except: Option<Box<LeapPeriodDescriptor>>,
}

impl LeapPeriodDescriptor {
    pub fn build(&self) -> LeapPeriod {
        let mut period = LeapPeriod::new(self.every);
        if let Some(except) = &self.except {
            period = period.with_exception(except.build());
        }
        period
    }
}

/// Extra days granted to a month in years matching `period`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeapRuleDescriptor {
    pub days: i64,
    pub period: LeapPeriodDescriptor,
}

impl LeapRuleDescriptor {
    pub fn build(&self) -> LeapRule {
        LeapRule::new(self.days, self.period.build())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthDescriptor {
    pub name: String,
    pub days: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leap: Option<LeapRuleDescriptor>,
}

impl MonthDescriptor {
    pub fn build(&self) -> Month {
        let mut month = Month::new(&self.name, self.days);
        if let Some(leap) = &self.leap {
            month = month.with_leap(leap.build());
        }
        month
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDescriptor {
    pub origin_year: i64,
    #[serde(default)]
    pub has_year_zero: bool,
    pub months: Vec<MonthDescriptor>,
}

impl CalendarDescriptor {
    /// Parse a descriptor from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate and build the calendar.
    pub fn build(&self) -> Result<Calendar, ConfigError> {
        if self.months.is_empty() {
            return Err(ConfigError::EmptyCalendar);
        }
        for (index, month) in self.months.iter().enumerate() {
            if self.months[..index].iter().any(|m| m.name == month.name) {
                return Err(ConfigError::DuplicateMonth {
                    name: month.name.clone(),
                });
            }
        }
        log::debug!(
            "building calendar: origin year {}, {} months",
            self.origin_year,
            self.months.len()
        );
        Ok(Calendar::new(
            self.origin_year,
            self.has_year_zero,
            self.months.iter().map(MonthDescriptor::build).collect(),
        ))
    }
}

// ── Orbital system descriptors ───────────────────────────────────────

/// One body and, recursively, everything orbiting it.
///
/// Inclines are declared in degrees and converted to radians on build.
/// A missing `offset` inherits the parent's; `orbit: 0` and
/// `rotation: 0` mean "unset" and get the engine's coercions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDescriptor {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub size: f64,
    #[serde(default)]
    pub orbit: f64,
    #[serde(default)]
    pub eccentricity: f64,
    #[serde(default)]
    pub procession: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub orbital_incline: f64,
    #[serde(default)]
    pub rotational_incline: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BodyDescriptor>,
}

fn default_color() -> String {
    String::from("#FFFFFF")
}

impl BodyDescriptor {
    /// Parse a descriptor from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build the body tree rooted at this descriptor.
    pub fn build(&self) -> Body {
        self.build_with_offset(0.0)
    }

    fn build_with_offset(&self, inherited_offset: f64) -> Body {
        let offset = self.offset.unwrap_or(inherited_offset);
        log::debug!(
            "building body {} ({} children)",
            self.name,
            self.children.len()
        );
        let children = self
            .children
            .iter()
            .map(|child| child.build_with_offset(offset))
            .collect();
        Body::new(&self.name, self.size)
            .with_color(&self.color)
            .with_orbital_period(self.orbit)
            .with_offset(offset)
            .with_eccentricity(self.eccentricity)
            .with_procession(self.procession)
            .with_orbital_incline(self.orbital_incline.to_radians())
            .with_rotation(self.rotation)
            .with_rotational_incline(self.rotational_incline.to_radians())
            .with_children(children)
    }
}

/// Parse and build a calendar straight from JSON.
pub fn calendar_from_json(json: &str) -> Result<Calendar, ConfigError> {
    CalendarDescriptor::from_json(json)?.build()
}

/// Parse a body-tree JSON and wrap it in an [`OrbitalTree`].
pub fn system_from_json(json: &str) -> Result<OrbitalTree, ConfigError> {
    Ok(OrbitalTree::new(BodyDescriptor::from_json(json)?.build()))
}
