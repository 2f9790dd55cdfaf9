//! Deterministic orbital-tree and fantasy-calendar engine.
//!
//! Two independent subsystems with no shared state: a calendar engine
//! (recursive leap rules, date ↔ ordinal conversion) and an orbital tree
//! engine (hierarchical elliptical orbits with eccentricity, precession,
//! and incline, solved from a single time input). A host wires "current
//! time" into both and routes their outputs to rendering and UI; this
//! crate does no I/O and no drawing.

pub mod calendar;
pub mod config;
pub mod orbit;

// Re-export key types at crate root for convenience
pub use calendar::{Calendar, Date, LeapPeriod, LeapRule, Month};
pub use config::{
    calendar_from_json, system_from_json, BodyDescriptor, CalendarDescriptor, ConfigError,
    LeapPeriodDescriptor, LeapRuleDescriptor, MonthDescriptor,
};
pub use orbit::{
    compute_orbit, max_orbital_distance, Body, OrbitSolution, OrbitalTree,
    DEFAULT_ORBITAL_PERIOD, ECCENTRICITY_MAX,
};
