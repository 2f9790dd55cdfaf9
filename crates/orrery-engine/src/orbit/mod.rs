//! Orbital tree engine: hierarchical Keplerian-like orbits solved from
//! declared per-body parameters and a single time input.

mod body;
mod tree;

pub use body::{Body, DEFAULT_ORBITAL_PERIOD, ECCENTRICITY_MAX};
pub use tree::{compute_orbit, max_orbital_distance, OrbitSolution, OrbitalTree};
