//! Enemy AI for the siege simulation.
//!
//! Pure decision functions for enemy units, per-kind behavior profiles,
//! and wave composition. Operates on plain data with no ECS dependency.

pub mod behavior;
pub mod profiles;
pub mod waves;

pub use siege_core as core;

#[cfg(test)]
mod tests;
