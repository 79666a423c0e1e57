//! Core types and definitions for the siege simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the unit state machine, structures, archetypes, configuration,
//! commands, state snapshots, events, and constants.
//! It has no dependency on rendering or input.

pub mod archetypes;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod projectile;
pub mod state;
pub mod structures;
pub mod types;
pub mod unit;

#[cfg(test)]
mod tests;
