//! Simulation engine for the siege game.
//!
//! Owns the hecs ECS world and the pathfinding grid, runs systems in a fixed
//! order each tick, and produces GameStateSnapshots for the frontend.

pub mod engine;
pub mod navigation;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use siege_core as core;
