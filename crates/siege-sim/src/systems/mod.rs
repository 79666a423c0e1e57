//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! Cross-tick state such as timers and the wave scheduler is owned by the
//! engine and passed in.

pub mod cleanup;
pub mod combat;
pub mod commands;
pub mod economy;
pub mod enemy_ai;
pub mod snapshot;
pub mod training;
pub mod units;
pub mod wave_spawner;
