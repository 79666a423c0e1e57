//! Grid pathfinding for the siege simulation.
//!
//! Rasterizes the world into walkable/obstacle cells and finds shortest
//! 8-connected paths with A*. Has no dependency on the rest of the game.

pub mod astar;
pub mod grid;
pub mod simplify;

pub use astar::{CellPath, Pathfinder};
pub use grid::{Cell, Grid};
pub use simplify::simplify_path;
