//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary. Unit handles
//! are re-validated on application; dead, missing or enemy handles are
//! skipped.

use glam::Vec2;
use hecs::Entity;

use crate::enums::{Stance, UnitKind};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    // --- Orders to a selection ---
    /// Move every selected unit to a point.
    Move { units: Vec<Entity>, x: f32, y: f32 },
    /// Focus every selected unit on one enemy.
    AttackTarget { units: Vec<Entity>, target: Entity },
    /// Change stance.
    SetStance { units: Vec<Entity>, stance: Stance },
    /// March toward the gate nearest the selection's centroid.
    AttackNearestGate { units: Vec<Entity> },
    /// Halt in place.
    Stop { units: Vec<Entity> },
    /// Halt and never retreat.
    HoldPosition { units: Vec<Entity> },
    /// Arrange the selection in a square-ish grid around its centroid.
    FormationMove { units: Vec<Entity> },
    /// Send workers to a resource node.
    Gather { units: Vec<Entity>, node: Entity },
    /// Trigger order-activated charges.
    ActivateCharge { units: Vec<Entity> },

    // --- Production ---
    /// Queue a unit for training. `spawn_point` defaults to the rally point.
    Train {
        kind: UnitKind,
        spawn_point: Option<Vec2>,
    },

    // --- Simulation control ---
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}

/// Why a production request was refused. Never fatal; the engine also
/// posts a warning notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Insufficient resources!")]
    InsufficientResources,
    #[error("Population cap reached")]
    PopulationCap,
    #[error("Cannot train that unit")]
    NotTrainable,
}
