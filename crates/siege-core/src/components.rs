//! Small ECS components attached alongside the main entity data.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::enums::WorkerState;

/// Gathering state, present on worker units only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gatherer {
    pub state: WorkerState,
    /// Resource node this worker was sent to.
    pub node: Option<Entity>,
}

/// Marks a unit that died on an earlier tick and is due for despawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fallen {
    pub tick: u64,
}
