//! Events and notifications emitted by the simulation for UI and audio.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Discrete things that happened during a tick. Entity handles are carried
/// as `hecs::Entity::to_bits` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A new wave entered the field.
    WaveStarted { wave: u32, count: u32 },
    /// Every enemy of the wave is dead; reward granted.
    WaveCleared { wave: u32, reward_gold: u32 },
    /// A unit was killed.
    UnitKilled { unit: u64, team: Team, killer: Option<u64> },
    /// A unit reached a new level.
    LevelUp { unit: u64, level: u32 },
    /// A gate fell.
    GateDestroyed { side: GateSide },
    /// A resource node ran dry.
    NodeDepleted { node: u64, kind: ResourceKind },
    /// A trained unit left the queue.
    UnitTrained { unit: u64, kind: UnitKind },
    Victory,
    Defeat,
}

/// Short-lived message for the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
    pub tick: u64,
    /// Seconds left before the notification expires.
    pub remaining_secs: f32,
}
