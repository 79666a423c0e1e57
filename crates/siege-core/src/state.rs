//! Game state snapshot: the complete visible state handed to rendering and
//! UI collaborators after each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{Notification, SimEvent};
use crate::types::{Resources, SimTime};

/// Complete game state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player_units: Vec<UnitView>,
    pub enemy_units: Vec<UnitView>,
    pub gates: Vec<GateView>,
    pub buildings: Vec<BuildingView>,
    pub resource_nodes: Vec<ResourceNodeView>,
    pub projectiles: Vec<ProjectileView>,
    pub wave: WaveView,
    pub resources: Resources,
    pub population: PopulationView,
    pub training: Vec<TrainingView>,
    pub notifications: Vec<Notification>,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitView {
    pub id: u64,
    pub kind: UnitKind,
    pub team: Team,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub alive: bool,
    pub stance: Stance,
    pub level: u32,
    pub kills: u32,
    pub moving: bool,
    pub attacking: bool,
    pub retreating: bool,
    pub charging: bool,
    pub worker_state: Option<WorkerState>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateView {
    pub id: u64,
    pub side: GateSide,
    pub center: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingView {
    pub id: u64,
    pub kind: BuildingKind,
    pub center: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceNodeView {
    pub id: u64,
    pub kind: ResourceKind,
    pub position: Vec2,
    pub remaining: u32,
    pub max_amount: u32,
    pub depleted: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub team: Team,
    pub position: Vec2,
    pub target: u64,
}

/// Wave scheduler telemetry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave_number: u32,
    pub in_progress: bool,
    /// Seconds until the next wave; 0 while a wave is in progress.
    pub time_to_next_wave: f32,
    pub enemies_alive: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopulationView {
    /// Living player units plus queued training orders.
    pub current: u32,
    pub cap: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingView {
    pub kind: UnitKind,
    /// 0..1 for the order in production, 0 for orders still waiting.
    pub progress: f32,
}
