//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which side a unit fights for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// The besieging army under player control.
    #[default]
    Player,
    /// Fortress defenders spawned by the wave scheduler.
    Enemy,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }
}

/// Unit type. Behavior differences come from the archetype's traits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Worker,
    #[default]
    Soldier,
    Archer,
    Cavalry,
    Champion,
    SiegeElephant,
    SiegeRam,
}

impl UnitKind {
    pub const ALL: [UnitKind; 7] = [
        UnitKind::Worker,
        UnitKind::Soldier,
        UnitKind::Archer,
        UnitKind::Cavalry,
        UnitKind::Champion,
        UnitKind::SiegeElephant,
        UnitKind::SiegeRam,
    ];
}

/// Champion stat variants, applied once at spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChampionVariant {
    /// Balanced leader with a damage edge.
    #[default]
    Commander,
    /// Heavy hitter, slightly slower.
    Warlord,
    /// Fast rider with a shorter reach.
    Outrider,
    /// Durable and slow.
    Shieldbearer,
}

/// Autonomous combat policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    /// Engages anything in range.
    #[default]
    Aggressive,
    /// Engages only its ordered target or a unit that attacked it.
    Defensive,
    /// Engages in range but never retreats.
    StandGround,
    /// Never auto-engages.
    Passive,
}

/// Worker gathering sub-state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerState {
    #[default]
    Idle,
    MovingToResource,
    Gathering,
}

/// Harvestable resource type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    #[default]
    Wood,
    Stone,
}

/// Which fortress wall a gate sits in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateSide {
    #[default]
    North,
    South,
    East,
    West,
}

/// Player building type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    #[default]
    CommandCenter,
    Barracks,
    ResourceDepot,
}

/// Difficulty preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Multipliers a difficulty preset applies at game start and at enemy spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyModifiers {
    pub enemy_damage: f32,
    pub enemy_health: f32,
    pub starting_resources: f32,
    pub wave_scaling: f64,
}

impl Difficulty {
    pub fn modifiers(self) -> DifficultyModifiers {
        match self {
            Difficulty::Easy => DifficultyModifiers {
                enemy_damage: 0.7,
                enemy_health: 0.8,
                starting_resources: 1.5,
                wave_scaling: 1.3,
            },
            Difficulty::Normal => DifficultyModifiers {
                enemy_damage: 1.0,
                enemy_health: 1.0,
                starting_resources: 1.0,
                wave_scaling: 1.3,
            },
            Difficulty::Hard => DifficultyModifiers {
                enemy_damage: 1.3,
                enemy_health: 1.2,
                starting_resources: 0.7,
                wave_scaling: 1.5,
            },
        }
    }
}

/// Overall game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    /// Every gate destroyed.
    Victory,
    /// No player unit alive.
    Defeat,
}

impl GamePhase {
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }
}

/// Notification severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    #[default]
    Info,
    Success,
    Warning,
}
