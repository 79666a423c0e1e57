//! Startup configuration and validation.
//!
//! `SimConfig` is supplied once when the engine is created and never mutated
//! afterwards. Every section falls back to the values in `constants.rs`, so a
//! JSON file only needs the fields it overrides. Malformed values are
//! rejected up front with a `ConfigError`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::archetypes::{Archetype, ArchetypeTable};
use crate::constants::*;
use crate::enums::{Difficulty, UnitKind};
use crate::types::Resources;
use crate::unit::UnitRules;

/// Why a configuration was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("grid of {cells} cells exceeds the limit of {limit}")]
    GridTooLarge { cells: usize, limit: usize },
    #[error("fortress does not fit inside the {width}x{height} map")]
    FortressOutOfBounds { width: f32, height: f32 },
    #[error("{kind:?} archetype: {reason}")]
    Archetype { kind: UnitKind, reason: &'static str },
    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: f32,
    pub height: f32,
    pub cell_size: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            cell_size: CELL_SIZE,
        }
    }
}

impl MapConfig {
    pub fn grid_dimensions(&self) -> (usize, usize) {
        (
            (self.width / self.cell_size).ceil() as usize,
            (self.height / self.cell_size).ceil() as usize,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FortressConfig {
    pub center: Vec2,
    pub size: f32,
    pub wall_thickness: f32,
    pub gate_width: f32,
    pub gate_health: f32,
    pub tower_range: f32,
    pub tower_damage: f32,
    pub tower_cooldown: f32,
}

impl Default for FortressConfig {
    fn default() -> Self {
        Self {
            center: Vec2::new(FORTRESS_X, FORTRESS_Y),
            size: FORTRESS_SIZE,
            wall_thickness: WALL_THICKNESS,
            gate_width: GATE_WIDTH,
            gate_health: GATE_BASE_HEALTH * GATE_HEALTH_MULTIPLIER,
            tower_range: GATE_TOWER_RANGE,
            tower_damage: GATE_TOWER_DAMAGE,
            tower_cooldown: GATE_TOWER_COOLDOWN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub interval: f32,
    pub base_count: f64,
    pub spawn_radius: f32,
    pub reward_gold: u32,
    /// Spawn wave 1 on the first tick instead of after one interval.
    pub first_wave_immediate: bool,
    pub archer_from_wave: u32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            interval: WAVE_INTERVAL,
            base_count: WAVE_BASE_COUNT,
            spawn_radius: WAVE_SPAWN_RADIUS,
            reward_gold: WAVE_REWARD_GOLD,
            first_wave_immediate: true,
            archer_from_wave: WAVE_ARCHER_FROM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Stockpiles before the difficulty multiplier.
    pub starting: Resources,
    pub max_population: u32,
    pub gather_interval: f32,
    pub gather_amount: u32,
    pub gather_radius: f32,
    pub arrival_radius: f32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting: Resources::new(STARTING_GOLD, STARTING_WOOD, STARTING_STONE, STARTING_FOOD),
            max_population: MAX_POPULATION,
            gather_interval: GATHER_INTERVAL,
            gather_amount: GATHER_AMOUNT,
            gather_radius: GATHER_RADIUS,
            arrival_radius: GATHER_ARRIVAL_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub projectile_speed: f32,
    pub projectile_hit_radius: f32,
    pub ai_interval: f32,
    pub ai_engage_range: f32,
    pub ai_guard_radius: f32,
    pub ai_repath_distance: f32,
    pub formation_spacing: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            projectile_speed: PROJECTILE_SPEED,
            projectile_hit_radius: PROJECTILE_HIT_RADIUS,
            ai_interval: AI_UPDATE_INTERVAL,
            ai_engage_range: AI_ENGAGE_RANGE,
            ai_guard_radius: AI_GUARD_RADIUS,
            ai_repath_distance: AI_REPATH_DISTANCE,
            formation_spacing: FORMATION_SPACING,
        }
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub difficulty: Difficulty,
    pub map: MapConfig,
    pub fortress: FortressConfig,
    pub waves: WaveConfig,
    pub economy: EconomyConfig,
    pub combat: CombatConfig,
    pub units: UnitRules,
    pub archetypes: ArchetypeTable,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: Difficulty::default(),
            map: MapConfig::default(),
            fortress: FortressConfig::default(),
            waves: WaveConfig::default(),
            economy: EconomyConfig::default(),
            combat: CombatConfig::default(),
            units: UnitRules::default(),
            archetypes: ArchetypeTable::default(),
        }
    }
}

fn positive(field: &'static str, value: impl Into<f64>) -> Result<(), ConfigError> {
    let value = value.into();
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn within(field: &'static str, value: impl Into<f64>, min: f64, max: f64) -> Result<(), ConfigError> {
    let value = value.into();
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl SimConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every constant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("map.width", self.map.width)?;
        positive("map.height", self.map.height)?;
        positive("map.cell_size", self.map.cell_size)?;
        let (cols, rows) = self.map.grid_dimensions();
        let cells = cols.saturating_mul(rows);
        if cells > MAX_GRID_CELLS {
            return Err(ConfigError::GridTooLarge {
                cells,
                limit: MAX_GRID_CELLS,
            });
        }

        let f = &self.fortress;
        positive("fortress.size", f.size)?;
        positive("fortress.wall_thickness", f.wall_thickness)?;
        positive("fortress.gate_width", f.gate_width)?;
        positive("fortress.gate_health", f.gate_health)?;
        positive("fortress.tower_cooldown", f.tower_cooldown)?;
        let half = f.size * 0.5;
        if f.center.x - half < 0.0
            || f.center.y - half < 0.0
            || f.center.x + half > self.map.width
            || f.center.y + half > self.map.height
        {
            return Err(ConfigError::FortressOutOfBounds {
                width: self.map.width,
                height: self.map.height,
            });
        }
        if f.gate_width >= f.size {
            return Err(ConfigError::OutOfRange {
                field: "fortress.gate_width",
                value: f.gate_width as f64,
                min: 0.0,
                max: f.size as f64,
            });
        }

        positive("waves.interval", self.waves.interval)?;
        positive("waves.base_count", self.waves.base_count)?;
        positive("waves.spawn_radius", self.waves.spawn_radius)?;

        positive("economy.gather_interval", self.economy.gather_interval)?;
        positive("economy.gather_amount", self.economy.gather_amount)?;
        positive("economy.max_population", self.economy.max_population)?;

        positive("combat.projectile_speed", self.combat.projectile_speed)?;
        within("combat.ai_interval", self.combat.ai_interval, 0.0, 10.0)?;
        positive("combat.formation_spacing", self.combat.formation_spacing)?;

        positive("units.first_level_xp", self.units.first_level_xp)?;
        within("units.level_xp_growth", self.units.level_xp_growth, 1.0, 10.0)?;
        within(
            "units.retreat_health_fraction",
            self.units.retreat_health_fraction,
            0.0,
            1.0,
        )?;
        positive("units.target_leash_factor", self.units.target_leash_factor)?;

        for kind in UnitKind::ALL {
            validate_archetype(kind, self.archetypes.get(kind))?;
        }
        Ok(())
    }
}

fn validate_archetype(kind: UnitKind, archetype: &Archetype) -> Result<(), ConfigError> {
    let fail = |reason| Err(ConfigError::Archetype { kind, reason });
    if !(archetype.health > 0.0) {
        return fail("health must be positive");
    }
    let stats = &archetype.stats;
    if !(stats.speed > 0.0) || !(stats.attack_range > 0.0) || !(stats.attack_cooldown > 0.0) {
        return fail("speed, range and cooldown must be positive");
    }
    if stats.damage < 0.0 || stats.armor < 0.0 {
        return fail("damage and armor cannot be negative");
    }
    if archetype.cost.is_some() && !(archetype.training_time > 0.0) {
        return fail("trainable units need a positive training time");
    }
    if let Some(crew) = &archetype.traits.crew {
        if crew.size == 0 {
            return fail("crew size must be at least 1");
        }
    }
    if let Some(charge) = &archetype.traits.charge {
        if !(charge.duration > 0.0) {
            return fail("charge duration must be positive");
        }
    }
    Ok(())
}
