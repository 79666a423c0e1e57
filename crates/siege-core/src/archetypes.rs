//! Data-driven unit archetypes.
//!
//! Every unit type is a row in an `ArchetypeTable`: base stats, cost,
//! training time and a small set of named traits. Specialized behavior
//! (charges, gate-breaking, crew attrition, ranged fire) reads these traits
//! instead of branching on the unit type.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{ChampionVariant, Stance, UnitKind};
use crate::types::Resources;

/// Combat and movement stats. Kept both as base values and as the
/// buff-adjusted effective values on each unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub speed: f32,
    pub damage: f32,
    pub armor: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
}

/// What starts a charge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChargeTrigger {
    /// Starts automatically on a move order longer than `min_distance`.
    LongMove { min_distance: f32 },
    /// Starts on an explicit order, then waits out `cooldown` seconds.
    Activated { cooldown: f32 },
}

/// A timed burst of speed and damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeProfile {
    pub trigger: ChargeTrigger,
    pub duration: f32,
    pub speed_multiplier: f32,
    pub damage_multiplier: f32,
    /// Extra gate damage multiplier while charging.
    pub gate_multiplier: f32,
    /// Extra hit against units while charging, as a fraction of damage.
    pub bonus_hit: f32,
}

/// Crew attrition: each health fraction crossed downward costs one crew
/// member, and gate damage scales with the surviving crew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewProfile {
    pub size: u8,
    pub loss_thresholds: Vec<f32>,
}

impl CrewProfile {
    /// Surviving crew at the given health fraction.
    pub fn crew_at(&self, health_fraction: f32) -> u8 {
        let lost = self
            .loss_thresholds
            .iter()
            .filter(|&&threshold| health_fraction < threshold)
            .count();
        self.size.saturating_sub(lost as u8).max(1)
    }
}

/// Named modifiers carried by an archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTraits {
    pub charge: Option<ChargeProfile>,
    /// Multiplier on damage dealt to gates.
    pub gate_damage_multiplier: f32,
    pub crew: Option<CrewProfile>,
    /// Attacks by launching a projectile instead of striking directly.
    pub ranged: bool,
    /// Stance a freshly spawned unit starts in.
    pub default_stance: Stance,
}

impl Default for UnitTraits {
    fn default() -> Self {
        Self {
            charge: None,
            gate_damage_multiplier: 1.0,
            crew: None,
            ranged: false,
            default_stance: Stance::Aggressive,
        }
    }
}

/// One row of the archetype table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub health: f32,
    pub stats: UnitStats,
    /// `None` for hero units that cannot be trained.
    pub cost: Option<Resources>,
    pub training_time: f32,
    pub traits: UnitTraits,
}

fn base_stats(health: f32, speed: f32, damage: f32, range: f32, cooldown: f32) -> (f32, UnitStats) {
    (
        health,
        UnitStats {
            speed,
            damage,
            armor: 0.0,
            attack_range: range,
            attack_cooldown: cooldown,
        },
    )
}

/// Per-type archetypes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeTable {
    pub worker: Archetype,
    pub soldier: Archetype,
    pub archer: Archetype,
    pub cavalry: Archetype,
    pub champion: Archetype,
    pub siege_elephant: Archetype,
    pub siege_ram: Archetype,
}

impl ArchetypeTable {
    pub fn get(&self, kind: UnitKind) -> &Archetype {
        match kind {
            UnitKind::Worker => &self.worker,
            UnitKind::Soldier => &self.soldier,
            UnitKind::Archer => &self.archer,
            UnitKind::Cavalry => &self.cavalry,
            UnitKind::Champion => &self.champion,
            UnitKind::SiegeElephant => &self.siege_elephant,
            UnitKind::SiegeRam => &self.siege_ram,
        }
    }
}

impl Default for ArchetypeTable {
    fn default() -> Self {
        let (health, stats) = base_stats(
            WORKER_HEALTH,
            WORKER_SPEED,
            WORKER_DAMAGE,
            WORKER_RANGE,
            DEFAULT_ATTACK_COOLDOWN,
        );
        let worker = Archetype {
            health,
            stats,
            cost: Some(Resources::new(50, 0, 0, 25)),
            training_time: WORKER_TRAINING_TIME,
            traits: UnitTraits {
                default_stance: Stance::Passive,
                ..Default::default()
            },
        };

        let (health, stats) = base_stats(
            SOLDIER_HEALTH,
            SOLDIER_SPEED,
            SOLDIER_DAMAGE,
            SOLDIER_RANGE,
            DEFAULT_ATTACK_COOLDOWN,
        );
        let soldier = Archetype {
            health,
            stats,
            cost: Some(Resources::new(100, 30, 0, 50)),
            training_time: SOLDIER_TRAINING_TIME,
            traits: UnitTraits::default(),
        };

        let (health, stats) = base_stats(
            ARCHER_HEALTH,
            ARCHER_SPEED,
            ARCHER_DAMAGE,
            ARCHER_RANGE,
            ARCHER_COOLDOWN,
        );
        let archer = Archetype {
            health,
            stats,
            cost: Some(Resources::new(120, 50, 0, 40)),
            training_time: ARCHER_TRAINING_TIME,
            traits: UnitTraits {
                ranged: true,
                ..Default::default()
            },
        };

        let (health, stats) = base_stats(
            CAVALRY_HEALTH,
            CAVALRY_SPEED,
            CAVALRY_DAMAGE,
            CAVALRY_RANGE,
            CAVALRY_COOLDOWN,
        );
        let cavalry = Archetype {
            health,
            stats,
            cost: Some(Resources::new(200, 0, 0, 80)),
            training_time: CAVALRY_TRAINING_TIME,
            traits: UnitTraits {
                charge: Some(ChargeProfile {
                    trigger: ChargeTrigger::LongMove {
                        min_distance: CAVALRY_CHARGE_TRIGGER_DISTANCE,
                    },
                    duration: CAVALRY_CHARGE_DURATION,
                    speed_multiplier: CAVALRY_CHARGE_SPEED,
                    damage_multiplier: CAVALRY_CHARGE_DAMAGE,
                    gate_multiplier: 1.0,
                    bonus_hit: CAVALRY_CHARGE_BONUS_HIT,
                }),
                ..Default::default()
            },
        };

        let (health, stats) = base_stats(
            CHAMPION_HEALTH,
            CHAMPION_SPEED,
            CHAMPION_DAMAGE,
            CHAMPION_RANGE,
            CHAMPION_COOLDOWN,
        );
        let champion = Archetype {
            health,
            stats,
            cost: Some(Resources::new(400, 100, 0, 100)),
            training_time: CHAMPION_TRAINING_TIME,
            traits: UnitTraits::default(),
        };

        let (health, stats) = base_stats(
            ELEPHANT_HEALTH,
            ELEPHANT_SPEED,
            ELEPHANT_DAMAGE,
            ELEPHANT_RANGE,
            ELEPHANT_COOLDOWN,
        );
        let siege_elephant = Archetype {
            health,
            stats,
            cost: None,
            training_time: 0.0,
            traits: UnitTraits {
                charge: Some(ChargeProfile {
                    trigger: ChargeTrigger::Activated {
                        cooldown: ELEPHANT_CHARGE_COOLDOWN,
                    },
                    duration: ELEPHANT_CHARGE_DURATION,
                    speed_multiplier: ELEPHANT_CHARGE_SPEED,
                    damage_multiplier: 1.0,
                    gate_multiplier: ELEPHANT_CHARGE_GATE_MULTIPLIER,
                    bonus_hit: 0.0,
                }),
                ..Default::default()
            },
        };

        let (health, mut stats) = base_stats(RAM_HEALTH, RAM_SPEED, RAM_DAMAGE, RAM_RANGE, RAM_COOLDOWN);
        stats.armor = RAM_ARMOR;
        let siege_ram = Archetype {
            health,
            stats,
            cost: Some(Resources::new(300, 200, 0, 0)),
            training_time: RAM_TRAINING_TIME,
            traits: UnitTraits {
                gate_damage_multiplier: RAM_GATE_MULTIPLIER,
                crew: Some(CrewProfile {
                    size: RAM_CREW,
                    loss_thresholds: vec![RAM_CREW_LOSS_HIGH, RAM_CREW_LOSS_LOW],
                }),
                ..Default::default()
            },
        };

        Self {
            worker,
            soldier,
            archer,
            cavalry,
            champion,
            siege_elephant,
            siege_ram,
        }
    }
}

/// Stat multipliers of a champion variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantModifiers {
    pub health: f32,
    pub damage: f32,
    pub speed: f32,
    pub range: f32,
}

impl ChampionVariant {
    pub fn modifiers(self) -> VariantModifiers {
        let base = VariantModifiers {
            health: 1.0,
            damage: 1.0,
            speed: 1.0,
            range: 1.0,
        };
        match self {
            ChampionVariant::Commander => VariantModifiers { damage: 1.2, ..base },
            ChampionVariant::Warlord => VariantModifiers {
                damage: 1.5,
                speed: 0.9,
                ..base
            },
            ChampionVariant::Outrider => VariantModifiers {
                speed: 1.5,
                range: 0.8,
                ..base
            },
            ChampionVariant::Shieldbearer => VariantModifiers {
                health: 1.5,
                speed: 0.8,
                ..base
            },
        }
    }
}
