//! Kind-specific behavioral profiles.
//!
//! Scales the shared engage/guard tuning per unit kind so ranged units
//! hang back, cavalry roams and siege engines stay near their gate.

use siege_core::enums::UnitKind;

/// Shared AI tuning, normally read from `CombatConfig`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiTuning {
    pub engage_range: f32,
    pub guard_radius: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        use siege_core::constants::{AI_ENGAGE_RANGE, AI_GUARD_RADIUS};
        Self {
            engage_range: AI_ENGAGE_RANGE,
            guard_radius: AI_GUARD_RADIUS,
        }
    }
}

/// Behavioral profile for one unit kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyBehaviorProfile {
    /// Chase player units closer than this.
    pub engage_range: f32,
    /// Walk back to the gate when farther than this from it.
    pub guard_radius: f32,
    /// Fraction of attack range to close to before stopping.
    pub standoff: f32,
}

pub fn get_profile(kind: UnitKind, tuning: &AiTuning) -> EnemyBehaviorProfile {
    let (engage, guard, standoff) = match kind {
        UnitKind::Archer => (1.25, 1.0, 0.9),
        UnitKind::Cavalry => (1.5, 1.5, 1.0),
        UnitKind::SiegeElephant | UnitKind::SiegeRam => (0.5, 0.5, 1.0),
        UnitKind::Worker | UnitKind::Soldier | UnitKind::Champion => (1.0, 1.0, 1.0),
    };
    EnemyBehaviorProfile {
        engage_range: tuning.engage_range * engage,
        guard_radius: tuning.guard_radius * guard,
        standoff,
    }
}
