//! Enemy decision logic.
//!
//! An enemy chases the nearest player unit inside its engage range and
//! otherwise guards the nearest standing gate. Evaluated every tick unless
//! the AI interval throttles it.

use glam::Vec2;
use siege_core::enums::UnitKind;

use crate::profiles::{get_profile, AiTuning};

/// Input to the decision function for a single enemy.
#[derive(Debug, Clone)]
pub struct EnemyContext {
    pub kind: UnitKind,
    pub position: Vec2,
    pub attack_range: f32,
    /// Position of the nearest living player unit.
    pub nearest_player: Option<Vec2>,
    /// Center of the nearest standing gate.
    pub nearest_gate: Option<Vec2>,
}

/// What the enemy should do until the next evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyDecision {
    /// Move toward a player unit.
    Chase(Vec2),
    /// Walk back toward a gate.
    Guard(Vec2),
    /// Keep the current orders.
    Hold,
}

impl EnemyDecision {
    pub fn destination(&self) -> Option<Vec2> {
        match *self {
            EnemyDecision::Chase(p) | EnemyDecision::Guard(p) => Some(p),
            EnemyDecision::Hold => None,
        }
    }
}

pub fn evaluate(ctx: &EnemyContext, tuning: &AiTuning) -> EnemyDecision {
    let profile = get_profile(ctx.kind, tuning);

    if let Some(player) = ctx.nearest_player {
        let distance = ctx.position.distance(player);
        if distance < profile.engage_range {
            if distance > ctx.attack_range * profile.standoff {
                return EnemyDecision::Chase(player);
            }
            return EnemyDecision::Hold;
        }
    } else {
        // Nobody left to fight.
        return EnemyDecision::Hold;
    }

    match ctx.nearest_gate {
        Some(gate) if ctx.position.distance(gate) > profile.guard_radius => {
            EnemyDecision::Guard(gate)
        }
        _ => EnemyDecision::Hold,
    }
}

/// Linear scan for the candidate closest to `from`. Ties keep the earlier
/// candidate.
pub fn find_nearest<T>(
    from: Vec2,
    candidates: impl IntoIterator<Item = (T, Vec2)>,
) -> Option<(T, Vec2, f32)> {
    let mut best: Option<(T, Vec2, f32)> = None;
    for (item, position) in candidates {
        let d = from.distance(position);
        if best.as_ref().map_or(true, |(_, _, bd)| d < *bd) {
            best = Some((item, position, d));
        }
    }
    best
}
