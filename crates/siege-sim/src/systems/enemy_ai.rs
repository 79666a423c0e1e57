//! Enemy AI system: runs the enemy decision function, every tick unless
//! `ai_interval` throttles it.
//!
//! Decisions are collected first and applied afterwards, since routing
//! needs mutable access to the world.

use glam::Vec2;
use hecs::{Entity, World};

use siege_core::config::CombatConfig;
use siege_core::enums::Team;
use siege_core::structures::Gate;
use siege_core::unit::Unit;
use siege_pathfinding::Pathfinder;

use siege_enemy_ai::behavior::{evaluate, find_nearest, EnemyContext};
use siege_enemy_ai::profiles::AiTuning;

use crate::navigation::route;

pub fn run(world: &mut World, pathfinder: &mut Pathfinder, combat: &CombatConfig) {
    let tuning = AiTuning {
        engage_range: combat.ai_engage_range,
        guard_radius: combat.ai_guard_radius,
    };

    let players: Vec<((), Vec2)> = world
        .query::<&Unit>()
        .iter()
        .filter(|(_, u)| u.is_alive() && u.team == Team::Player)
        .map(|(_, u)| ((), u.position))
        .collect();
    let gates: Vec<((), Vec2)> = world
        .query::<&Gate>()
        .iter()
        .filter(|(_, g)| !g.is_destroyed())
        .map(|(_, g)| ((), g.center()))
        .collect();

    let mut orders: Vec<(Entity, Vec2)> = Vec::new();
    {
        let mut query = world.query::<&Unit>();
        for (entity, unit) in query.iter() {
            if !unit.is_alive() || unit.team != Team::Enemy || unit.retreating {
                continue;
            }

            let ctx = EnemyContext {
                kind: unit.kind,
                position: unit.position,
                attack_range: unit.effective.attack_range,
                nearest_player: find_nearest(unit.position, players.iter().copied()).map(|(_, p, _)| p),
                nearest_gate: find_nearest(unit.position, gates.iter().copied()).map(|(_, p, _)| p),
            };

            let Some(destination) = evaluate(&ctx, &tuning).destination() else {
                continue;
            };
            let replan = unit
                .move_target
                .map_or(true, |current| current.distance(destination) > combat.ai_repath_distance);
            if replan {
                orders.push((entity, destination));
            }
        }
    }

    for (entity, destination) in orders {
        route(world, pathfinder, entity, destination);
    }
}
