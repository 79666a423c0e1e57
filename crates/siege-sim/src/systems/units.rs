//! Unit update system: advances every unit's state machine, keeps ordered
//! pursuits on course and steps worker gathering states.

use std::collections::HashMap;

use glam::Vec2;
use hecs::{Entity, World};

use siege_core::components::Gatherer;
use siege_core::enums::WorkerState;
use siege_core::structures::ResourceNode;
use siege_core::unit::{TargetInfo, Unit, UnitRules};
use siege_pathfinding::Pathfinder;

use crate::navigation::route;

/// Position and liveness of every unit, keyed by handle.
pub fn unit_lookup(world: &World) -> HashMap<Entity, TargetInfo> {
    world
        .query::<&Unit>()
        .iter()
        .map(|(entity, unit)| {
            (
                entity,
                TargetInfo {
                    position: unit.position,
                    alive: unit.is_alive(),
                },
            )
        })
        .collect()
}

pub fn run(
    world: &mut World,
    pathfinder: &mut Pathfinder,
    dt: f32,
    rules: &UnitRules,
    repath_distance: f32,
    arrival_radius: f32,
) {
    let lookup = unit_lookup(world);
    let nodes: HashMap<Entity, (Vec2, bool)> = world
        .query::<&ResourceNode>()
        .iter()
        .map(|(entity, node)| (entity, (node.position, node.is_depleted())))
        .collect();

    let mut pursuits: Vec<(Entity, Entity, Vec2)> = Vec::new();

    for (entity, (unit, gatherer)) in world.query_mut::<(&mut Unit, Option<&mut Gatherer>)>() {
        if !unit.is_alive() {
            continue;
        }

        let outcome = unit.update(dt, rules, |target| lookup.get(&target).copied());
        if outcome.retreated {
            tracing::debug!(
                unit = entity.to_bits().get(),
                health = unit.health(),
                "unit retreating"
            );
        }

        if let Some(target) = unit.ordered_target {
            match lookup.get(&target) {
                Some(info) if info.alive => {
                    let distance = unit.position.distance(info.position);
                    let off_course = unit
                        .move_target
                        .map_or(true, |goal| goal.distance(info.position) > repath_distance);
                    if distance > unit.effective.attack_range && off_course {
                        pursuits.push((entity, target, info.position));
                    }
                }
                _ => unit.ordered_target = None,
            }
        }

        if let Some(gatherer) = gatherer {
            if outcome.retreated {
                gatherer.state = WorkerState::Idle;
                gatherer.node = None;
                continue;
            }
            step_worker(unit, gatherer, &nodes, arrival_radius);
        }
    }

    for (entity, target, position) in pursuits {
        route(world, pathfinder, entity, position);
        if let Ok(mut unit) = world.get::<&mut Unit>(entity) {
            unit.ordered_target = Some(target);
            unit.target = Some(target);
        }
    }
}

/// Idle -> MovingToResource -> Gathering -> Idle. A node that is gone or
/// depleted sends the worker back to Idle.
fn step_worker(
    unit: &Unit,
    gatherer: &mut Gatherer,
    nodes: &HashMap<Entity, (Vec2, bool)>,
    arrival_radius: f32,
) {
    if gatherer.state == WorkerState::Idle {
        return;
    }
    let node = gatherer.node.and_then(|n| nodes.get(&n));
    match (gatherer.state, node) {
        (_, None) | (_, Some((_, true))) => {
            gatherer.state = WorkerState::Idle;
            gatherer.node = None;
        }
        (WorkerState::MovingToResource, Some((position, false))) => {
            if unit.position.distance(*position) <= arrival_radius {
                gatherer.state = WorkerState::Gathering;
            }
        }
        _ => {}
    }
}
