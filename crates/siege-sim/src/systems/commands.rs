//! Command executor: turns player orders into per-unit state changes.
//!
//! Every handle in a selection is re-validated; missing, dead and enemy
//! units are skipped, and an empty selection does nothing.

use glam::Vec2;
use hecs::{Entity, World};

use siege_core::components::Gatherer;
use siege_core::enums::{Stance, Team, WorkerState};
use siege_core::structures::{Gate, ResourceNode};
use siege_core::unit::Unit;
use siege_pathfinding::Pathfinder;

use siege_enemy_ai::behavior::find_nearest;

use crate::navigation::route;

/// Living player units from a selection, deduplicated, in selection order.
pub fn selected_units(world: &World, units: &[Entity]) -> Vec<Entity> {
    let mut selected = Vec::with_capacity(units.len());
    for &entity in units {
        if selected.contains(&entity) {
            continue;
        }
        let valid = world
            .get::<&Unit>(entity)
            .map(|u| u.is_alive() && u.team == Team::Player)
            .unwrap_or(false);
        if valid {
            selected.push(entity);
        }
    }
    selected
}

fn centroid(world: &World, units: &[Entity]) -> Option<Vec2> {
    let positions: Vec<Vec2> = units
        .iter()
        .filter_map(|&e| world.get::<&Unit>(e).ok().map(|u| u.position))
        .collect();
    if positions.is_empty() {
        return None;
    }
    Some(positions.iter().copied().sum::<Vec2>() / positions.len() as f32)
}

fn release_worker(world: &mut World, entity: Entity) {
    if let Ok(mut gatherer) = world.get::<&mut Gatherer>(entity) {
        gatherer.state = WorkerState::Idle;
        gatherer.node = None;
    }
}

pub fn move_units(world: &mut World, pathfinder: &mut Pathfinder, units: &[Entity], point: Vec2) {
    for entity in selected_units(world, units) {
        release_worker(world, entity);
        route(world, pathfinder, entity, point);
    }
}

/// Focus the selection on one enemy. Units pursue it until in range.
pub fn attack_target(world: &mut World, pathfinder: &mut Pathfinder, units: &[Entity], target: Entity) {
    let target_position = match world.get::<&Unit>(target) {
        Ok(t) if t.is_alive() && t.team == Team::Enemy => t.position,
        _ => {
            tracing::debug!("attack order on invalid target ignored");
            return;
        }
    };
    for entity in selected_units(world, units) {
        release_worker(world, entity);
        route(world, pathfinder, entity, target_position);
        // Routing clears targets, so the focus is set afterwards.
        if let Ok(mut unit) = world.get::<&mut Unit>(entity) {
            unit.ordered_target = Some(target);
            unit.target = Some(target);
        }
    }
}

pub fn set_stance(world: &mut World, units: &[Entity], stance: Stance) {
    for entity in selected_units(world, units) {
        if let Ok(mut unit) = world.get::<&mut Unit>(entity) {
            unit.stance = stance;
        }
    }
}

/// March toward the standing gate closest to the selection's centroid.
pub fn attack_nearest_gate(world: &mut World, pathfinder: &mut Pathfinder, units: &[Entity]) {
    let selected = selected_units(world, units);
    let Some(center) = centroid(world, &selected) else {
        return;
    };
    let gates: Vec<(Entity, Vec2)> = world
        .query::<&Gate>()
        .iter()
        .filter(|(_, gate)| !gate.is_destroyed())
        .map(|(e, gate)| (e, gate.center()))
        .collect();
    let Some((gate, gate_center, _)) = find_nearest(center, gates) else {
        tracing::debug!("no standing gate to attack");
        return;
    };

    for entity in selected {
        release_worker(world, entity);
        route(world, pathfinder, entity, gate_center);
        if let Ok(mut unit) = world.get::<&mut Unit>(entity) {
            unit.target_gate = Some(gate);
        }
    }
}

pub fn stop(world: &mut World, units: &[Entity]) {
    for entity in selected_units(world, units) {
        release_worker(world, entity);
        if let Ok(mut unit) = world.get::<&mut Unit>(entity) {
            unit.stop();
        }
    }
}

/// Same as setting the StandGround stance. Current orders are kept.
pub fn hold_position(world: &mut World, units: &[Entity]) {
    set_stance(world, units, Stance::StandGround);
}

/// Offsets of a square-ish grid of `count` slots centered on the origin,
/// `ceil(sqrt(count))` columns wide.
pub fn formation_offsets(count: usize, spacing: f32) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }
    let cols = (count as f32).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    let half_width = (cols - 1) as f32 * 0.5;
    let half_height = (rows - 1) as f32 * 0.5;
    (0..count)
        .map(|i| {
            let col = (i % cols) as f32;
            let row = (i / cols) as f32;
            Vec2::new((col - half_width) * spacing, (row - half_height) * spacing)
        })
        .collect()
}

/// Arrange the selection in formation around its centroid.
pub fn formation_move(world: &mut World, pathfinder: &mut Pathfinder, units: &[Entity], spacing: f32) {
    let selected = selected_units(world, units);
    let Some(center) = centroid(world, &selected) else {
        return;
    };
    let offsets = formation_offsets(selected.len(), spacing);
    for (entity, offset) in selected.into_iter().zip(offsets) {
        release_worker(world, entity);
        route(world, pathfinder, entity, center + offset);
    }
}

/// Send workers to a resource node. Non-workers in the selection are ignored.
pub fn gather(world: &mut World, pathfinder: &mut Pathfinder, units: &[Entity], node: Entity) {
    let node_position = match world.get::<&ResourceNode>(node) {
        Ok(n) if !n.is_depleted() => n.position,
        _ => {
            tracing::debug!("gather order on missing or depleted node ignored");
            return;
        }
    };
    for entity in selected_units(world, units) {
        if world.get::<&Gatherer>(entity).is_err() {
            continue;
        }
        route(world, pathfinder, entity, node_position);
        if let Ok(mut gatherer) = world.get::<&mut Gatherer>(entity) {
            gatherer.state = WorkerState::MovingToResource;
            gatherer.node = Some(node);
        }
    }
}

pub fn activate_charge(world: &mut World, units: &[Entity]) {
    for entity in selected_units(world, units) {
        if let Ok(mut unit) = world.get::<&mut Unit>(entity) {
            if unit.activate_charge() {
                tracing::debug!(unit = entity.to_bits().get(), "charge activated");
            }
        }
    }
}
