//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only: it never modifies the world.

use hecs::World;

use siege_core::components::Gatherer;
use siege_core::enums::*;
use siege_core::events::{Notification, SimEvent};
use siege_core::projectile::Projectile;
use siege_core::state::*;
use siege_core::structures::{Building, Gate, ResourceNode};
use siege_core::types::{Resources, SimTime};
use siege_core::unit::Unit;

/// Everything outside the world that goes into a snapshot.
pub struct SnapshotInputs<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    pub resources: Resources,
    pub population: PopulationView,
    pub training: Vec<TrainingView>,
    pub notifications: &'a [Notification],
    pub events: Vec<SimEvent>,
}

pub fn build_snapshot(world: &World, inputs: SnapshotInputs<'_>) -> GameStateSnapshot {
    let (player_units, enemy_units) = build_units(world);
    GameStateSnapshot {
        time: inputs.time,
        phase: inputs.phase,
        player_units,
        enemy_units,
        gates: build_gates(world),
        buildings: build_buildings(world),
        resource_nodes: build_resource_nodes(world),
        projectiles: build_projectiles(world),
        wave: inputs.wave,
        resources: inputs.resources,
        population: inputs.population,
        training: inputs.training,
        notifications: inputs.notifications.to_vec(),
        events: inputs.events,
    }
}

/// Player and enemy unit views, in world order.
fn build_units(world: &World) -> (Vec<UnitView>, Vec<UnitView>) {
    let mut player = Vec::new();
    let mut enemy = Vec::new();
    for (entity, (unit, gatherer)) in world.query::<(&Unit, Option<&Gatherer>)>().iter() {
        let view = UnitView {
            id: entity.to_bits().get(),
            kind: unit.kind,
            team: unit.team,
            position: unit.position,
            health: unit.health(),
            max_health: unit.max_health(),
            alive: unit.is_alive(),
            stance: unit.stance,
            level: unit.leveling.level,
            kills: unit.leveling.kills,
            moving: unit.moving,
            attacking: unit.attacking,
            retreating: unit.retreating,
            charging: unit.is_charging(),
            worker_state: gatherer.map(|g| g.state),
        };
        match unit.team {
            Team::Player => player.push(view),
            Team::Enemy => enemy.push(view),
        }
    }
    (player, enemy)
}

fn build_gates(world: &World) -> Vec<GateView> {
    world
        .query::<&Gate>()
        .iter()
        .map(|(entity, gate)| GateView {
            id: entity.to_bits().get(),
            side: gate.side,
            center: gate.center(),
            size: gate.bounds.size(),
            health: gate.health(),
            max_health: gate.max_health(),
            destroyed: gate.is_destroyed(),
        })
        .collect()
}

fn build_buildings(world: &World) -> Vec<BuildingView> {
    world
        .query::<&Building>()
        .iter()
        .map(|(entity, building)| BuildingView {
            id: entity.to_bits().get(),
            kind: building.kind,
            center: building.bounds.center(),
            size: building.bounds.size(),
            health: building.health(),
            max_health: building.max_health(),
            destroyed: building.is_destroyed(),
        })
        .collect()
}

fn build_resource_nodes(world: &World) -> Vec<ResourceNodeView> {
    world
        .query::<&ResourceNode>()
        .iter()
        .map(|(entity, node)| ResourceNodeView {
            id: entity.to_bits().get(),
            kind: node.kind,
            position: node.position,
            remaining: node.remaining(),
            max_amount: node.max_amount(),
            depleted: node.is_depleted(),
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| p.active)
        .map(|(entity, p)| ProjectileView {
            id: entity.to_bits().get(),
            team: p.team,
            position: p.position,
            target: p.target.to_bits().get(),
        })
        .collect()
}
