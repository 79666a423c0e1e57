//! Resource economy: periodic harvesting by gathering workers.

use glam::Vec2;
use hecs::{Entity, World};

use siege_core::components::Gatherer;
use siege_core::config::EconomyConfig;
use siege_core::enums::{ResourceKind, WorkerState};
use siege_core::events::SimEvent;
use siege_core::structures::ResourceNode;
use siege_core::types::Resources;
use siege_core::unit::Unit;

/// Count `timer` up by `dt` and harvest once it reaches the gather interval.
pub fn run(
    world: &mut World,
    resources: &mut Resources,
    economy: &EconomyConfig,
    timer: &mut f32,
    dt: f32,
    events: &mut Vec<SimEvent>,
) {
    *timer += dt;
    if *timer < economy.gather_interval {
        return;
    }
    *timer = 0.0;
    harvest(world, resources, economy, events);
}

/// One gather cycle. Each gathering worker draws from the nearest
/// non-depleted node closer than the gather radius.
pub fn harvest(
    world: &mut World,
    resources: &mut Resources,
    economy: &EconomyConfig,
    events: &mut Vec<SimEvent>,
) {
    let workers: Vec<(Entity, Vec2)> = world
        .query::<(&Unit, &Gatherer)>()
        .iter()
        .filter(|(_, (u, g))| u.is_alive() && g.state == WorkerState::Gathering)
        .map(|(entity, (u, _))| (entity, u.position))
        .collect();
    if workers.is_empty() {
        return;
    }

    let mut nodes: Vec<(Entity, Vec2, bool)> = world
        .query::<&ResourceNode>()
        .iter()
        .map(|(entity, n)| (entity, n.position, n.is_depleted()))
        .collect();

    let mut gathered = Resources::default();
    let mut depleted: Vec<Entity> = Vec::new();

    for (worker, position) in workers {
        let mut nearest: Option<(usize, f32)> = None;
        for (i, (_, node_position, is_depleted)) in nodes.iter().enumerate() {
            if *is_depleted {
                continue;
            }
            let d = position.distance(*node_position);
            if d < economy.gather_radius && nearest.map_or(true, |(_, best)| d < best) {
                nearest = Some((i, d));
            }
        }
        let Some((index, _)) = nearest else {
            continue;
        };

        let node_entity = nodes[index].0;
        let Ok(mut node) = world.get::<&mut ResourceNode>(node_entity) else {
            continue;
        };
        let taken = node.withdraw(economy.gather_amount);
        match node.kind {
            ResourceKind::Wood => gathered.wood += taken,
            ResourceKind::Stone => gathered.stone += taken,
        }
        if node.is_depleted() {
            nodes[index].2 = true;
            depleted.push(node_entity);
            events.push(SimEvent::NodeDepleted {
                node: node_entity.to_bits().get(),
                kind: node.kind,
            });
            tracing::debug!(node = node_entity.to_bits().get(), kind = ?node.kind, "node depleted");
            drop(node);
            if let Ok(mut gatherer) = world.get::<&mut Gatherer>(worker) {
                gatherer.state = WorkerState::Idle;
                gatherer.node = None;
            }
        }
    }

    if !depleted.is_empty() {
        for (_, gatherer) in world.query_mut::<&mut Gatherer>() {
            if gatherer.node.is_some_and(|n| depleted.contains(&n)) {
                gatherer.state = WorkerState::Idle;
                gatherer.node = None;
            }
        }
    }

    resources.grant(&gathered);
    if gathered != Resources::default() {
        tracing::debug!(wood = gathered.wood, stone = gathered.stone, "gather cycle");
    }
}
