//! Cleanup system: removes dead units and spent projectiles.
//!
//! A unit that dies is first tagged `Fallen` and despawned on the next
//! cleanup, so it appears dead in exactly one snapshot and every system has
//! read its terminal state before the handle goes away.

use hecs::{Entity, World};

use siege_core::components::Fallen;
use siege_core::projectile::Projectile;
use siege_core::unit::Unit;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, tick: u64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (_unit, _fallen)) in world.query_mut::<(&Unit, &Fallen)>() {
        despawn_buffer.push(entity);
    }
    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if !projectile.active {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    // Tag units that died this tick.
    for (entity, (unit, fallen)) in world.query_mut::<(&Unit, Option<&Fallen>)>() {
        if !unit.is_alive() && fallen.is_none() {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.insert_one(entity, Fallen { tick });
    }
}
