//! Route planning for unit move orders.

use glam::Vec2;
use hecs::{Entity, World};

use siege_core::enums::Team;
use siege_core::unit::Unit;
use siege_pathfinding::Pathfinder;

/// Send a unit to `destination` along a grid path, or straight there when no
/// path exists. Returns false if the unit is missing or dead.
pub fn route(world: &mut World, pathfinder: &mut Pathfinder, entity: Entity, destination: Vec2) -> bool {
    let (start, team) = match world.get::<&Unit>(entity) {
        Ok(unit) if unit.is_alive() => (unit.position, unit.team),
        _ => return false,
    };

    let path = pathfinder.find_path(start, destination);
    let Ok(mut unit) = world.get::<&mut Unit>(entity) else {
        return false;
    };
    match path {
        Some(waypoints) => unit.set_path(waypoints, destination),
        None => {
            if team == Team::Player {
                tracing::warn!(
                    unit = entity.to_bits().get(),
                    x = destination.x,
                    y = destination.y,
                    "no path, moving directly"
                );
            } else {
                tracing::trace!(unit = entity.to_bits().get(), "no path, moving directly");
            }
            unit.move_to(destination);
        }
    }
    true
}
