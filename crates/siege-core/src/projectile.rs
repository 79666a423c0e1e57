//! Projectiles fired by gate towers and ranged units.

use glam::Vec2;
use hecs::Entity;

use crate::enums::Team;

/// Outcome of advancing a projectile by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flight {
    InFlight,
    /// Reached the target; the caller applies `damage`.
    Hit { target: Entity, damage: f32 },
    /// Target gone before arrival.
    Expired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    pub target: Entity,
    pub speed: f32,
    pub damage: f32,
    pub hit_radius: f32,
    /// Team that fired it.
    pub team: Team,
    /// Unit that fired it, if any (gate towers have no shooter unit).
    pub shooter: Option<Entity>,
    pub active: bool,
}

impl Projectile {
    /// Home in on the target's current position. `target_position` is `None`
    /// when the target no longer exists or has died.
    pub fn advance(&mut self, dt: f32, target_position: Option<Vec2>) -> Flight {
        if !self.active {
            return Flight::Expired;
        }
        let Some(goal) = target_position else {
            self.active = false;
            return Flight::Expired;
        };

        let delta = goal - self.position;
        let distance = delta.length();
        let step = self.speed * dt;
        if distance <= step + self.hit_radius {
            self.position = goal;
            self.active = false;
            return Flight::Hit {
                target: self.target,
                damage: self.damage,
            };
        }
        self.position += delta / distance * step;
        Flight::InFlight
    }
}
