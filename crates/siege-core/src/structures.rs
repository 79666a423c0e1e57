//! Static structures: gates, buildings and resource nodes.

use glam::Vec2;
use hecs::Entity;

use crate::enums::{BuildingKind, GateSide, ResourceKind};
use crate::types::Rect;

/// Tower mounted on a gate. Fires at the nearest enemy within range.
#[derive(Debug, Clone, PartialEq)]
pub struct GateTower {
    pub range: f32,
    pub damage: f32,
    pub cooldown: f32,
    pub timer: f32,
    pub target: Option<Entity>,
}

impl GateTower {
    /// Count down the reload timer, clamped at zero.
    pub fn tick(&mut self, dt: f32) {
        self.timer = (self.timer - dt).max(0.0);
    }

    /// Take a shot if reloaded. Returns the projectile damage.
    pub fn fire(&mut self) -> Option<f32> {
        if self.timer > 0.0 {
            return None;
        }
        self.timer = self.cooldown;
        Some(self.damage)
    }
}

/// A destructible fortress gate. Destroying every gate wins the game.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    pub side: GateSide,
    pub bounds: Rect,
    health: f32,
    max_health: f32,
    destroyed: bool,
    pub tower: GateTower,
}

impl Gate {
    pub fn new(side: GateSide, bounds: Rect, max_health: f32, tower: GateTower) -> Self {
        Self {
            side,
            bounds,
            health: max_health,
            max_health,
            destroyed: max_health <= 0.0,
            tower,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// True when `point` is within `range` of the gate's surface.
    pub fn in_range(&self, point: Vec2, range: f32) -> bool {
        self.bounds.distance_to(point) <= range
    }

    /// Apply damage. Returns true on the hit that destroys the gate.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.destroyed {
            return false;
        }
        self.health = (self.health - amount.max(0.0)).max(0.0);
        self.sync_destroyed()
    }

    /// Set health directly, clamped to `[0, max_health]`.
    pub fn set_health(&mut self, value: f32) {
        if !self.destroyed {
            self.health = value.clamp(0.0, self.max_health);
        }
    }

    /// Flag the gate destroyed if its health has reached zero.
    /// Returns true if this call made the transition.
    pub fn sync_destroyed(&mut self) -> bool {
        if !self.destroyed && self.health <= 0.0 {
            self.health = 0.0;
            self.destroyed = true;
            self.tower.target = None;
            return true;
        }
        false
    }
}

/// A player building. Blocks movement while standing.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub kind: BuildingKind,
    pub bounds: Rect,
    health: f32,
    max_health: f32,
    destroyed: bool,
}

impl Building {
    pub fn new(kind: BuildingKind, bounds: Rect, max_health: f32) -> Self {
        Self {
            kind,
            bounds,
            health: max_health,
            max_health,
            destroyed: false,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Where units produced by this building appear: just below its lower edge.
    pub fn rally_point(&self) -> Vec2 {
        Vec2::new(self.bounds.center().x, self.bounds.min.y - 20.0)
    }
}

/// A harvestable deposit. Depletion is permanent.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNode {
    pub kind: ResourceKind,
    pub position: Vec2,
    pub size: f32,
    remaining: u32,
    max_amount: u32,
}

impl ResourceNode {
    pub fn new(kind: ResourceKind, position: Vec2, size: f32, amount: u32) -> Self {
        Self {
            kind,
            position,
            size,
            remaining: amount,
            max_amount: amount,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn max_amount(&self) -> u32 {
        self.max_amount
    }

    pub fn is_depleted(&self) -> bool {
        self.remaining == 0
    }

    /// Withdraw up to `amount`; returns what was actually taken.
    pub fn withdraw(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.remaining);
        self.remaining -= taken;
        taken
    }
}
