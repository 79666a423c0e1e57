//! Fundamental geometric, timing and stockpile types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }
}

/// Axis-aligned rectangle in world units. `min` is the bottom-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle from its bottom-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        let half = Vec2::new(width, height) * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Distance from `point` to the nearest point of the rectangle (0 inside).
    pub fn distance_to(&self, point: Vec2) -> f32 {
        point.clamp(self.min, self.max).distance(point)
    }
}

/// The four stockpiles. Also used as a cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub gold: u32,
    pub wood: u32,
    pub stone: u32,
    pub food: u32,
}

impl Resources {
    pub const fn new(gold: u32, wood: u32, stone: u32, food: u32) -> Self {
        Self {
            gold,
            wood,
            stone,
            food,
        }
    }

    /// True when every component of `cost` is covered.
    pub fn can_afford(&self, cost: &Resources) -> bool {
        self.gold >= cost.gold
            && self.wood >= cost.wood
            && self.stone >= cost.stone
            && self.food >= cost.food
    }

    /// Deduct `cost` atomically. Returns false, leaving the stockpile untouched,
    /// when any component is short.
    pub fn spend(&mut self, cost: &Resources) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.gold -= cost.gold;
        self.wood -= cost.wood;
        self.stone -= cost.stone;
        self.food -= cost.food;
        true
    }

    /// Add `amount` to every stockpile, saturating.
    pub fn grant(&mut self, amount: &Resources) {
        self.gold = self.gold.saturating_add(amount.gold);
        self.wood = self.wood.saturating_add(amount.wood);
        self.stone = self.stone.saturating_add(amount.stone);
        self.food = self.food.saturating_add(amount.food);
    }

    /// Every component scaled by `factor`, rounded down.
    pub fn scaled(&self, factor: f32) -> Self {
        let scale = |v: u32| (v as f32 * factor).max(0.0) as u32;
        Self {
            gold: scale(self.gold),
            wood: scale(self.wood),
            stone: scale(self.stone),
            food: scale(self.food),
        }
    }
}
