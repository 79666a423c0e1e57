//! The unit state machine.
//!
//! A `Unit` owns its movement, combat timers, buffs, leveling and retreat
//! state. Other entities are referenced only through `hecs::Entity` handles,
//! which the caller re-validates before acting on them.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::archetypes::{Archetype, ChargeTrigger, UnitStats, UnitTraits};
use crate::constants::*;
use crate::enums::{ChampionVariant, Stance, Team, UnitKind};

/// Tunables for the per-tick update and progression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitRules {
    pub waypoint_radius: f32,
    pub arrival_snap: f32,
    pub target_leash_factor: f32,
    pub retreat_health_fraction: f32,
    pub retreat_distance: f32,
    pub xp_per_kill: f32,
    pub first_level_xp: f32,
    pub level_xp_growth: f32,
    pub max_level: u32,
}

impl Default for UnitRules {
    fn default() -> Self {
        Self {
            waypoint_radius: WAYPOINT_RADIUS,
            arrival_snap: ARRIVAL_SNAP,
            target_leash_factor: TARGET_LEASH_FACTOR,
            retreat_health_fraction: RETREAT_HEALTH_FRACTION,
            retreat_distance: RETREAT_DISTANCE,
            xp_per_kill: XP_PER_KILL,
            first_level_xp: FIRST_LEVEL_XP,
            level_xp_growth: LEVEL_XP_GROWTH,
            max_level: MAX_LEVEL,
        }
    }
}

/// Name of the buff applied by a charge.
pub const CHARGE_BUFF: &str = "charge";

/// A time-bounded multiplier on speed, damage and armor. A new buff replaces
/// an active one with the same name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub name: String,
    pub remaining: f32,
    pub speed: f32,
    pub damage: f32,
    pub armor: f32,
}

/// Level, experience and kill bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leveling {
    pub level: u32,
    pub experience: f32,
    pub next_threshold: f32,
    pub kills: u32,
}

/// Liveness and position of a referenced unit, as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub position: Vec2,
    pub alive: bool,
}

/// Result of a damage application.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageResult {
    /// Health actually removed.
    pub dealt: f32,
    /// True only on the hit that brought health to zero.
    pub killed: bool,
}

/// What happened during one `Unit::update`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UnitUpdate {
    /// Reached the end of the current move order this tick.
    pub arrived: bool,
    /// The current target was dropped as stale.
    pub target_dropped: bool,
    /// A retreat was triggered this tick.
    pub retreated: bool,
}

#[derive(Debug, Clone)]
pub struct Unit {
    pub kind: UnitKind,
    pub team: Team,
    pub variant: Option<ChampionVariant>,
    pub position: Vec2,
    health: f32,
    max_health: f32,
    alive: bool,
    pub base: UnitStats,
    pub effective: UnitStats,
    pub traits: UnitTraits,
    pub buffs: Vec<Buff>,
    pub stance: Stance,

    // --- Movement ---
    pub path: VecDeque<Vec2>,
    /// Final point of the current move order.
    pub move_target: Option<Vec2>,
    /// Destination of the most recent move order, kept after arrival.
    pub last_destination: Option<Vec2>,
    pub moving: bool,

    // --- Combat ---
    pub target: Option<Entity>,
    /// Explicitly ordered target, pursued until it dies or a new order arrives.
    pub ordered_target: Option<Entity>,
    /// Most recent unit to damage this one.
    pub last_attacker: Option<Entity>,
    pub target_gate: Option<Entity>,
    pub attack_timer: f32,
    pub anim_timer: f32,
    pub attacking: bool,

    pub leveling: Leveling,
    pub retreating: bool,
    pub charge_timer: f32,
    pub charge_cooldown: f32,
}

impl Unit {
    pub fn from_archetype(
        kind: UnitKind,
        team: Team,
        archetype: &Archetype,
        position: Vec2,
        rules: &UnitRules,
    ) -> Self {
        Self {
            kind,
            team,
            variant: None,
            position,
            health: archetype.health,
            max_health: archetype.health,
            alive: archetype.health > 0.0,
            base: archetype.stats,
            effective: archetype.stats,
            traits: archetype.traits.clone(),
            buffs: Vec::new(),
            stance: archetype.traits.default_stance,
            path: VecDeque::new(),
            move_target: None,
            last_destination: None,
            moving: false,
            target: None,
            ordered_target: None,
            last_attacker: None,
            target_gate: None,
            attack_timer: 0.0,
            anim_timer: 0.0,
            attacking: false,
            leveling: Leveling {
                level: 1,
                experience: 0.0,
                next_threshold: rules.first_level_xp,
                kills: 0,
            },
            retreating: false,
            charge_timer: 0.0,
            charge_cooldown: 0.0,
        }
    }

    /// Apply a champion variant's stat multipliers. Meant for spawn time.
    pub fn with_variant(mut self, variant: ChampionVariant) -> Self {
        let m = variant.modifiers();
        self.variant = Some(variant);
        self.max_health *= m.health;
        self.health = self.max_health;
        self.base.damage *= m.damage;
        self.base.speed *= m.speed;
        self.base.attack_range *= m.range;
        self.recompute_stats();
        self
    }

    /// Scale health and damage once, e.g. for difficulty at spawn.
    pub fn scaled(mut self, health: f32, damage: f32) -> Self {
        self.max_health *= health;
        self.health = self.max_health;
        self.alive = self.health > 0.0;
        self.base.damage *= damage;
        self.recompute_stats();
        self
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    /// Set health directly, clamped to `[0, max_health]`. Dead units stay dead.
    pub fn set_health(&mut self, value: f32) {
        if !self.alive {
            return;
        }
        self.health = value.clamp(0.0, self.max_health);
        if self.health <= 0.0 {
            self.die();
        }
    }

    pub fn heal(&mut self, amount: f32) {
        if self.alive && amount > 0.0 {
            self.health = (self.health + amount).min(self.max_health);
        }
    }

    /// Apply `raw` damage reduced by armor, never less than 1.
    pub fn take_damage(&mut self, raw: f32) -> DamageResult {
        if !self.alive {
            return DamageResult::default();
        }
        let amount = (raw - self.effective.armor).max(1.0);
        let before = self.health;
        self.health = (self.health - amount).max(0.0);
        let killed = self.health <= 0.0;
        if killed {
            self.die();
        }
        DamageResult {
            dealt: before - self.health,
            killed,
        }
    }

    fn die(&mut self) {
        self.health = 0.0;
        self.alive = false;
        self.moving = false;
        self.attacking = false;
        self.path.clear();
        self.move_target = None;
        self.target = None;
        self.ordered_target = None;
        self.target_gate = None;
    }

    pub fn can_attack(&self) -> bool {
        self.alive && self.attack_timer <= 0.0
    }

    /// Commit to an attack: reset the cooldown and return the damage to deliver.
    /// `None` while cooling down or dead.
    pub fn begin_attack(&mut self) -> Option<f32> {
        if !self.can_attack() {
            return None;
        }
        self.attack_timer = self.effective.attack_cooldown;
        self.attacking = true;
        self.anim_timer = ATTACK_ANIMATION_SECS;

        let mut damage = self.effective.damage;
        if let Some(charge) = self.traits.charge {
            if self.is_charging() {
                damage += self.effective.damage * charge.bonus_hit;
            }
        }
        Some(damage)
    }

    /// Strike `target` directly. Returns `None` when the attack is not permitted.
    pub fn attack(&mut self, target: &mut Unit, rules: &UnitRules) -> Option<DamageResult> {
        if !target.is_alive() {
            return None;
        }
        let damage = self.begin_attack()?;
        let result = target.take_damage(damage);
        if result.killed {
            self.credit_kill(rules);
        }
        Some(result)
    }

    /// Damage this unit deals to a gate with one hit.
    pub fn gate_damage(&self) -> f32 {
        let mut damage = self.effective.damage * self.traits.gate_damage_multiplier;
        if let Some(crew) = &self.traits.crew {
            damage *= self.crew().unwrap_or(crew.size) as f32 / crew.size.max(1) as f32;
        }
        if let Some(charge) = self.traits.charge {
            if self.is_charging() {
                damage *= charge.gate_multiplier;
            }
        }
        damage
    }

    /// Surviving crew for crewed archetypes.
    pub fn crew(&self) -> Option<u8> {
        self.traits
            .crew
            .as_ref()
            .map(|crew| crew.crew_at(self.health_fraction()))
    }

    /// Record a kill. Returns true if the unit gained at least one level.
    pub fn credit_kill(&mut self, rules: &UnitRules) -> bool {
        self.leveling.kills += 1;
        self.gain_experience(rules.xp_per_kill, rules)
    }

    pub fn gain_experience(&mut self, amount: f32, rules: &UnitRules) -> bool {
        if !self.alive {
            return false;
        }
        self.leveling.experience += amount;
        let mut leveled = false;
        while self.leveling.level < rules.max_level
            && self.leveling.experience >= self.leveling.next_threshold
        {
            self.leveling.experience -= self.leveling.next_threshold;
            self.level_up(rules);
            leveled = true;
        }
        leveled
    }

    fn level_up(&mut self, rules: &UnitRules) {
        self.leveling.level += 1;
        self.leveling.next_threshold *= rules.level_xp_growth;
        self.max_health *= LEVEL_POWER_GROWTH;
        self.health = self.max_health;
        self.base.damage *= LEVEL_POWER_GROWTH;
        self.base.speed *= LEVEL_SPEED_GROWTH;
        self.base.armor += LEVEL_ARMOR_GAIN;
        self.retreating = false;
        self.recompute_stats();
    }

    /// Add a buff, replacing any active buff with the same name.
    pub fn add_buff(&mut self, buff: Buff) {
        self.buffs.retain(|b| b.name != buff.name);
        self.buffs.push(buff);
        self.recompute_stats();
    }

    /// Effective stats from base stats and the active buff set.
    pub fn recompute_stats(&mut self) {
        let (speed, damage, armor) = self
            .buffs
            .iter()
            .fold((1.0, 1.0, 1.0), |(s, d, a), b| (s * b.speed, d * b.damage, a * b.armor));
        self.effective = UnitStats {
            speed: self.base.speed * speed,
            damage: self.base.damage * damage,
            armor: self.base.armor * armor,
            ..self.base
        };
    }

    pub fn is_charging(&self) -> bool {
        self.charge_timer > 0.0
    }

    fn start_charge(&mut self) {
        let Some(charge) = self.traits.charge else {
            return;
        };
        self.charge_timer = charge.duration;
        self.add_buff(Buff {
            name: CHARGE_BUFF.to_string(),
            remaining: charge.duration,
            speed: charge.speed_multiplier,
            damage: charge.damage_multiplier,
            armor: 1.0,
        });
    }

    /// Start an order-activated charge. False if the unit has none or it is cooling down.
    pub fn activate_charge(&mut self) -> bool {
        if !self.alive || self.is_charging() {
            return false;
        }
        match self.traits.charge.map(|c| c.trigger) {
            Some(ChargeTrigger::Activated { cooldown }) if self.charge_cooldown <= 0.0 => {
                self.start_charge();
                self.charge_cooldown = cooldown;
                true
            }
            _ => false,
        }
    }

    fn maybe_auto_charge(&mut self, destination: Vec2) {
        if let Some(ChargeTrigger::LongMove { min_distance }) = self.traits.charge.map(|c| c.trigger) {
            if !self.is_charging() && self.position.distance(destination) > min_distance {
                self.start_charge();
            }
        }
    }

    /// Seek `point` directly, discarding any path and combat target.
    pub fn move_to(&mut self, point: Vec2) {
        if !self.alive {
            return;
        }
        self.maybe_auto_charge(point);
        self.path.clear();
        self.move_target = Some(point);
        self.last_destination = Some(point);
        self.moving = true;
        self.target = None;
        self.ordered_target = None;
        self.target_gate = None;
    }

    /// Follow `waypoints`, then seek `destination`.
    pub fn set_path(&mut self, waypoints: Vec<Vec2>, destination: Vec2) {
        if !self.alive {
            return;
        }
        self.move_to(destination);
        self.path.extend(waypoints);
    }

    /// Re-issue the current position as the move target.
    pub fn stop(&mut self) {
        let here = self.position;
        self.move_to(here);
    }

    /// One tick of the state machine. `lookup` resolves the current target.
    pub fn update(
        &mut self,
        dt: f32,
        rules: &UnitRules,
        lookup: impl Fn(Entity) -> Option<TargetInfo>,
    ) -> UnitUpdate {
        let mut outcome = UnitUpdate::default();
        if !self.alive {
            return outcome;
        }

        self.tick_timers(dt);
        self.refresh_buffs(dt);
        outcome.arrived = self.advance_movement(dt, rules);

        if self.stance != Stance::Passive {
            outcome.target_dropped = self.validate_target(rules, &lookup);
        }

        outcome.retreated = self.check_retreat(rules, &lookup);
        outcome
    }

    fn tick_timers(&mut self, dt: f32) {
        self.attack_timer = (self.attack_timer - dt).max(0.0);
        self.anim_timer = (self.anim_timer - dt).max(0.0);
        if self.anim_timer <= 0.0 {
            self.attacking = false;
        }
        self.charge_timer = (self.charge_timer - dt).max(0.0);
        self.charge_cooldown = (self.charge_cooldown - dt).max(0.0);
    }

    fn refresh_buffs(&mut self, dt: f32) {
        for buff in &mut self.buffs {
            buff.remaining -= dt;
        }
        self.buffs.retain(|b| b.remaining > 0.0);
        self.recompute_stats();
    }

    fn advance_movement(&mut self, dt: f32, rules: &UnitRules) -> bool {
        let step = self.effective.speed * dt;

        if let Some(&waypoint) = self.path.front() {
            self.position = step_toward(self.position, waypoint, step);
            if self.position.distance(waypoint) <= rules.waypoint_radius {
                self.path.pop_front();
            }
            return false;
        }

        let Some(goal) = self.move_target else {
            return false;
        };
        if self.position.distance(goal) <= step.max(rules.arrival_snap) {
            self.position = goal;
            self.move_target = None;
            self.moving = false;
            return true;
        }
        self.position = step_toward(self.position, goal, step);
        false
    }

    fn validate_target(
        &mut self,
        rules: &UnitRules,
        lookup: &impl Fn(Entity) -> Option<TargetInfo>,
    ) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let leash = self.effective.attack_range * rules.target_leash_factor;
        let stale = match lookup(target) {
            Some(info) => !info.alive || self.position.distance(info.position) > leash,
            None => true,
        };
        if stale {
            self.target = None;
            self.attacking = false;
        }
        stale
    }

    fn check_retreat(
        &mut self,
        rules: &UnitRules,
        lookup: &impl Fn(Entity) -> Option<TargetInfo>,
    ) -> bool {
        let low = self.health_fraction() < rules.retreat_health_fraction;
        if !low {
            self.retreating = false;
            return false;
        }
        if self.retreating || self.stance == Stance::StandGround {
            return false;
        }

        let away = self.retreat_direction(lookup);
        let destination = self.position + away * rules.retreat_distance;
        self.move_to(destination);
        self.retreating = true;
        true
    }

    /// Away from the last destination while still short of it, otherwise
    /// away from the nearest living threat, otherwise toward the team's side
    /// of the map.
    fn retreat_direction(&self, lookup: &impl Fn(Entity) -> Option<TargetInfo>) -> Vec2 {
        if let Some(prior) = self.last_destination {
            let away = self.position - prior;
            if away.length_squared() > RETREAT_MIN_OFFSET * RETREAT_MIN_OFFSET {
                return away.normalize();
            }
        }

        let threat = [self.target, self.last_attacker, self.ordered_target]
            .into_iter()
            .flatten()
            .filter_map(lookup)
            .filter(|info| info.alive)
            .map(|info| info.position)
            .min_by(|a, b| {
                a.distance_squared(self.position)
                    .total_cmp(&b.distance_squared(self.position))
            });
        if let Some(away) = threat.and_then(|p| (self.position - p).try_normalize()) {
            return away;
        }

        match self.team {
            Team::Player => Vec2::NEG_ONE.normalize(),
            Team::Enemy => Vec2::ONE.normalize(),
        }
    }
}

fn step_toward(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance <= max_step || distance <= f32::EPSILON {
        to
    } else {
        from + delta / distance * max_step
    }
}
