//! Combat resolver: unit-vs-gate, unit-vs-unit, gate towers and projectile
//! flight, followed by the victory/defeat predicates.
//!
//! Attack intents are collected from a read-only pass, then applied one at
//! a time with every handle re-validated, so a unit killed earlier in the
//! pass neither strikes nor is struck again.

use std::collections::HashMap;

use glam::Vec2;
use hecs::{Entity, World};

use siege_core::config::SimConfig;
use siege_core::enums::{GamePhase, Stance, Team};
use siege_core::events::SimEvent;
use siege_core::projectile::{Flight, Projectile};
use siege_core::structures::Gate;
use siege_core::unit::{TargetInfo, Unit, UnitRules};
use siege_pathfinding::Pathfinder;

use siege_enemy_ai::behavior::find_nearest;

use crate::systems::units::unit_lookup;
use crate::world_setup::rasterize;

#[derive(Debug, Clone, Copy)]
enum Intent {
    StrikeGate { attacker: Entity, gate: Entity },
    Strike { attacker: Entity, target: Entity },
    Shoot { attacker: Entity, target: Entity },
}

/// Snapshot of one unit taken at the start of the combat pass.
#[derive(Debug, Clone, Copy)]
struct Combatant {
    entity: Entity,
    team: Team,
    position: Vec2,
}

pub fn run(
    world: &mut World,
    pathfinder: &mut Pathfinder,
    dt: f32,
    config: &SimConfig,
    events: &mut Vec<SimEvent>,
) {
    // A gate zeroed elsewhere still has to fall this tick.
    let mut fallen: Vec<Entity> = Vec::new();
    for (entity, gate) in world.query_mut::<&mut Gate>() {
        if gate.sync_destroyed() {
            fallen.push(entity);
        }
    }
    for gate in fallen {
        on_gate_destroyed(world, pathfinder, gate, events);
    }

    let intents = collect_intents(world);
    let mut target_updates: Vec<(Entity, Entity)> = Vec::new();
    for intent in intents {
        match intent {
            Intent::StrikeGate { attacker, gate } => {
                strike_gate(world, pathfinder, attacker, gate, events);
            }
            Intent::Strike { attacker, target } => {
                target_updates.push((attacker, target));
                strike(world, attacker, target, &config.units, events);
            }
            Intent::Shoot { attacker, target } => {
                target_updates.push((attacker, target));
                shoot(world, attacker, target, config);
            }
        }
    }
    for (attacker, target) in target_updates {
        if let Ok(mut unit) = world.get::<&mut Unit>(attacker) {
            if unit.is_alive() {
                unit.target = Some(target);
            }
        }
    }

    fire_towers(world, dt, config);
    advance_projectiles(world, dt, &config.units, events);
}

/// Victory once every gate has fallen, defeat once no player unit lives.
pub fn check_outcome(world: &World) -> Option<GamePhase> {
    let mut gates = 0;
    let mut standing = 0;
    for (_, gate) in world.query::<&Gate>().iter() {
        gates += 1;
        if !gate.is_destroyed() {
            standing += 1;
        }
    }
    if gates > 0 && standing == 0 {
        return Some(GamePhase::Victory);
    }

    let players_alive = world
        .query::<&Unit>()
        .iter()
        .any(|(_, u)| u.is_alive() && u.team == Team::Player);
    if !players_alive {
        return Some(GamePhase::Defeat);
    }
    None
}

fn collect_intents(world: &World) -> Vec<Intent> {
    let lookup = unit_lookup(world);
    let combatants: Vec<Combatant> = world
        .query::<&Unit>()
        .iter()
        .filter(|(_, u)| u.is_alive())
        .map(|(entity, u)| Combatant {
            entity,
            team: u.team,
            position: u.position,
        })
        .collect();
    let gates: Vec<(Entity, Gate)> = world
        .query::<&Gate>()
        .iter()
        .filter(|(_, g)| !g.is_destroyed())
        .map(|(entity, g)| (entity, g.clone()))
        .collect();

    let mut intents = Vec::new();
    let mut query = world.query::<&Unit>();
    for (entity, unit) in query.iter() {
        if !unit.is_alive() || !unit.can_attack() || unit.stance == Stance::Passive {
            continue;
        }

        if unit.team == Team::Player {
            if let Some(gate) = gate_in_reach(unit, &gates) {
                intents.push(Intent::StrikeGate {
                    attacker: entity,
                    gate,
                });
                continue;
            }
        }

        let Some((target, position)) = choose_target(entity, unit, &lookup, &combatants) else {
            continue;
        };
        if unit.position.distance(position) > unit.effective.attack_range {
            continue;
        }
        intents.push(if unit.traits.ranged {
            Intent::Shoot {
                attacker: entity,
                target,
            }
        } else {
            Intent::Strike {
                attacker: entity,
                target,
            }
        });
    }
    intents
}

/// A standing gate within attack range. Defensive units only hit the gate
/// they were ordered against.
fn gate_in_reach(unit: &Unit, gates: &[(Entity, Gate)]) -> Option<Entity> {
    let range = unit.effective.attack_range;
    let in_reach = gates
        .iter()
        .filter(|(_, gate)| gate.in_range(unit.position, range))
        .map(|(entity, gate)| (*entity, gate.center()));
    match unit.stance {
        Stance::Defensive => {
            let ordered = unit.target_gate?;
            in_reach.map(|(e, _)| e).find(|&e| e == ordered)
        }
        _ => find_nearest(unit.position, in_reach).map(|(e, _, _)| e),
    }
}

/// Target preference: the ordered target, then a still-valid current
/// target, then the nearest opponent. Defensive units only consider the
/// ordered target and whoever last hit them.
fn choose_target(
    entity: Entity,
    unit: &Unit,
    lookup: &HashMap<Entity, TargetInfo>,
    combatants: &[Combatant],
) -> Option<(Entity, Vec2)> {
    let living = |handle: Option<Entity>| {
        let handle = handle?;
        let info = lookup.get(&handle)?;
        (info.alive && handle != entity).then_some((handle, info.position))
    };

    if let Some(found) = living(unit.ordered_target) {
        return Some(found);
    }
    if unit.stance == Stance::Defensive {
        return living(unit.last_attacker);
    }
    if let Some(found) = living(unit.target) {
        return Some(found);
    }

    let opponent = unit.team.opponent();
    find_nearest(
        unit.position,
        combatants
            .iter()
            .filter(|c| c.team == opponent)
            .map(|c| (c.entity, c.position)),
    )
    .map(|(e, p, _)| (e, p))
}

fn strike_gate(
    world: &mut World,
    pathfinder: &mut Pathfinder,
    attacker: Entity,
    gate: Entity,
    events: &mut Vec<SimEvent>,
) {
    let damage = {
        let Ok(mut unit) = world.get::<&mut Unit>(attacker) else {
            return;
        };
        let damage = unit.gate_damage();
        if unit.begin_attack().is_none() {
            return;
        }
        damage
    };

    let destroyed = match world.get::<&mut Gate>(gate) {
        Ok(mut g) => g.take_damage(damage),
        Err(_) => false,
    };
    if destroyed {
        on_gate_destroyed(world, pathfinder, gate, events);
    }
}

fn strike(world: &mut World, attacker: Entity, target: Entity, rules: &UnitRules, events: &mut Vec<SimEvent>) {
    let target_alive = world.get::<&Unit>(target).map(|u| u.is_alive()).unwrap_or(false);
    if !target_alive {
        return;
    }
    let damage = match world.get::<&mut Unit>(attacker) {
        Ok(mut unit) => match unit.begin_attack() {
            Some(damage) => damage,
            None => return,
        },
        Err(_) => return,
    };
    apply_hit(world, Some(attacker), target, damage, rules, events);
}

fn shoot(world: &mut World, attacker: Entity, target: Entity, config: &SimConfig) {
    let target_alive = world.get::<&Unit>(target).map(|u| u.is_alive()).unwrap_or(false);
    if !target_alive {
        return;
    }
    let (position, team, damage) = match world.get::<&mut Unit>(attacker) {
        Ok(mut unit) => match unit.begin_attack() {
            Some(damage) => (unit.position, unit.team, damage),
            None => return,
        },
        Err(_) => return,
    };
    world.spawn((Projectile {
        position,
        target,
        speed: config.combat.projectile_speed,
        damage,
        hit_radius: config.combat.projectile_hit_radius,
        team,
        shooter: Some(attacker),
        active: true,
    },));
}

/// Damage `target`, record the attacker, and credit the kill.
fn apply_hit(
    world: &mut World,
    attacker: Option<Entity>,
    target: Entity,
    damage: f32,
    rules: &UnitRules,
    events: &mut Vec<SimEvent>,
) {
    let (result, team) = {
        let Ok(mut victim) = world.get::<&mut Unit>(target) else {
            return;
        };
        let result = victim.take_damage(damage);
        if attacker.is_some() {
            victim.last_attacker = attacker;
        }
        (result, victim.team)
    };
    if !result.killed {
        return;
    }

    events.push(SimEvent::UnitKilled {
        unit: target.to_bits().get(),
        team,
        killer: attacker.map(|a| a.to_bits().get()),
    });
    tracing::debug!(unit = target.to_bits().get(), ?team, "unit killed");

    let Some(attacker) = attacker else {
        return;
    };
    if let Ok(mut killer) = world.get::<&mut Unit>(attacker) {
        if killer.credit_kill(rules) {
            let level = killer.leveling.level;
            events.push(SimEvent::LevelUp {
                unit: attacker.to_bits().get(),
                level,
            });
            tracing::info!(unit = attacker.to_bits().get(), level, "unit leveled up");
        }
    }
}

fn on_gate_destroyed(world: &mut World, pathfinder: &mut Pathfinder, gate: Entity, events: &mut Vec<SimEvent>) {
    let Ok(g) = world.get::<&Gate>(gate) else {
        return;
    };
    let cleared = rasterize(pathfinder.grid_mut(), &g.bounds, false);
    events.push(SimEvent::GateDestroyed { side: g.side });
    tracing::info!(side = ?g.side, cleared, "gate destroyed");
}

/// Towers re-validate their target, pick the nearest player unit in range
/// when it is gone, and fire on reload.
fn fire_towers(world: &mut World, dt: f32, config: &SimConfig) {
    let lookup = unit_lookup(world);
    let attackers: Vec<(Entity, Vec2)> = world
        .query::<&Unit>()
        .iter()
        .filter(|(_, u)| u.is_alive() && u.team == Team::Player)
        .map(|(entity, u)| (entity, u.position))
        .collect();

    let mut shots: Vec<(Vec2, Entity, f32)> = Vec::new();
    for (_, gate) in world.query_mut::<&mut Gate>() {
        if gate.is_destroyed() {
            continue;
        }
        gate.tower.tick(dt);

        let range = gate.tower.range;
        let bounds = gate.bounds;
        let valid = gate.tower.target.and_then(|t| lookup.get(&t)).is_some_and(|info| {
            info.alive && bounds.distance_to(info.position) <= range
        });
        if !valid {
            let center = gate.center();
            gate.tower.target = find_nearest(
                center,
                attackers
                    .iter()
                    .copied()
                    .filter(|(_, p)| bounds.distance_to(*p) <= range),
            )
            .map(|(e, _, _)| e);
        }

        if let Some(target) = gate.tower.target {
            if let Some(damage) = gate.tower.fire() {
                shots.push((gate.center(), target, damage));
            }
        }
    }

    for (position, target, damage) in shots {
        world.spawn((Projectile {
            position,
            target,
            speed: config.combat.projectile_speed,
            damage,
            hit_radius: config.combat.projectile_hit_radius,
            team: Team::Enemy,
            shooter: None,
            active: true,
        },));
    }
}

fn advance_projectiles(world: &mut World, dt: f32, rules: &UnitRules, events: &mut Vec<SimEvent>) {
    let lookup = unit_lookup(world);
    let mut hits: Vec<(Option<Entity>, Entity, f32)> = Vec::new();

    for (_, projectile) in world.query_mut::<&mut Projectile>() {
        let target_position = lookup
            .get(&projectile.target)
            .filter(|info| info.alive)
            .map(|info| info.position);
        if let Flight::Hit { target, damage } = projectile.advance(dt, target_position) {
            hits.push((projectile.shooter, target, damage));
        }
    }

    for (shooter, target, damage) in hits {
        apply_hit(world, shooter, target, damage, rules, events);
    }
}
