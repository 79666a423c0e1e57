#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::archetypes::{Archetype, ArchetypeTable};
    use crate::config::{ConfigError, SimConfig};
    use crate::enums::*;
    use crate::projectile::{Flight, Projectile};
    use crate::structures::{Gate, GateTower, ResourceNode};
    use crate::types::{Rect, Resources, SimTime};
    use crate::unit::{Buff, TargetInfo, Unit, UnitRules};

    fn spawn(kind: UnitKind, team: Team, position: Vec2) -> Unit {
        let table = ArchetypeTable::default();
        Unit::from_archetype(kind, team, table.get(kind), position, &UnitRules::default())
    }

    fn with_health(kind: UnitKind, health: f32) -> Unit {
        let table = ArchetypeTable::default();
        let archetype = Archetype {
            health,
            ..table.get(kind).clone()
        };
        Unit::from_archetype(kind, Team::Player, &archetype, Vec2::ZERO, &UnitRules::default())
    }

    fn no_target(_: hecs::Entity) -> Option<TargetInfo> {
        None
    }

    fn test_gate() -> Gate {
        Gate::new(
            GateSide::North,
            Rect::new(0.0, 0.0, 80.0, 40.0),
            1200.0,
            GateTower {
                range: 200.0,
                damage: 15.0,
                cooldown: 1.5,
                timer: 0.0,
                target: None,
            },
        )
    }

    // ---- Unit health invariants ----

    #[test]
    fn test_health_stays_in_bounds() {
        let mut unit = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        unit.set_health(10_000.0);
        assert_eq!(unit.health(), unit.max_health());
        unit.heal(50.0);
        assert_eq!(unit.health(), unit.max_health());

        for _ in 0..20 {
            unit.take_damage(37.0);
            assert!(unit.health() >= 0.0 && unit.health() <= unit.max_health());
            assert_eq!(unit.is_alive(), unit.health() > 0.0);
        }
        assert!(!unit.is_alive());
        assert_eq!(unit.health(), 0.0);
    }

    #[test]
    fn test_dead_unit_is_terminal() {
        let mut unit = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        unit.move_to(Vec2::new(500.0, 0.0));
        unit.set_health(0.0);
        assert!(!unit.is_alive());

        unit.heal(100.0);
        assert_eq!(unit.health(), 0.0, "Dead units cannot be healed");
        let before = unit.position;
        let update = unit.update(1.0, &UnitRules::default(), no_target);
        assert_eq!(unit.position, before, "Dead units do not move");
        assert!(!update.arrived);
        assert!(unit.take_damage(10.0) == Default::default());
    }

    // ---- Attack ----

    #[test]
    fn test_damage_floor_with_heavy_armor() {
        let rules = UnitRules::default();
        let mut attacker = spawn(UnitKind::Worker, Team::Player, Vec2::ZERO);
        let mut target = spawn(UnitKind::SiegeRam, Team::Enemy, Vec2::new(10.0, 0.0));
        target.base.armor = 50.0;
        target.recompute_stats();

        let before = target.health();
        let result = attacker.attack(&mut target, &rules).expect("attack should be permitted");
        assert_eq!(result.dealt, 1.0);
        assert_eq!(target.health(), before - 1.0);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let rules = UnitRules::default();
        let mut attacker = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        let mut target = spawn(UnitKind::Soldier, Team::Enemy, Vec2::new(10.0, 0.0));

        assert!(attacker.attack(&mut target, &rules).is_some());
        assert!(
            attacker.attack(&mut target, &rules).is_none(),
            "Second attack must wait for the cooldown"
        );
        attacker.update(1.0, &rules, no_target);
        assert!(attacker.attack(&mut target, &rules).is_some());
    }

    #[test]
    fn test_cooldown_clamps_at_zero() {
        let rules = UnitRules::default();
        let mut unit = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        unit.begin_attack();
        unit.update(5.0, &rules, no_target);
        assert_eq!(unit.attack_timer, 0.0);
        assert_eq!(unit.anim_timer, 0.0);
        assert!(!unit.attacking);
    }

    #[test]
    fn test_attack_on_dead_target_is_rejected() {
        let rules = UnitRules::default();
        let mut attacker = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        let mut target = spawn(UnitKind::Soldier, Team::Enemy, Vec2::new(10.0, 0.0));
        target.set_health(0.0);
        assert!(attacker.attack(&mut target, &rules).is_none());
        assert_eq!(attacker.attack_timer, 0.0, "No cooldown spent on a dead target");
    }

    // ---- Leveling ----

    #[test]
    fn test_kills_level_up_unit() {
        let rules = UnitRules::default();
        let mut unit = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        unit.take_damage(50.0);

        assert!(!unit.credit_kill(&rules));
        assert!(unit.credit_kill(&rules), "100 XP reaches the first threshold");

        assert_eq!(unit.leveling.level, 2);
        assert_eq!(unit.leveling.kills, 2);
        assert!((unit.max_health() - 120.0 * 1.12).abs() < 1e-3);
        assert_eq!(unit.health(), unit.max_health(), "Level-up fully heals");
        assert!((unit.base.damage - 15.0 * 1.12).abs() < 1e-3);
        assert!((unit.base.speed - 110.0 * 1.05).abs() < 1e-3);
        assert_eq!(unit.base.armor, 1.0);
        assert!((unit.leveling.next_threshold - 130.0).abs() < 1e-3);
    }

    #[test]
    fn test_level_cap() {
        let rules = UnitRules::default();
        let mut unit = spawn(UnitKind::Champion, Team::Player, Vec2::ZERO);
        unit.gain_experience(1_000_000.0, &rules);
        assert_eq!(unit.leveling.level, rules.max_level);
    }

    // ---- Buffs ----

    #[test]
    fn test_buffs_expire_without_drift() {
        let rules = UnitRules::default();
        let mut unit = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        let base_speed = unit.base.speed;

        unit.add_buff(Buff {
            name: "war drums".to_string(),
            remaining: 1.0,
            speed: 1.5,
            damage: 2.0,
            armor: 1.0,
        });
        assert!((unit.effective.speed - base_speed * 1.5).abs() < 1e-4);

        for _ in 0..10 {
            unit.update(0.05, &rules, no_target);
            assert!(
                (unit.effective.speed - base_speed * 1.5).abs() < 1e-4,
                "Buffed speed must not compound"
            );
        }
        unit.update(1.0, &rules, no_target);
        assert!(unit.buffs.is_empty());
        assert_eq!(unit.effective.speed, base_speed);
        assert_eq!(unit.effective.damage, unit.base.damage);
    }

    #[test]
    fn test_same_named_buff_refreshes() {
        let mut unit = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        let buff = Buff {
            name: "banner".to_string(),
            remaining: 1.0,
            speed: 1.2,
            damage: 1.0,
            armor: 1.0,
        };
        unit.add_buff(buff.clone());
        unit.add_buff(buff);
        assert_eq!(unit.buffs.len(), 1);
        assert!((unit.effective.speed - unit.base.speed * 1.2).abs() < 1e-4);
    }

    // ---- Movement ----

    #[test]
    fn test_direct_seek_snaps_on_arrival() {
        let rules = UnitRules::default();
        let mut unit = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        unit.move_to(Vec2::new(100.0, 0.0));

        let first = unit.update(0.5, &rules, no_target);
        assert!(!first.arrived);
        assert!((unit.position.x - 55.0).abs() < 1e-3);

        let second = unit.update(0.5, &rules, no_target);
        assert!(second.arrived);
        assert_eq!(unit.position, Vec2::new(100.0, 0.0));
        assert!(!unit.moving);
    }

    #[test]
    fn test_path_waypoints_consumed_in_order() {
        let rules = UnitRules::default();
        let mut unit = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        unit.set_path(
            vec![Vec2::new(50.0, 0.0), Vec2::new(50.0, 50.0)],
            Vec2::new(50.0, 50.0),
        );
        assert_eq!(unit.path.len(), 2);

        let mut arrived = false;
        for _ in 0..100 {
            if unit.update(0.05, &rules, no_target).arrived {
                arrived = true;
                break;
            }
            assert!(unit.position.x <= 50.0 + 1e-3);
        }
        assert!(arrived);
        assert!(unit.path.is_empty());
        assert_eq!(unit.position, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_stop_holds_current_position() {
        let rules = UnitRules::default();
        let mut unit = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        unit.set_path(vec![Vec2::new(300.0, 0.0)], Vec2::new(300.0, 0.0));
        unit.update(0.5, &rules, no_target);
        let here = unit.position;

        unit.stop();
        assert!(unit.path.is_empty());
        assert_eq!(unit.move_target, Some(here));
        unit.update(0.5, &rules, no_target);
        assert_eq!(unit.position, here);
    }

    // ---- Targets ----

    #[test]
    fn test_stale_target_cleared() {
        let rules = UnitRules::default();
        let mut world = hecs::World::new();
        let enemy = world.spawn(());

        let mut unit = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        unit.target = Some(enemy);

        // In leash range (1.5 x 40 = 60): kept.
        let near = |_| {
            Some(TargetInfo {
                position: Vec2::new(55.0, 0.0),
                alive: true,
            })
        };
        assert!(!unit.update(0.1, &rules, near).target_dropped);
        assert_eq!(unit.target, Some(enemy));

        let far = |_| {
            Some(TargetInfo {
                position: Vec2::new(65.0, 0.0),
                alive: true,
            })
        };
        assert!(unit.update(0.1, &rules, far).target_dropped);
        assert_eq!(unit.target, None);

        unit.target = Some(enemy);
        let dead = |_| {
            Some(TargetInfo {
                position: Vec2::new(10.0, 0.0),
                alive: false,
            })
        };
        assert!(unit.update(0.1, &rules, dead).target_dropped);
        assert_eq!(unit.target, None);
    }

    #[test]
    fn test_passive_unit_keeps_target_slot_untouched() {
        let rules = UnitRules::default();
        let mut world = hecs::World::new();
        let enemy = world.spawn(());
        let mut unit = spawn(UnitKind::Worker, Team::Player, Vec2::ZERO);
        assert_eq!(unit.stance, Stance::Passive);
        unit.target = Some(enemy);
        let update = unit.update(0.1, &rules, no_target);
        assert!(!update.target_dropped);
        assert_eq!(unit.target, Some(enemy));
    }

    // ---- Retreat ----

    #[test]
    fn test_retreat_triggers_below_twenty_percent() {
        let rules = UnitRules::default();
        let mut unit = with_health(UnitKind::Soldier, 100.0);
        assert_eq!(unit.stance, Stance::Aggressive);
        unit.position = Vec2::new(500.0, 500.0);
        unit.move_to(Vec2::new(600.0, 500.0));
        unit.set_health(21.0);

        assert!(!unit.update(0.0, &rules, no_target).retreated);
        assert!(!unit.retreating);

        unit.take_damage(2.0);
        assert_eq!(unit.health(), 19.0);
        let update = unit.update(0.0, &rules, no_target);
        assert!(update.retreated);
        assert!(unit.retreating);

        let destination = unit.move_target.expect("retreat issues a move order");
        assert!(
            destination.x < 500.0,
            "Retreat must lead away from the prior target, got {destination:?}"
        );
        assert!((destination.distance(Vec2::new(500.0, 500.0)) - 200.0).abs() < 1e-3);

        assert!(
            !unit.update(0.0, &rules, no_target).retreated,
            "Retreat fires once per crossing"
        );
    }

    #[test]
    fn test_retreat_at_rest_moves_away_from_attacker() {
        let rules = UnitRules::default();
        let mut world = hecs::World::new();
        let attacker = world.spawn(());
        let mut unit = with_health(UnitKind::Soldier, 100.0);
        unit.position = Vec2::new(500.0, 500.0);
        unit.move_to(Vec2::new(500.0, 500.0));
        unit.update(0.1, &rules, no_target);
        assert!(!unit.moving);

        unit.last_attacker = Some(attacker);
        unit.set_health(10.0);
        let lookup = |e: hecs::Entity| {
            (e == attacker).then_some(TargetInfo {
                position: Vec2::new(540.0, 500.0),
                alive: true,
            })
        };
        assert!(unit.update(0.0, &rules, lookup).retreated);
        let destination = unit.move_target.expect("retreat issues a move order");
        assert!((destination - Vec2::new(300.0, 500.0)).length() < 1e-3);
    }

    #[test]
    fn test_retreat_at_rest_without_threat_uses_home_side() {
        let rules = UnitRules::default();
        let mut unit = with_health(UnitKind::Soldier, 100.0);
        unit.position = Vec2::new(900.0, 800.0);
        unit.set_health(10.0);
        assert!(unit.last_destination.is_none());

        assert!(unit.update(0.0, &rules, no_target).retreated);
        let destination = unit.move_target.expect("retreat issues a move order");
        assert!((destination.distance(unit.position) - 200.0).abs() < 1e-3);
        assert!(destination.x < 900.0 && destination.y < 800.0);

        let mut defender = spawn(UnitKind::Soldier, Team::Enemy, Vec2::new(1500.0, 1250.0));
        defender.set_health(1.0);
        assert!(defender.update(0.0, &rules, no_target).retreated);
        let destination = defender.move_target.expect("retreat issues a move order");
        assert!(destination.x > 1500.0 && destination.y > 1250.0);
    }

    #[test]
    fn test_stand_ground_never_retreats() {
        let rules = UnitRules::default();
        let mut unit = with_health(UnitKind::Soldier, 100.0);
        unit.stance = Stance::StandGround;
        unit.move_to(Vec2::new(100.0, 0.0));
        unit.set_health(5.0);
        assert!(!unit.update(0.0, &rules, no_target).retreated);
        assert!(!unit.retreating);
    }

    // ---- Type traits ----

    #[test]
    fn test_cavalry_charges_on_long_moves() {
        let mut short = spawn(UnitKind::Cavalry, Team::Player, Vec2::ZERO);
        short.move_to(Vec2::new(100.0, 0.0));
        assert!(!short.is_charging());

        let mut long = spawn(UnitKind::Cavalry, Team::Player, Vec2::ZERO);
        long.move_to(Vec2::new(400.0, 0.0));
        assert!(long.is_charging());
        assert!((long.effective.speed - 180.0 * 1.8).abs() < 1e-3);

        let damage = long.begin_attack().expect("fresh unit can attack");
        let charged = 25.0 * 1.3;
        assert!((damage - charged * 1.5).abs() < 1e-3, "Charge adds a bonus hit");
    }

    #[test]
    fn test_elephant_charge_cooldown() {
        let rules = UnitRules::default();
        let mut elephant = spawn(UnitKind::SiegeElephant, Team::Player, Vec2::ZERO);
        assert_eq!(elephant.gate_damage(), 50.0);

        assert!(elephant.activate_charge());
        assert!(!elephant.activate_charge(), "Already charging");
        assert_eq!(elephant.gate_damage(), 250.0);

        elephant.update(2.5, &rules, no_target);
        assert!(!elephant.is_charging());
        assert!(!elephant.activate_charge(), "Still cooling down");

        elephant.update(8.0, &rules, no_target);
        assert!(elephant.activate_charge());

        let mut soldier = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        assert!(!soldier.activate_charge());
    }

    #[test]
    fn test_ram_gate_damage_follows_crew() {
        let mut ram = spawn(UnitKind::SiegeRam, Team::Player, Vec2::ZERO);
        assert_eq!(ram.crew(), Some(3));
        assert_eq!(ram.gate_damage(), 300.0);

        ram.set_health(ram.max_health() * 0.6);
        assert_eq!(ram.crew(), Some(2));
        assert!((ram.gate_damage() - 200.0).abs() < 1e-3);

        ram.set_health(ram.max_health() * 0.3);
        assert_eq!(ram.crew(), Some(1));
        assert!((ram.gate_damage() - 100.0).abs() < 1e-3);

        let soldier = spawn(UnitKind::Soldier, Team::Player, Vec2::ZERO);
        assert_eq!(soldier.gate_damage(), soldier.effective.damage);
    }

    #[test]
    fn test_champion_variants() {
        let commander = spawn(UnitKind::Champion, Team::Player, Vec2::ZERO)
            .with_variant(ChampionVariant::Commander);
        assert!((commander.effective.damage - 35.0 * 1.2).abs() < 1e-3);

        let shield = spawn(UnitKind::Champion, Team::Player, Vec2::ZERO)
            .with_variant(ChampionVariant::Shieldbearer);
        assert!((shield.max_health() - 375.0).abs() < 1e-3);
        assert_eq!(shield.health(), shield.max_health());
        assert!((shield.effective.speed - 130.0 * 0.8).abs() < 1e-3);
    }

    #[test]
    fn test_difficulty_scaling_applied_once() {
        let hard = Difficulty::Hard.modifiers();
        let enemy = spawn(UnitKind::Soldier, Team::Enemy, Vec2::ZERO)
            .scaled(hard.enemy_health, hard.enemy_damage);
        assert!((enemy.max_health() - 144.0).abs() < 1e-3);
        assert!((enemy.effective.damage - 19.5).abs() < 1e-3);
    }

    // ---- Structures ----

    #[test]
    fn test_gate_destroyed_at_zero() {
        let mut gate = test_gate();
        assert!(!gate.take_damage(1199.0));
        assert!(gate.take_damage(5.0));
        assert!(gate.is_destroyed());
        assert_eq!(gate.health(), 0.0);
        assert!(!gate.take_damage(100.0), "Destroyed gates take no damage");
    }

    #[test]
    fn test_gate_sync_flags_zero_health() {
        let mut gate = test_gate();
        gate.set_health(0.0);
        assert!(!gate.is_destroyed());
        assert!(gate.sync_destroyed());
        assert!(gate.is_destroyed());
        assert!(!gate.sync_destroyed(), "Transition reported once");
    }

    #[test]
    fn test_gate_range_uses_surface() {
        let gate = test_gate();
        assert!(gate.in_range(Vec2::new(40.0, 60.0), 25.0));
        assert!(!gate.in_range(Vec2::new(40.0, 70.0), 25.0));
    }

    #[test]
    fn test_tower_reload() {
        let mut gate = test_gate();
        assert_eq!(gate.tower.fire(), Some(15.0));
        assert_eq!(gate.tower.fire(), None);
        gate.tower.tick(2.0);
        assert_eq!(gate.tower.timer, 0.0);
        assert_eq!(gate.tower.fire(), Some(15.0));
    }

    #[test]
    fn test_resource_node_depletes_permanently() {
        let mut node = ResourceNode::new(ResourceKind::Stone, Vec2::ZERO, 30.0, 25);
        assert_eq!(node.withdraw(10), 10);
        assert_eq!(node.withdraw(10), 10);
        assert_eq!(node.withdraw(10), 5);
        assert!(node.is_depleted());
        assert_eq!(node.withdraw(10), 0);
    }

    #[test]
    fn test_projectile_hits_or_expires() {
        let mut world = hecs::World::new();
        let target = world.spawn(());
        let mut projectile = Projectile {
            position: Vec2::ZERO,
            target,
            speed: 400.0,
            damage: 15.0,
            hit_radius: 5.0,
            team: Team::Enemy,
            shooter: None,
            active: true,
        };
        let goal = Some(Vec2::new(100.0, 0.0));
        assert_eq!(projectile.advance(0.1, goal), Flight::InFlight);
        assert!((projectile.position.x - 40.0).abs() < 1e-3);
        assert_eq!(
            projectile.advance(0.2, goal),
            Flight::Hit {
                target,
                damage: 15.0
            }
        );
        assert!(!projectile.active);

        let mut orphan = Projectile {
            active: true,
            position: Vec2::ZERO,
            ..projectile
        };
        assert_eq!(orphan.advance(0.1, None), Flight::Expired);
    }

    // ---- Economy ----

    #[test]
    fn test_spend_when_affordable() {
        let mut stock = Resources::new(1000, 300, 200, 500);
        assert!(stock.spend(&Resources::new(100, 30, 0, 50)));
        assert_eq!(stock.gold, 900);
        assert_eq!(stock, Resources::new(900, 270, 200, 450));
    }

    #[test]
    fn test_unaffordable_spend_is_atomic() {
        let mut stock = Resources::new(1000, 300, 0, 500);
        let before = stock;
        assert!(!stock.can_afford(&Resources::new(0, 0, 50, 0)));
        assert!(!stock.spend(&Resources::new(10, 10, 50, 10)));
        assert_eq!(stock, before);
    }

    #[test]
    fn test_resource_scaling() {
        let start = Resources::new(1000, 300, 200, 500);
        assert_eq!(start.scaled(1.5), Resources::new(1500, 450, 300, 750));
        assert_eq!(start.scaled(0.7), Resources::new(700, 210, 140, 350));
    }

    // ---- Geometry & time ----

    #[test]
    fn test_rect_queries() {
        let rect = Rect::centered(Vec2::new(100.0, 100.0), 40.0, 20.0);
        assert_eq!(rect.center(), Vec2::new(100.0, 100.0));
        assert!(rect.contains(Vec2::new(119.0, 109.0)));
        assert!(!rect.contains(Vec2::new(121.0, 100.0)));
        assert_eq!(rect.distance_to(Vec2::new(100.0, 100.0)), 0.0);
        assert!((rect.distance_to(Vec2::new(130.0, 100.0)) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(0.5);
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 30.0).abs() < 1e-9);
    }

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = SimConfig::from_json("{}").expect("empty config is valid");
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_config_json_round_trip() {
        let mut config = SimConfig::default();
        config.seed = 7;
        config.difficulty = Difficulty::Hard;
        let json = serde_json::to_string(&config).unwrap();
        let back = SimConfig::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_partial_override() {
        let config =
            SimConfig::from_json(r#"{ "difficulty": "Easy", "waves": { "interval": 30.0 } }"#)
                .unwrap();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.waves.interval, 30.0);
        assert_eq!(config.waves.spawn_radius, SimConfig::default().waves.spawn_radius);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let err = SimConfig::from_json(r#"{ "map": { "cell_size": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "map.cell_size", .. }));

        let err = SimConfig::from_json(r#"{ "map": { "cell_size": 1.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::GridTooLarge { .. }));

        let err = SimConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let mut config = SimConfig::default();
        config.archetypes.archer.stats.attack_cooldown = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Archetype {
                kind: UnitKind::Archer,
                ..
            })
        ));

        let mut config = SimConfig::default();
        config.combat.ai_interval = -0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "combat.ai_interval",
                ..
            })
        ));

        let mut config = SimConfig::default();
        config.fortress.center = Vec2::new(100.0, 100.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FortressOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_enum_serde() {
        for kind in UnitKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            let back: UnitKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, back);
        }
        for stance in [
            Stance::Aggressive,
            Stance::Defensive,
            Stance::StandGround,
            Stance::Passive,
        ] {
            let json = serde_json::to_string(&stance).unwrap();
            let back: Stance = serde_json::from_str(&json).unwrap();
            assert_eq!(stance, back);
        }
    }
}
