#[cfg(test)]
mod tests {
    use glam::Vec2;
    use siege_core::enums::UnitKind;

    use crate::behavior::{evaluate, find_nearest, EnemyContext, EnemyDecision};
    use crate::profiles::{get_profile, AiTuning};
    use crate::waves::{ring_positions, wave_composition, wave_enemy_count};

    /// Enemy at the origin with a player `player_distance` away along +x and
    /// a gate `gate_distance` away along +y.
    fn make_context(
        kind: UnitKind,
        attack_range: f32,
        player_distance: Option<f32>,
        gate_distance: Option<f32>,
    ) -> EnemyContext {
        EnemyContext {
            kind,
            position: Vec2::ZERO,
            attack_range,
            nearest_player: player_distance.map(|d| Vec2::new(d, 0.0)),
            nearest_gate: gate_distance.map(|d| Vec2::new(0.0, d)),
        }
    }

    #[test]
    fn test_chases_player_in_engage_range() {
        let ctx = make_context(UnitKind::Soldier, 40.0, Some(150.0), Some(500.0));
        let decision = evaluate(&ctx, &AiTuning::default());
        assert_eq!(decision, EnemyDecision::Chase(Vec2::new(150.0, 0.0)));
    }

    #[test]
    fn test_holds_when_player_in_attack_range() {
        let ctx = make_context(UnitKind::Soldier, 40.0, Some(30.0), Some(500.0));
        assert_eq!(evaluate(&ctx, &AiTuning::default()), EnemyDecision::Hold);
    }

    #[test]
    fn test_returns_to_gate_when_player_far() {
        let ctx = make_context(UnitKind::Soldier, 40.0, Some(900.0), Some(450.0));
        let decision = evaluate(&ctx, &AiTuning::default());
        assert_eq!(decision, EnemyDecision::Guard(Vec2::new(0.0, 450.0)));
        assert_eq!(decision.destination(), Some(Vec2::new(0.0, 450.0)));
    }

    #[test]
    fn test_stays_put_inside_guard_radius() {
        let ctx = make_context(UnitKind::Soldier, 40.0, Some(900.0), Some(250.0));
        assert_eq!(evaluate(&ctx, &AiTuning::default()), EnemyDecision::Hold);
    }

    #[test]
    fn test_no_gates_left_holds() {
        let ctx = make_context(UnitKind::Soldier, 40.0, Some(900.0), None);
        assert_eq!(evaluate(&ctx, &AiTuning::default()), EnemyDecision::Hold);
    }

    #[test]
    fn test_no_players_holds() {
        let ctx = make_context(UnitKind::Soldier, 40.0, None, Some(2000.0));
        let decision = evaluate(&ctx, &AiTuning::default());
        assert_eq!(decision, EnemyDecision::Hold);
        assert_eq!(decision.destination(), None);
    }

    #[test]
    fn test_archer_engages_from_farther_and_stops_short() {
        let tuning = AiTuning::default();
        // 220 is outside the soldier engage range but inside the archer's.
        let soldier = make_context(UnitKind::Soldier, 40.0, Some(220.0), Some(100.0));
        let archer = make_context(UnitKind::Archer, 150.0, Some(220.0), Some(100.0));
        assert_eq!(evaluate(&soldier, &tuning), EnemyDecision::Hold);
        assert_eq!(
            evaluate(&archer, &tuning),
            EnemyDecision::Chase(Vec2::new(220.0, 0.0))
        );

        let in_range = make_context(UnitKind::Archer, 150.0, Some(130.0), None);
        assert_eq!(evaluate(&in_range, &tuning), EnemyDecision::Hold);
    }

    #[test]
    fn test_profiles_scale_with_tuning() {
        let tuning = AiTuning {
            engage_range: 100.0,
            guard_radius: 400.0,
        };
        let soldier = get_profile(UnitKind::Soldier, &tuning);
        assert_eq!(soldier.engage_range, 100.0);
        assert_eq!(soldier.guard_radius, 400.0);

        let ram = get_profile(UnitKind::SiegeRam, &tuning);
        assert!(ram.engage_range < soldier.engage_range);
        assert!(ram.guard_radius < soldier.guard_radius);

        let cavalry = get_profile(UnitKind::Cavalry, &tuning);
        assert!(cavalry.engage_range > soldier.engage_range);
    }

    #[test]
    fn test_find_nearest_prefers_first_on_tie() {
        let candidates = vec![
            ("a", Vec2::new(10.0, 0.0)),
            ("b", Vec2::new(0.0, 10.0)),
            ("c", Vec2::new(3.0, 4.0)),
        ];
        let (name, position, distance) =
            find_nearest(Vec2::ZERO, candidates).expect("non-empty");
        assert_eq!(name, "c");
        assert_eq!(position, Vec2::new(3.0, 4.0));
        assert_eq!(distance, 5.0);

        let tied = vec![(1, Vec2::new(5.0, 0.0)), (2, Vec2::new(-5.0, 0.0))];
        assert_eq!(find_nearest(Vec2::ZERO, tied).map(|(id, _, _)| id), Some(1));

        let empty: Vec<(u8, Vec2)> = Vec::new();
        assert!(find_nearest(Vec2::ZERO, empty).is_none());
    }

    #[test]
    fn test_wave_count_scaling() {
        assert_eq!(wave_enemy_count(1, 5.0, 1.3), 6);
        assert_eq!(wave_enemy_count(2, 5.0, 1.3), 8);
        assert_eq!(wave_enemy_count(3, 5.0, 1.3), 10);
        assert_eq!(wave_enemy_count(3, 5.0, 1.5), 16);
        assert_eq!(wave_enemy_count(0, 5.0, 1.3), 5);
    }

    #[test]
    fn test_wave_count_is_monotonic() {
        let mut previous = 0;
        for wave in 1..30 {
            let count = wave_enemy_count(wave, 5.0, 1.3);
            assert!(count >= previous, "wave {wave} shrank");
            previous = count;
        }
    }

    #[test]
    fn test_composition_adds_archers_late() {
        let early = wave_composition(2, 8, 3);
        assert!(early.iter().all(|k| *k == UnitKind::Soldier));

        let late = wave_composition(3, 10, 3);
        assert_eq!(late.len(), 10);
        let archers = late.iter().filter(|k| **k == UnitKind::Archer).count();
        assert_eq!(archers, 2);
        assert_eq!(late[3], UnitKind::Archer);
        assert_eq!(late[7], UnitKind::Archer);
    }

    #[test]
    fn test_ring_positions_evenly_spaced() {
        let center = Vec2::new(1500.0, 1250.0);
        let points = ring_positions(center, 200.0, 4);
        assert_eq!(points.len(), 4);
        for p in &points {
            assert!((p.distance(center) - 200.0).abs() < 1e-3);
        }
        assert!((points[0] - Vec2::new(1700.0, 1250.0)).length() < 1e-3);
        assert!((points[1] - Vec2::new(1500.0, 1450.0)).length() < 1e-3);
        assert!(ring_positions(center, 200.0, 0).is_empty());
    }
}
