//! Wave sizing, composition and spawn layout.

use glam::Vec2;
use siege_core::enums::UnitKind;

/// Enemy count for wave `wave`: `floor(base * scaling^wave)`.
pub fn wave_enemy_count(wave: u32, base: f64, scaling: f64) -> u32 {
    let exponent = i32::try_from(wave).unwrap_or(i32::MAX);
    let count = (base * scaling.powi(exponent)).floor();
    if count.is_finite() && count > 0.0 {
        count.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Unit kinds for a wave of `count` enemies. Soldiers, with every fourth
/// enemy an archer once `wave >= archer_from`.
pub fn wave_composition(wave: u32, count: u32, archer_from: u32) -> Vec<UnitKind> {
    (0..count)
        .map(|i| {
            if wave >= archer_from && i % 4 == 3 {
                UnitKind::Archer
            } else {
                UnitKind::Soldier
            }
        })
        .collect()
}

/// `count` points evenly spaced on a ring, starting at angle zero.
pub fn ring_positions(center: Vec2, radius: f32, count: u32) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }
    let step = std::f32::consts::TAU / count as f32;
    (0..count)
        .map(|i| {
            let angle = step * i as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}
