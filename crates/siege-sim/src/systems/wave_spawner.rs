//! Wave spawning system: alternates between an idle countdown and a wave in
//! progress, and pays out when a wave is wiped out.

use hecs::World;

use siege_core::config::SimConfig;
use siege_core::enums::Team;
use siege_core::events::SimEvent;
use siege_core::state::WaveView;
use siege_core::types::Resources;
use siege_core::unit::Unit;

use siege_enemy_ai::waves::{ring_positions, wave_composition, wave_enemy_count};

use crate::world_setup::spawn_unit;

/// Wave scheduler state.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveScheduler {
    /// Number of the latest wave spawned; 0 before the first.
    pub wave: u32,
    pub in_progress: bool,
    /// Seconds counted toward the next wave while idle.
    pub timer: f32,
    pub interval: f32,
}

impl WaveScheduler {
    pub fn new(interval: f32, first_wave_immediate: bool) -> Self {
        Self {
            wave: 0,
            in_progress: false,
            timer: if first_wave_immediate { interval } else { 0.0 },
            interval,
        }
    }

    /// `interval - timer` while idle, 0 during a wave.
    pub fn time_to_next_wave(&self) -> f32 {
        if self.in_progress {
            0.0
        } else {
            (self.interval - self.timer).max(0.0)
        }
    }

    pub fn view(&self, enemies_alive: u32) -> WaveView {
        WaveView {
            wave_number: self.wave,
            in_progress: self.in_progress,
            time_to_next_wave: self.time_to_next_wave(),
            enemies_alive,
        }
    }
}

pub fn enemies_alive(world: &World) -> u32 {
    world
        .query::<&Unit>()
        .iter()
        .filter(|(_, u)| u.is_alive() && u.team == Team::Enemy)
        .count() as u32
}

/// Advance the scheduler by `dt`.
pub fn run(
    world: &mut World,
    scheduler: &mut WaveScheduler,
    config: &SimConfig,
    dt: f32,
    resources: &mut Resources,
    events: &mut Vec<SimEvent>,
) {
    if scheduler.in_progress {
        if enemies_alive(world) > 0 {
            return;
        }
        let reward_gold = config.waves.reward_gold.saturating_mul(scheduler.wave);
        resources.grant(&Resources::new(reward_gold, 0, 0, 0));
        scheduler.in_progress = false;
        scheduler.timer = 0.0;
        events.push(SimEvent::WaveCleared {
            wave: scheduler.wave,
            reward_gold,
        });
        tracing::info!(wave = scheduler.wave, reward_gold, "wave cleared");
        return;
    }

    scheduler.timer += dt;
    if scheduler.timer >= scheduler.interval {
        spawn_wave(world, scheduler, config, events);
    }
}

fn spawn_wave(world: &mut World, scheduler: &mut WaveScheduler, config: &SimConfig, events: &mut Vec<SimEvent>) {
    scheduler.wave += 1;
    scheduler.in_progress = true;
    scheduler.timer = 0.0;

    let wave = scheduler.wave;
    let scaling = config.difficulty.modifiers().wave_scaling;
    let count = wave_enemy_count(wave, config.waves.base_count, scaling);
    let kinds = wave_composition(wave, count, config.waves.archer_from_wave);
    let positions = ring_positions(config.fortress.center, config.waves.spawn_radius, count);

    for (kind, position) in kinds.into_iter().zip(positions) {
        spawn_unit(world, config, kind, Team::Enemy, position);
    }

    events.push(SimEvent::WaveStarted { wave, count });
    tracing::info!(wave, count, "wave spawned");
}
