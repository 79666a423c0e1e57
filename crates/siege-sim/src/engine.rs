//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the pathfinding grid, the
//! economy and the wave scheduler, processes player commands, runs all
//! systems and produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing: the seeded RNG is consumed only by world setup.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use siege_core::commands::{CommandError, PlayerCommand};
use siege_core::config::{ConfigError, SimConfig};
use siege_core::constants::NOTIFICATION_LIFETIME;
use siege_core::enums::{GamePhase, NoticeLevel, Team, UnitKind};
use siege_core::events::{Notification, SimEvent};
use siege_core::state::{GameStateSnapshot, PopulationView};
use siege_core::types::{Resources, SimTime};
use siege_core::unit::Unit;
use siege_pathfinding::{Grid, Pathfinder};

use crate::systems;
use crate::systems::snapshot::SnapshotInputs;
use crate::systems::training::TrainingQueue;
use crate::systems::wave_spawner::WaveScheduler;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    pathfinder: Pathfinder,
    time: SimTime,
    phase: GamePhase,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    notifications: Vec<Notification>,

    resources: Resources,
    gather_timer: f32,
    ai_timer: f32,
    waves: WaveScheduler,
    training: TrainingQueue,
    spawn_point: Vec2,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. The world is
    /// populated immediately and the game starts in the Active phase.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new();
        let mut grid = Grid::new(config.map.width, config.map.height, config.map.cell_size);
        let spawn_point = world_setup::setup_world(&mut world, &mut grid, &mut rng, &config);

        let resources = config
            .economy
            .starting
            .scaled(config.difficulty.modifiers().starting_resources);
        let waves = WaveScheduler::new(config.waves.interval, config.waves.first_wave_immediate);

        tracing::info!(
            seed = config.seed,
            difficulty = ?config.difficulty,
            obstacles = grid.obstacle_count(),
            "simulation initialized"
        );

        Ok(Self {
            pathfinder: Pathfinder::new(grid),
            world,
            time: SimTime::default(),
            phase: GamePhase::Active,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            notifications: Vec::new(),
            resources,
            gather_timer: 0.0,
            ai_timer: 0.0,
            waves,
            training: TrainingQueue::default(),
            spawn_point,
            config,
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    /// A negative or non-finite `dt` is treated as zero.
    pub fn tick(&mut self, dt: f32) -> GameStateSnapshot {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        self.age_notifications(dt);
        let events = std::mem::take(&mut self.events);
        for event in &events {
            self.notify_event(event);
        }

        let enemies_alive = systems::wave_spawner::enemies_alive(&self.world);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInputs {
                time: self.time,
                phase: self.phase,
                wave: self.waves.view(enemies_alive),
                resources: self.resources,
                population: self.population(),
                training: self.training.views(),
                notifications: &self.notifications,
                events,
            },
        )
    }

    /// Queue a unit for training. The cost is spent up front. The unit
    /// appears at `spawn_point`, or at the rally point when none is given
    /// or the given one is not finite.
    pub fn queue_train(
        &mut self,
        kind: UnitKind,
        spawn_point: Option<Vec2>,
    ) -> Result<(), CommandError> {
        let result = self.try_queue_train(kind, spawn_point);
        if let Err(err) = result {
            tracing::warn!(?kind, %err, "training rejected");
            self.notify(NoticeLevel::Warning, err.to_string());
        }
        result
    }

    fn try_queue_train(
        &mut self,
        kind: UnitKind,
        spawn_point: Option<Vec2>,
    ) -> Result<(), CommandError> {
        let archetype = self.config.archetypes.get(kind);
        let cost = archetype.cost.ok_or(CommandError::NotTrainable)?;
        let training_time = archetype.training_time;

        let population = self.population();
        if population.current >= population.cap {
            return Err(CommandError::PopulationCap);
        }
        if !self.resources.spend(&cost) {
            return Err(CommandError::InsufficientResources);
        }
        let spawn_point = spawn_point
            .filter(|p| p.is_finite())
            .unwrap_or(self.spawn_point);
        self.training.push(kind, training_time, spawn_point);
        tracing::debug!(?kind, queued = self.training.len(), "training queued");
        Ok(())
    }

    /// Deduct `cost` from the stockpile if affordable.
    pub fn spend(&mut self, cost: &Resources) -> bool {
        self.resources.spend(cost)
    }

    /// Living player units plus queued training orders, against the cap.
    pub fn population(&self) -> PopulationView {
        let living = self
            .world
            .query::<&Unit>()
            .iter()
            .filter(|(_, u)| u.team == Team::Player && u.is_alive())
            .count();
        PopulationView {
            current: (living + self.training.len()) as u32,
            cap: self.config.economy.max_population,
        }
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn resources(&self) -> Resources {
        self.resources
    }

    pub fn waves(&self) -> &WaveScheduler {
        &self.waves
    }

    pub fn training(&self) -> &TrainingQueue {
        &self.training
    }

    /// Where trained units appear.
    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn grid(&self) -> &Grid {
        self.pathfinder.grid()
    }

    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }

    /// Spawn a unit directly (for testing).
    #[cfg(test)]
    pub fn spawn_test_unit(&mut self, kind: UnitKind, team: Team, position: Vec2) -> Entity {
        world_setup::spawn_unit(&mut self.world, &self.config, kind, team, position)
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn pathfinder_mut(&mut self) -> &mut Pathfinder {
        &mut self.pathfinder
    }

    #[cfg(test)]
    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        use systems::commands;

        match command {
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                    tracing::info!(tick = self.time.tick, "paused");
                }
                return;
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                    tracing::info!(tick = self.time.tick, "resumed");
                }
                return;
            }
            _ => {}
        }
        if self.phase.is_over() {
            tracing::debug!("order ignored after game end");
            return;
        }

        let world = &mut self.world;
        let pathfinder = &mut self.pathfinder;
        match command {
            PlayerCommand::Move { units, x, y } => {
                commands::move_units(world, pathfinder, &units, Vec2::new(x, y));
            }
            PlayerCommand::AttackTarget { units, target } => {
                commands::attack_target(world, pathfinder, &units, target);
            }
            PlayerCommand::SetStance { units, stance } => {
                commands::set_stance(world, &units, stance);
            }
            PlayerCommand::AttackNearestGate { units } => {
                commands::attack_nearest_gate(world, pathfinder, &units);
            }
            PlayerCommand::Stop { units } => commands::stop(world, &units),
            PlayerCommand::HoldPosition { units } => commands::hold_position(world, &units),
            PlayerCommand::FormationMove { units } => {
                let spacing = self.config.combat.formation_spacing;
                commands::formation_move(world, pathfinder, &units, spacing);
            }
            PlayerCommand::Gather { units, node } => {
                commands::gather(world, pathfinder, &units, node);
            }
            PlayerCommand::ActivateCharge { units } => commands::activate_charge(world, &units),
            PlayerCommand::Train { kind, spawn_point } => {
                // Rejections are reported through notifications.
                let _ = self.queue_train(kind, spawn_point);
            }
            PlayerCommand::Pause | PlayerCommand::Resume => {}
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Enemy behavior (every tick unless throttled)
        self.ai_timer += dt;
        if self.ai_timer >= self.config.combat.ai_interval {
            self.ai_timer = 0.0;
            systems::enemy_ai::run(&mut self.world, &mut self.pathfinder, &self.config.combat);
        }

        // 2. Timers, buffs, movement, retreat, worker transitions
        systems::units::run(
            &mut self.world,
            &mut self.pathfinder,
            dt,
            &self.config.units,
            self.config.combat.ai_repath_distance,
            self.config.economy.arrival_radius,
        );

        // 3. Combat, then the end-of-game predicates
        systems::combat::run(
            &mut self.world,
            &mut self.pathfinder,
            dt,
            &self.config,
            &mut self.events,
        );
        if let Some(outcome) = systems::combat::check_outcome(&self.world) {
            self.phase = outcome;
            let event = if outcome == GamePhase::Victory {
                SimEvent::Victory
            } else {
                SimEvent::Defeat
            };
            self.events.push(event);
            tracing::info!(tick = self.time.tick, phase = ?outcome, "game over");
        }

        if !self.phase.is_over() {
            // 4. Waves
            systems::wave_spawner::run(
                &mut self.world,
                &mut self.waves,
                &self.config,
                dt,
                &mut self.resources,
                &mut self.events,
            );
            // 5. Economy
            systems::economy::run(
                &mut self.world,
                &mut self.resources,
                &self.config.economy,
                &mut self.gather_timer,
                dt,
                &mut self.events,
            );
            // 6. Training
            systems::training::run(
                &mut self.world,
                &mut self.training,
                &self.config,
                dt,
                &mut self.events,
            );
        }

        // 7. Cleanup
        systems::cleanup::run(&mut self.world, self.time.tick, &mut self.despawn_buffer);
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notifications.push(Notification {
            level,
            message: message.into(),
            tick: self.time.tick,
            remaining_secs: NOTIFICATION_LIFETIME,
        });
    }

    fn age_notifications(&mut self, dt: f32) {
        for notification in &mut self.notifications {
            notification.remaining_secs -= dt;
        }
        self.notifications.retain(|n| n.remaining_secs > 0.0);
    }

    /// Player-facing message for an event, if it deserves one.
    fn notify_event(&mut self, event: &SimEvent) {
        let (level, message) = match event {
            SimEvent::WaveStarted { wave, count } => (
                NoticeLevel::Warning,
                format!("Wave {wave} approaching: {count} defenders"),
            ),
            SimEvent::WaveCleared { wave, reward_gold } => (
                NoticeLevel::Success,
                format!("Wave {wave} cleared! +{reward_gold} gold"),
            ),
            SimEvent::GateDestroyed { side } => {
                (NoticeLevel::Success, format!("{side:?} gate destroyed!"))
            }
            SimEvent::NodeDepleted { kind, .. } => {
                (NoticeLevel::Info, format!("A {kind:?} node is depleted"))
            }
            SimEvent::UnitTrained { kind, .. } => (NoticeLevel::Info, format!("{kind:?} ready")),
            SimEvent::Victory => (NoticeLevel::Success, "Victory! The fortress has fallen".to_string()),
            SimEvent::Defeat => (NoticeLevel::Warning, "Defeat! Your army is gone".to_string()),
            SimEvent::UnitKilled { .. } | SimEvent::LevelUp { .. } => return,
        };
        self.notify(level, message);
    }
}
