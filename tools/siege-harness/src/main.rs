//! siege-harness: headless driver for the siege simulation.
//!
//! Usage:
//!   siege-harness run --ticks 5400 --seed 7 --difficulty hard
//!   siege-harness run --config siege.json
//!   siege-harness config > siege.json
//!
//! `run` plays a scripted opening (workers gather, the barracks trains,
//! the army marches on the nearest gate) and logs telemetry once per
//! simulated second. Set `RUST_LOG=debug` for per-system detail.

use std::path::PathBuf;
use std::process;

use glam::Vec2;
use hecs::Entity;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use siege_core::commands::PlayerCommand;
use siege_core::config::SimConfig;
use siege_core::enums::{Difficulty, GamePhase, ResourceKind, Team, UnitKind};
use siege_core::state::GameStateSnapshot;
use siege_core::structures::ResourceNode;
use siege_core::unit::Unit;
use siege_sim::SimulationEngine;

const TICK_RATE: u32 = 30;
const DEFAULT_TICKS: u64 = 30 * 180;
/// Tick at which the army is sent against the fortress.
const ASSAULT_TICK: u64 = 30 * 20;

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "config" => cmd_config(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn print_usage() {
    eprintln!(
        "siege-harness: headless siege simulation driver\n\
         \n\
         Commands:\n\
         \n\
         run       Play a scripted game and log telemetry\n\
         \n\
           --config <path>      JSON config (fields not given use defaults)\n\
           --seed <N>           Override the RNG seed\n\
           --difficulty <name>  easy | normal | hard\n\
           --ticks <N>          Ticks to run at 30 Hz (default: 5400)\n\
         \n\
         config    Print the default config as JSON\n"
    );
}

fn parse_flag<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_difficulty(name: &str) -> Option<Difficulty> {
    match name.to_ascii_lowercase().as_str() {
        "easy" => Some(Difficulty::Easy),
        "normal" => Some(Difficulty::Normal),
        "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}

fn load_config(args: &[String]) -> SimConfig {
    let mut config = match parse_flag(args, "--config").map(PathBuf::from) {
        Some(path) => {
            let text = match std::fs::read_to_string(&path) {
                Ok(t) => t,
                Err(e) => {
                    error!(path = %path.display(), error = %e, "cannot read config");
                    process::exit(1);
                }
            };
            match SimConfig::from_json(&text) {
                Ok(c) => c,
                Err(e) => {
                    error!(path = %path.display(), error = %e, "invalid config");
                    process::exit(1);
                }
            }
        }
        None => SimConfig::default(),
    };

    if let Some(seed) = parse_flag(args, "--seed") {
        match seed.parse() {
            Ok(s) => config.seed = s,
            Err(_) => warn!(seed, "ignoring unparsable seed"),
        }
    }
    if let Some(name) = parse_flag(args, "--difficulty") {
        match parse_difficulty(name) {
            Some(d) => config.difficulty = d,
            None => warn!(name, "unknown difficulty, keeping {:?}", config.difficulty),
        }
    }
    config
}

fn cmd_config() {
    match serde_json::to_string_pretty(&SimConfig::default()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!(error = %e, "failed to serialize config");
            process::exit(1);
        }
    }
}

// --- Scripted game ---

fn cmd_run(args: &[String]) {
    let config = load_config(args);
    let ticks = parse_flag(args, "--ticks")
        .and_then(|t| t.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let mut engine = match SimulationEngine::new(config) {
        Ok(e) => e,
        Err(e) => {
            error!(error = %e, "invalid config");
            process::exit(1);
        }
    };
    info!(ticks, seed = engine.config().seed, "starting run");

    open_economy(&mut engine);
    let dt = 1.0 / TICK_RATE as f32;
    let mut last = None;

    for _ in 0..ticks {
        let tick = engine.time().tick;
        if tick == ASSAULT_TICK {
            launch_assault(&mut engine);
        }
        if tick > ASSAULT_TICK && tick % (TICK_RATE as u64 * 5) == 0 {
            engine.queue_command(PlayerCommand::ActivateCharge {
                units: units_of(&engine, &[UnitKind::SiegeElephant]),
            });
        }

        let snapshot = engine.tick(dt);
        for notification in &snapshot.notifications {
            if notification.tick == snapshot.time.tick {
                info!(level = ?notification.level, "{}", notification.message);
            }
        }
        if snapshot.time.tick % TICK_RATE as u64 == 0 {
            log_telemetry(&snapshot);
        }
        let over = snapshot.phase.is_over();
        last = Some(snapshot);
        if over {
            break;
        }
    }

    if let Some(snapshot) = last {
        log_telemetry(&snapshot);
        match snapshot.phase {
            GamePhase::Victory => info!(tick = snapshot.time.tick, "fortress taken"),
            GamePhase::Defeat => info!(tick = snapshot.time.tick, "army lost"),
            _ => info!(tick = snapshot.time.tick, "time limit reached"),
        }
    }
}

fn units_of(engine: &SimulationEngine, kinds: &[UnitKind]) -> Vec<Entity> {
    engine
        .world()
        .query::<&Unit>()
        .iter()
        .filter(|(_, u)| u.team == Team::Player && u.is_alive() && kinds.contains(&u.kind))
        .map(|(e, _)| e)
        .collect()
}

/// Workers to the nearest wood, plus a first batch of recruits.
fn open_economy(engine: &mut SimulationEngine) {
    let workers = units_of(engine, &[UnitKind::Worker]);
    let camp = engine.spawn_point();
    let node = engine
        .world()
        .query::<&ResourceNode>()
        .iter()
        .filter(|(_, n)| n.kind == ResourceKind::Wood && !n.is_depleted())
        .map(|(e, n)| (e, n.position.distance(camp)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(e, _)| e);

    match node {
        Some(node) => engine.queue_command(PlayerCommand::Gather {
            units: workers,
            node,
        }),
        None => warn!("no wood to gather"),
    }

    for kind in [UnitKind::Soldier, UnitKind::Soldier, UnitKind::Archer, UnitKind::SiegeRam] {
        if let Err(e) = engine.queue_train(kind, None) {
            warn!(?kind, error = %e, "could not queue");
        }
    }
}

fn launch_assault(engine: &mut SimulationEngine) {
    let army = units_of(
        engine,
        &[
            UnitKind::Soldier,
            UnitKind::Archer,
            UnitKind::Cavalry,
            UnitKind::Champion,
            UnitKind::SiegeElephant,
            UnitKind::SiegeRam,
        ],
    );
    info!(size = army.len(), "assault launched");
    engine.queue_commands([
        PlayerCommand::FormationMove { units: army.clone() },
        PlayerCommand::AttackNearestGate { units: army },
    ]);
}

fn log_telemetry(snapshot: &GameStateSnapshot) {
    let alive = |units: &[siege_core::state::UnitView]| units.iter().filter(|u| u.alive).count();
    let army_center = {
        let living: Vec<Vec2> = snapshot
            .player_units
            .iter()
            .filter(|u| u.alive)
            .map(|u| u.position)
            .collect();
        if living.is_empty() {
            Vec2::ZERO
        } else {
            living.iter().copied().sum::<Vec2>() / living.len() as f32
        }
    };
    let gate_health: f32 = snapshot.gates.iter().map(|g| g.health).sum();

    info!(
        tick = snapshot.time.tick,
        secs = format_args!("{:.0}", snapshot.time.elapsed_secs),
        wave = snapshot.wave.wave_number,
        next_wave = format_args!("{:.0}", snapshot.wave.time_to_next_wave),
        defenders = alive(&snapshot.enemy_units),
        army = alive(&snapshot.player_units),
        gates_standing = snapshot.gates.iter().filter(|g| !g.destroyed).count(),
        gate_health = format_args!("{gate_health:.0}"),
        gold = snapshot.resources.gold,
        wood = snapshot.resources.wood,
        stone = snapshot.resources.stone,
        food = snapshot.resources.food,
        pop = format_args!("{}/{}", snapshot.population.current, snapshot.population.cap),
        army_x = army_center.x as i32,
        army_y = army_center.y as i32,
        "telemetry"
    );
}
