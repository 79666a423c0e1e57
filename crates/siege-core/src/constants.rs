//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind `SimConfig`. Runtime code reads the config,
//! never these values directly, so a loaded config can override any of them.

// --- World ---

/// Map width in world units.
pub const MAP_WIDTH: f32 = 3000.0;

/// Map height in world units.
pub const MAP_HEIGHT: f32 = 2500.0;

/// Pathfinding cell edge length in world units.
pub const CELL_SIZE: f32 = 32.0;

/// Upper bound on grid cells accepted by config validation.
pub const MAX_GRID_CELLS: usize = 1 << 20;

// --- Fortress ---

/// Fortress center x.
pub const FORTRESS_X: f32 = 1500.0;

/// Fortress center y.
pub const FORTRESS_Y: f32 = 1250.0;

/// Edge length of the square fortress.
pub const FORTRESS_SIZE: f32 = 500.0;

/// Thickness of the fortress walls.
pub const WALL_THICKNESS: f32 = 30.0;

/// Gate opening width along the wall.
pub const GATE_WIDTH: f32 = 80.0;

/// Base gate health before the gate multiplier.
pub const GATE_BASE_HEALTH: f32 = 800.0;

/// Gates are reinforced beyond the base value.
pub const GATE_HEALTH_MULTIPLIER: f32 = 1.5;

/// Gate tower engagement range.
pub const GATE_TOWER_RANGE: f32 = 200.0;

/// Damage carried by each tower projectile.
pub const GATE_TOWER_DAMAGE: f32 = 15.0;

/// Seconds between tower shots.
pub const GATE_TOWER_COOLDOWN: f32 = 1.5;

// --- Projectiles ---

/// Flat projectile speed (units/s).
pub const PROJECTILE_SPEED: f32 = 400.0;

/// A projectile this close to its target counts as a hit.
pub const PROJECTILE_HIT_RADIUS: f32 = 5.0;

// --- Movement ---

/// Distance at which a path waypoint counts as reached.
pub const WAYPOINT_RADIUS: f32 = 5.0;

/// Direct-seek snap distance floor.
pub const ARRIVAL_SNAP: f32 = 2.0;

/// Spacing between units in a formation move.
pub const FORMATION_SPACING: f32 = 45.0;

// --- Combat / progression ---

/// A target farther than this multiple of attack range is dropped.
pub const TARGET_LEASH_FACTOR: f32 = 1.5;

/// Units retreat below this fraction of max health.
pub const RETREAT_HEALTH_FRACTION: f32 = 0.2;

/// Distance of a retreat move.
pub const RETREAT_DISTANCE: f32 = 200.0;

/// Below this offset from its last destination a unit counts as arrived
/// when picking a retreat direction.
pub const RETREAT_MIN_OFFSET: f32 = 1.0;

/// Duration of the attack animation flag.
pub const ATTACK_ANIMATION_SECS: f32 = 0.3;

/// Experience granted per kill.
pub const XP_PER_KILL: f32 = 50.0;

/// Experience needed for the first level-up.
pub const FIRST_LEVEL_XP: f32 = 100.0;

/// Growth of the experience threshold per level.
pub const LEVEL_XP_GROWTH: f32 = 1.3;

/// Level cap.
pub const MAX_LEVEL: u32 = 10;

/// Max health and damage growth per level.
pub const LEVEL_POWER_GROWTH: f32 = 1.12;

/// Speed growth per level.
pub const LEVEL_SPEED_GROWTH: f32 = 1.05;

/// Flat armor gained per level.
pub const LEVEL_ARMOR_GAIN: f32 = 1.0;

// --- Enemy AI ---

/// Seconds between enemy decisions. Zero decides every tick.
pub const AI_UPDATE_INTERVAL: f32 = 0.0;

/// Enemies chase players closer than this.
pub const AI_ENGAGE_RANGE: f32 = 200.0;

/// Enemies drift back to their gate when farther than this.
pub const AI_GUARD_RADIUS: f32 = 300.0;

/// Minimum destination change before an enemy re-plans its route.
pub const AI_REPATH_DISTANCE: f32 = 32.0;

// --- Waves ---

/// Seconds between a cleared wave and the next one.
pub const WAVE_INTERVAL: f32 = 45.0;

/// Enemy count multiplier before scaling.
pub const WAVE_BASE_COUNT: f64 = 5.0;

/// Radius of the spawn ring around the fortress center.
pub const WAVE_SPAWN_RADIUS: f32 = 200.0;

/// Gold granted per wave number on clear.
pub const WAVE_REWARD_GOLD: u32 = 100;

/// From this wave on, every fourth enemy is an archer.
pub const WAVE_ARCHER_FROM: u32 = 3;

// --- Economy ---

pub const STARTING_GOLD: u32 = 1000;
pub const STARTING_WOOD: u32 = 300;
pub const STARTING_STONE: u32 = 200;
pub const STARTING_FOOD: u32 = 500;

/// Population cap (living player units plus queued orders).
pub const MAX_POPULATION: u32 = 100;

/// Seconds between gather cycles.
pub const GATHER_INTERVAL: f32 = 2.0;

/// Amount withdrawn per worker per cycle.
pub const GATHER_AMOUNT: u32 = 10;

/// Workers gather from nodes within this distance.
pub const GATHER_RADIUS: f32 = 50.0;

/// A worker heading to a node switches to gathering this close to it.
pub const GATHER_ARRIVAL_RADIUS: f32 = 40.0;

/// Footprint radius of a resource node.
pub const RESOURCE_NODE_SIZE: f32 = 30.0;

// --- Buildings ---

pub const COMMAND_CENTER_HEALTH: f32 = 1000.0;
pub const BUILDING_HEALTH: f32 = 500.0;

// --- Unit archetypes: health, speed, damage, range, cooldown ---

pub const WORKER_HEALTH: f32 = 80.0;
pub const WORKER_SPEED: f32 = 85.0;
pub const WORKER_DAMAGE: f32 = 5.0;
pub const WORKER_RANGE: f32 = 20.0;

pub const SOLDIER_HEALTH: f32 = 120.0;
pub const SOLDIER_SPEED: f32 = 110.0;
pub const SOLDIER_DAMAGE: f32 = 15.0;
pub const SOLDIER_RANGE: f32 = 40.0;

pub const ARCHER_HEALTH: f32 = 80.0;
pub const ARCHER_SPEED: f32 = 100.0;
pub const ARCHER_DAMAGE: f32 = 20.0;
pub const ARCHER_RANGE: f32 = 150.0;
pub const ARCHER_COOLDOWN: f32 = 1.5;

pub const CAVALRY_HEALTH: f32 = 150.0;
pub const CAVALRY_SPEED: f32 = 180.0;
pub const CAVALRY_DAMAGE: f32 = 25.0;
pub const CAVALRY_RANGE: f32 = 50.0;
pub const CAVALRY_COOLDOWN: f32 = 0.9;

pub const CHAMPION_HEALTH: f32 = 250.0;
pub const CHAMPION_SPEED: f32 = 130.0;
pub const CHAMPION_DAMAGE: f32 = 35.0;
pub const CHAMPION_RANGE: f32 = 50.0;
pub const CHAMPION_COOLDOWN: f32 = 0.8;

pub const ELEPHANT_HEALTH: f32 = 300.0;
pub const ELEPHANT_SPEED: f32 = 70.0;
pub const ELEPHANT_DAMAGE: f32 = 50.0;
pub const ELEPHANT_RANGE: f32 = 30.0;
pub const ELEPHANT_COOLDOWN: f32 = 1.5;

pub const RAM_HEALTH: f32 = 300.0;
pub const RAM_SPEED: f32 = 40.0;
pub const RAM_DAMAGE: f32 = 100.0;
pub const RAM_RANGE: f32 = 25.0;
pub const RAM_COOLDOWN: f32 = 2.0;
pub const RAM_ARMOR: f32 = 5.0;

/// Cooldown for archetypes that do not override it.
pub const DEFAULT_ATTACK_COOLDOWN: f32 = 1.0;

// --- Special abilities ---

/// Cavalry charges on move orders longer than this.
pub const CAVALRY_CHARGE_TRIGGER_DISTANCE: f32 = 150.0;
pub const CAVALRY_CHARGE_DURATION: f32 = 3.0;
pub const CAVALRY_CHARGE_SPEED: f32 = 1.8;
pub const CAVALRY_CHARGE_DAMAGE: f32 = 1.3;
/// Extra hit, as a fraction of damage, while charging.
pub const CAVALRY_CHARGE_BONUS_HIT: f32 = 0.5;

pub const ELEPHANT_CHARGE_DURATION: f32 = 2.0;
pub const ELEPHANT_CHARGE_COOLDOWN: f32 = 10.0;
pub const ELEPHANT_CHARGE_SPEED: f32 = 2.0;
/// Gate damage multiplier while the elephant charges.
pub const ELEPHANT_CHARGE_GATE_MULTIPLIER: f32 = 5.0;

/// Ram damage multiplier against gates at full crew.
pub const RAM_GATE_MULTIPLIER: f32 = 3.0;
pub const RAM_CREW: u8 = 3;
/// Crew drops to 2 below this health fraction.
pub const RAM_CREW_LOSS_HIGH: f32 = 0.7;
/// Crew drops to 1 below this health fraction.
pub const RAM_CREW_LOSS_LOW: f32 = 0.4;

// --- Training times (seconds) ---

pub const WORKER_TRAINING_TIME: f32 = 2.5;
pub const SOLDIER_TRAINING_TIME: f32 = 3.5;
pub const ARCHER_TRAINING_TIME: f32 = 4.0;
pub const CAVALRY_TRAINING_TIME: f32 = 5.0;
pub const CHAMPION_TRAINING_TIME: f32 = 8.0;
pub const RAM_TRAINING_TIME: f32 = 10.0;

// --- Notifications ---

/// Seconds a notification stays visible.
pub const NOTIFICATION_LIFETIME: f32 = 3.0;
