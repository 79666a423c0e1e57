//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the fortress gates, player buildings, starting roster and
//! resource fields, and rasterizes every blocking structure into the
//! pathfinding grid.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use siege_core::components::Gatherer;
use siege_core::config::{FortressConfig, SimConfig};
use siege_core::constants::{BUILDING_HEALTH, COMMAND_CENTER_HEALTH, RESOURCE_NODE_SIZE};
use siege_core::enums::*;
use siege_core::structures::{Building, Gate, GateTower, ResourceNode};
use siege_core::types::Rect;
use siege_core::unit::Unit;
use siege_pathfinding::Grid;

/// A clustered patch of resource nodes laid out row by row.
struct ResourceField {
    kind: ResourceKind,
    origin: Vec2,
    count: u32,
    columns: u32,
    spacing: Vec2,
    jitter: f32,
}

const RESOURCE_FIELDS: [ResourceField; 8] = [
    // Northwest forest, next to the starting camp.
    ResourceField {
        kind: ResourceKind::Wood,
        origin: Vec2::new(100.0, 400.0),
        count: 25,
        columns: 5,
        spacing: Vec2::new(60.0, 70.0),
        jitter: 30.0,
    },
    ResourceField {
        kind: ResourceKind::Wood,
        origin: Vec2::new(2000.0, 300.0),
        count: 30,
        columns: 6,
        spacing: Vec2::new(65.0, 75.0),
        jitter: 40.0,
    },
    ResourceField {
        kind: ResourceKind::Wood,
        origin: Vec2::new(800.0, 550.0),
        count: 20,
        columns: 5,
        spacing: Vec2::new(70.0, 80.0),
        jitter: 35.0,
    },
    ResourceField {
        kind: ResourceKind::Wood,
        origin: Vec2::new(900.0, 1700.0),
        count: 35,
        columns: 7,
        spacing: Vec2::new(60.0, 70.0),
        jitter: 30.0,
    },
    ResourceField {
        kind: ResourceKind::Wood,
        origin: Vec2::new(2400.0, 1000.0),
        count: 25,
        columns: 5,
        spacing: Vec2::new(55.0, 75.0),
        jitter: 25.0,
    },
    ResourceField {
        kind: ResourceKind::Stone,
        origin: Vec2::new(500.0, 650.0),
        count: 15,
        columns: 5,
        spacing: Vec2::new(80.0, 90.0),
        jitter: 40.0,
    },
    ResourceField {
        kind: ResourceKind::Stone,
        origin: Vec2::new(2100.0, 1800.0),
        count: 18,
        columns: 6,
        spacing: Vec2::new(75.0, 85.0),
        jitter: 35.0,
    },
    ResourceField {
        kind: ResourceKind::Stone,
        origin: Vec2::new(300.0, 1900.0),
        count: 12,
        columns: 4,
        spacing: Vec2::new(85.0, 90.0),
        jitter: 40.0,
    },
];

/// Set up the initial world. Returns the spawn point for trained units.
pub fn setup_world(
    world: &mut World,
    grid: &mut Grid,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
) -> Vec2 {
    spawn_fortress(world, grid, &config.fortress);
    let spawn_point = spawn_buildings(world, grid);
    spawn_resource_fields(world, rng);
    spawn_starting_roster(world, config);
    tracing::info!(
        obstacles = grid.obstacle_count(),
        cells = grid.len(),
        "world initialized"
    );
    spawn_point
}

/// Block (or clear) every cell the rectangle overlaps, so walls thinner
/// than a cell still block.
pub fn rasterize(grid: &mut Grid, rect: &Rect, blocked: bool) -> usize {
    let pad = Vec2::splat(grid.cell_size() * 0.49);
    grid.set_obstacle_rect(rect.min - pad, rect.max + pad, blocked)
}

/// Gate rectangles, one per wall, straddling the wall band.
pub fn gate_bounds(fortress: &FortressConfig) -> [(GateSide, Rect); 4] {
    let c = fortress.center;
    let half = fortress.size * 0.5;
    let t = fortress.wall_thickness;
    let g = fortress.gate_width;
    [
        (GateSide::North, Rect::new(c.x - g * 0.5, c.y - half - 5.0, g, t + 10.0)),
        (GateSide::South, Rect::new(c.x - g * 0.5, c.y + half - t - 5.0, g, t + 10.0)),
        (GateSide::West, Rect::new(c.x - half - 5.0, c.y - g * 0.5, t + 10.0, g)),
        (GateSide::East, Rect::new(c.x + half - t - 5.0, c.y - g * 0.5, t + 10.0, g)),
    ]
}

/// Wall segments on either side of each gate opening.
pub fn wall_segments(fortress: &FortressConfig) -> Vec<Rect> {
    let c = fortress.center;
    let half = fortress.size * 0.5;
    let t = fortress.wall_thickness;
    let g = fortress.gate_width * 0.5;
    let left = c.x - half;
    let top = c.y - half;
    let span = half - g;
    vec![
        // North and south walls, split at the gate.
        Rect::new(left, top, span, t),
        Rect::new(c.x + g, top, span, t),
        Rect::new(left, c.y + half - t, span, t),
        Rect::new(c.x + g, c.y + half - t, span, t),
        // West and east walls.
        Rect::new(left, top, t, span),
        Rect::new(left, c.y + g, t, span),
        Rect::new(c.x + half - t, top, t, span),
        Rect::new(c.x + half - t, c.y + g, t, span),
    ]
}

fn spawn_fortress(world: &mut World, grid: &mut Grid, fortress: &FortressConfig) {
    for wall in wall_segments(fortress) {
        rasterize(grid, &wall, true);
    }
    for (side, bounds) in gate_bounds(fortress) {
        rasterize(grid, &bounds, true);
        let tower = GateTower {
            range: fortress.tower_range,
            damage: fortress.tower_damage,
            cooldown: fortress.tower_cooldown,
            timer: 0.0,
            target: None,
        };
        world.spawn((Gate::new(side, bounds, fortress.gate_health, tower),));
    }
}

fn spawn_buildings(world: &mut World, grid: &mut Grid) -> Vec2 {
    let layout = [
        (
            BuildingKind::CommandCenter,
            Rect::new(200.0, 200.0, 180.0, 180.0),
            COMMAND_CENTER_HEALTH,
        ),
        (
            BuildingKind::Barracks,
            Rect::new(400.0, 200.0, 150.0, 150.0),
            BUILDING_HEALTH,
        ),
        (
            BuildingKind::ResourceDepot,
            Rect::new(570.0, 200.0, 130.0, 130.0),
            BUILDING_HEALTH,
        ),
    ];

    let mut spawn_point = Vec2::new(290.0, 180.0);
    for (kind, bounds, health) in layout {
        rasterize(grid, &bounds, true);
        let building = Building::new(kind, bounds, health);
        if kind == BuildingKind::CommandCenter {
            spawn_point = building.rally_point();
        }
        world.spawn((building,));
    }
    spawn_point
}

fn spawn_resource_fields(world: &mut World, rng: &mut ChaCha8Rng) {
    for field in &RESOURCE_FIELDS {
        for i in 0..field.count {
            let cell = Vec2::new((i % field.columns) as f32, (i / field.columns) as f32);
            let jitter = Vec2::new(
                rng.gen_range(0.0..field.jitter),
                rng.gen_range(0.0..field.jitter),
            );
            let position = field.origin + cell * field.spacing + jitter;
            let amount = match field.kind {
                ResourceKind::Wood => rng.gen_range(800..=1200),
                ResourceKind::Stone => rng.gen_range(600..=1000),
            };
            world.spawn((ResourceNode::new(
                field.kind,
                position,
                RESOURCE_NODE_SIZE,
                amount,
            ),));
        }
    }
}

fn spawn_starting_roster(world: &mut World, config: &SimConfig) {
    for i in 0..5 {
        let position = Vec2::new(250.0 + i as f32 * 40.0, 430.0);
        spawn_unit(world, config, UnitKind::Worker, Team::Player, position);
    }
    for i in 0..8 {
        let position = Vec2::new(250.0 + i as f32 * 40.0, 480.0);
        spawn_unit(world, config, UnitKind::Soldier, Team::Player, position);
    }
    // The royal elephant: a single hero, never trained.
    spawn_unit(
        world,
        config,
        UnitKind::SiegeElephant,
        Team::Player,
        Vec2::new(410.0, 540.0),
    );
}

/// Spawn a unit from its archetype. Enemies get the difficulty multipliers,
/// champions get the Commander variant, workers get a `Gatherer`.
pub fn spawn_unit(
    world: &mut World,
    config: &SimConfig,
    kind: UnitKind,
    team: Team,
    position: Vec2,
) -> Entity {
    let archetype = config.archetypes.get(kind);
    let mut unit = Unit::from_archetype(kind, team, archetype, position, &config.units);
    if kind == UnitKind::Champion {
        unit = unit.with_variant(ChampionVariant::Commander);
    }
    if team == Team::Enemy {
        let m = config.difficulty.modifiers();
        unit = unit.scaled(m.enemy_health, m.enemy_damage);
    }

    if kind == UnitKind::Worker {
        world.spawn((unit, Gatherer::default()))
    } else {
        world.spawn((unit,))
    }
}
