//! A* search over the grid.
//!
//! Node state (g-cost, parent, open/closed membership) lives in a
//! `SearchArena` indexed by cell and reused across searches. A generation
//! stamp marks which entries belong to the current search, so starting a
//! new search never clears or reallocates the arena.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use glam::Vec2;

use crate::grid::{octile_distance, Cell, Grid, NEIGHBORS};
use crate::simplify::simplify_path;

/// Default ring-search radius (in cells) when the goal cell is blocked.
pub const GOAL_SEARCH_RADIUS: i32 = 10;

const NO_PARENT: u32 = u32::MAX;

/// Cells of a found path and its total step cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPath {
    /// Start cell excluded, goal cell included.
    pub cells: Vec<Cell>,
    pub cost: u32,
}

#[derive(Debug, Default)]
struct SearchArena {
    generation: u32,
    seen: Vec<u32>,
    closed: Vec<u32>,
    g: Vec<u32>,
    parent: Vec<u32>,
}

impl SearchArena {
    fn resize(&mut self, len: usize) {
        if self.seen.len() != len {
            self.seen = vec![0; len];
            self.closed = vec![0; len];
            self.g = vec![0; len];
            self.parent = vec![NO_PARENT; len];
            self.generation = 0;
        }
    }

    fn begin(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.seen.iter_mut().for_each(|s| *s = 0);
            self.closed.iter_mut().for_each(|s| *s = 0);
            self.generation = 1;
        }
    }

    fn is_seen(&self, i: usize) -> bool {
        self.seen[i] == self.generation
    }

    fn is_closed(&self, i: usize) -> bool {
        self.closed[i] == self.generation
    }

    fn open(&mut self, i: usize, g: u32, parent: u32) {
        self.seen[i] = self.generation;
        self.g[i] = g;
        self.parent[i] = parent;
    }
}

/// Grid plus the reusable search state.
#[derive(Debug)]
pub struct Pathfinder {
    grid: Grid,
    arena: SearchArena,
    open: BinaryHeap<Reverse<(u32, u32, u32)>>,
    goal_search_radius: i32,
    last_cost: Option<u32>,
}

impl Pathfinder {
    pub fn new(grid: Grid) -> Self {
        let mut arena = SearchArena::default();
        arena.resize(grid.len());
        Self {
            grid,
            arena,
            open: BinaryHeap::new(),
            goal_search_radius: GOAL_SEARCH_RADIUS,
            last_cost: None,
        }
    }

    pub fn with_goal_search_radius(mut self, radius: i32) -> Self {
        self.goal_search_radius = radius.max(0);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Step cost of the most recent successful search.
    pub fn last_cost(&self) -> Option<u32> {
        self.last_cost
    }

    /// Shortest path between two world positions as simplified waypoints.
    ///
    /// A blocked goal is retargeted to the nearest walkable cell within the
    /// ring-search radius. Returns `None` when either end lies outside the
    /// grid, no walkable goal is found, or the goal is unreachable.
    pub fn find_path(&mut self, start: Vec2, goal: Vec2) -> Option<Vec<Vec2>> {
        let start_cell = self.grid.world_to_cell(start)?;
        let requested = self.grid.world_to_cell(goal)?;
        let goal_cell = match self.grid.nearest_walkable(requested, self.goal_search_radius) {
            Some(cell) => cell,
            None => {
                tracing::debug!(x = requested.x, y = requested.y, "no walkable cell near goal");
                return None;
            }
        };
        if goal_cell != requested {
            tracing::trace!(
                from_x = requested.x,
                from_y = requested.y,
                to_x = goal_cell.x,
                to_y = goal_cell.y,
                "goal retargeted"
            );
        }

        let path = self.find_cell_path(start_cell, goal_cell)?;
        let points: Vec<Vec2> = path.cells.iter().map(|&c| self.grid.cell_center(c)).collect();
        Some(simplify_path(&points))
    }

    /// A* between two cells. The start cell need not be walkable; the goal must be.
    pub fn find_cell_path(&mut self, start: Cell, goal: Cell) -> Option<CellPath> {
        self.last_cost = None;
        let start_index = self.grid.index(start)?;
        let goal_index = self.grid.index(goal)?;
        if !self.grid.is_walkable(goal.x, goal.y) {
            return None;
        }

        self.arena.resize(self.grid.len());
        self.arena.begin();
        self.open.clear();

        let h = octile_distance(start, goal);
        self.arena.open(start_index, 0, NO_PARENT);
        self.open.push(Reverse((h, h, start_index as u32)));

        while let Some(Reverse((_, _, index))) = self.open.pop() {
            let current = index as usize;
            if self.arena.is_closed(current) {
                continue;
            }
            self.arena.closed[current] = self.arena.generation;

            if current == goal_index {
                let path = self.reconstruct(goal_index);
                self.last_cost = Some(path.cost);
                return Some(path);
            }

            let cell = self.grid.cell_at(current);
            let g = self.arena.g[current];
            for (dx, dy, step) in NEIGHBORS {
                let next = Cell::new(cell.x + dx, cell.y + dy);
                if !self.grid.is_walkable(next.x, next.y) {
                    continue;
                }
                let Some(n) = self.grid.index(next) else {
                    continue;
                };
                if self.arena.is_closed(n) {
                    continue;
                }
                let tentative = g + step;
                if !self.arena.is_seen(n) || tentative < self.arena.g[n] {
                    self.arena.open(n, tentative, current as u32);
                    let h = octile_distance(next, goal);
                    self.open.push(Reverse((tentative + h, h, n as u32)));
                }
            }
        }

        tracing::debug!(
            start_x = start.x,
            start_y = start.y,
            goal_x = goal.x,
            goal_y = goal.y,
            "goal unreachable"
        );
        None
    }

    fn reconstruct(&self, goal_index: usize) -> CellPath {
        let mut cells = Vec::new();
        let mut index = goal_index;
        while self.arena.parent[index] != NO_PARENT {
            cells.push(self.grid.cell_at(index));
            index = self.arena.parent[index] as usize;
        }
        cells.reverse();
        CellPath {
            cells,
            cost: self.arena.g[goal_index],
        }
    }
}
