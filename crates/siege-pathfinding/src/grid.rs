//! Walkability grid rasterized from world-space obstacles.

use glam::Vec2;

/// Integer grid coordinates. Column `x`, row `y`, origin at the world origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The 8 neighbor offsets with their step cost (10 axis, 14 diagonal).
pub(crate) const NEIGHBORS: [(i32, i32, u32); 8] = [
    (1, 0, 10),
    (-1, 0, 10),
    (0, 1, 10),
    (0, -1, 10),
    (1, 1, 14),
    (1, -1, 14),
    (-1, 1, 14),
    (-1, -1, 14),
];

/// Octile distance scaled by 10: exact path cost between two cells on an
/// open grid under the 10/14 step metric.
pub fn octile_distance(a: Cell, b: Cell) -> u32 {
    let dx = (a.x - b.x).unsigned_abs();
    let dy = (a.y - b.y).unsigned_abs();
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    14 * lo + 10 * (hi - lo)
}

/// Rectangular walkable/obstacle grid covering `[0, width) x [0, height)` cells.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cell_size: f32,
    blocked: Vec<bool>,
}

impl Grid {
    /// Grid covering a world of the given size, fully walkable.
    pub fn new(world_width: f32, world_height: f32, cell_size: f32) -> Self {
        let width = (world_width / cell_size).ceil().max(1.0) as usize;
        let height = (world_height / cell_size).ceil().max(1.0) as usize;
        Self::with_cells(width, height, cell_size)
    }

    /// Grid with an explicit cell count.
    pub fn with_cells(width: usize, height: usize, cell_size: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
            blocked: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    pub(crate) fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.y as usize * self.width + cell.x as usize)
    }

    pub(crate) fn cell_at(&self, index: usize) -> Cell {
        Cell::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Mark a cell blocked or walkable. Out-of-bounds cells are ignored.
    pub fn set_obstacle(&mut self, x: i32, y: i32, blocked: bool) {
        if let Some(i) = self.index(Cell::new(x, y)) {
            self.blocked[i] = blocked;
        }
    }

    /// False for obstacles and for cells outside the grid.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.index(Cell::new(x, y)).is_some_and(|i| !self.blocked[i])
    }

    /// Block or clear every cell whose center lies inside the world-space
    /// rectangle `[min, max]`. Returns the number of cells touched.
    pub fn set_obstacle_rect(&mut self, min: Vec2, max: Vec2, blocked: bool) -> usize {
        let c = self.cell_size;
        let x0 = ((min.x / c) - 0.5).ceil().max(0.0) as i32;
        let y0 = ((min.y / c) - 0.5).ceil().max(0.0) as i32;
        let x1 = ((max.x / c) - 0.5).floor() as i32;
        let y1 = ((max.y / c) - 0.5).floor() as i32;

        let mut touched = 0;
        for y in y0..=y1 {
            for x in x0..=x1 {
                if self.in_bounds(Cell::new(x, y)) {
                    self.set_obstacle(x, y, blocked);
                    touched += 1;
                }
            }
        }
        touched
    }

    pub fn obstacle_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Cell containing a world position, `None` outside the grid.
    pub fn world_to_cell(&self, position: Vec2) -> Option<Cell> {
        if !position.x.is_finite() || !position.y.is_finite() || position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let cell = Cell::new(
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        );
        self.in_bounds(cell).then_some(cell)
    }

    /// World position of a cell's center.
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            (cell.x as f32 + 0.5) * self.cell_size,
            (cell.y as f32 + 0.5) * self.cell_size,
        )
    }

    /// Nearest walkable cell within `max_radius` rings of `origin`, the origin
    /// itself included. Ties go to the first cell in scan order.
    pub fn nearest_walkable(&self, origin: Cell, max_radius: i32) -> Option<Cell> {
        if self.is_walkable(origin.x, origin.y) {
            return Some(origin);
        }
        for radius in 1..=max_radius {
            let mut best: Option<(u32, Cell)> = None;
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx.abs() != radius && dy.abs() != radius {
                        continue;
                    }
                    let cell = Cell::new(origin.x + dx, origin.y + dy);
                    if !self.is_walkable(cell.x, cell.y) {
                        continue;
                    }
                    let d = octile_distance(origin, cell);
                    if best.map_or(true, |(bd, _)| d < bd) {
                        best = Some((d, cell));
                    }
                }
            }
            if let Some((_, cell)) = best {
                return Some(cell);
            }
        }
        None
    }
}
