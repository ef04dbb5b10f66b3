use core::fmt;

use itertools::iproduct;
use log::info;
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;

use crate::error::GridError;
use crate::tile::{Direction, Position, Tile, TileKind};

/// A rectangular grid of [Tile]s with a designated start and end, plus
/// connected components over the obstacle layout maintained in a [UnionFind]
/// structure. Components let callers answer "is there any path at all?"
/// without running a search; edits that could split a component mark the
/// structure dirty, and [update](TileGrid::update) regenerates it on demand.
///
/// Dimensions are fixed after construction. Re-initialization means building
/// a new grid, which discards all tile state.
///
/// At most one search run may mutate a grid at a time; the scheduler enforces
/// this by cancelling any active run before starting a new one. Painting
/// obstacles while a run is active is not checked and leaves the search state
/// inconsistent — callers should not mutate a grid mid-run.
#[derive(Clone, Debug)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    rows: usize,
    cols: usize,
    start: Option<Position>,
    end: Option<Position>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl TileGrid {
    /// Allocates a `rows x cols` grid of empty tiles with no start or end
    /// designated.
    pub fn new(rows: usize, cols: usize) -> Result<TileGrid, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let mut tiles = Vec::with_capacity(rows * cols);
        for (row, col) in iproduct!(0..rows, 0..cols) {
            tiles.push(Tile::new(row, col));
        }
        let mut grid = TileGrid {
            tiles,
            rows,
            cols,
            start: None,
            end: None,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn end(&self) -> Option<Position> {
        self.end
    }

    /// All tiles in row-major order, for rendering.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    pub(crate) fn at(&self, pos: Position) -> &Tile {
        &self.tiles[pos.row * self.cols + pos.col]
    }

    pub(crate) fn at_mut(&mut self, pos: Position) -> &mut Tile {
        &mut self.tiles[pos.row * self.cols + pos.col]
    }

    /// Bounds-checked tile access.
    pub fn tile(&self, row: usize, col: usize) -> Result<&Tile, GridError> {
        if self.in_bounds(row, col) {
            Ok(self.at(Position::new(row, col)))
        } else {
            Err(self.out_of_range(row, col))
        }
    }

    /// Bounds-checked mutable tile access.
    pub fn tile_mut(&mut self, row: usize, col: usize) -> Result<&mut Tile, GridError> {
        if self.in_bounds(row, col) {
            Ok(self.at_mut(Position::new(row, col)))
        } else {
            Err(self.out_of_range(row, col))
        }
    }

    /// Bounds-checked tile access by row-major index.
    pub fn tile_at_index(&self, index: usize) -> Result<&Tile, GridError> {
        self.tiles
            .get(index)
            .ok_or_else(|| self.out_of_range(index / self.cols, index % self.cols))
    }

    fn out_of_range(&self, row: usize, col: usize) -> GridError {
        GridError::OutOfRange {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// The cardinal neighbour of `pos` in the given direction, or [None] at a
    /// grid edge. No wraparound.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (delta_row, delta_col) = direction.offset();
        let row = pos.row.checked_add_signed(delta_row)?;
        let col = pos.col.checked_add_signed(delta_col)?;
        self.in_bounds(row, col).then_some(Position::new(row, col))
    }

    /// Up to 4 cardinal neighbours in Up/Right/Down/Left order.
    pub fn neighbors(&self, pos: Position) -> SmallVec<[Position; 4]> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.neighbor(pos, dir))
            .collect()
    }

    /// Designates the tile at the given position as the start tile, clearing
    /// the flag from the previous holder and any obstacle on the target.
    /// No-op if the position is out of range or already holds a start or end
    /// flag, so repeated painting is safe.
    pub fn set_start(&mut self, row: usize, col: usize) {
        if !self.in_bounds(row, col) {
            return;
        }
        let pos = Position::new(row, col);
        let tile = self.at(pos);
        if tile.is_start || tile.is_end {
            return;
        }
        self.clear_obstacle_at(pos);
        if let Some(previous) = self.start.take() {
            self.at_mut(previous).is_start = false;
        }
        self.at_mut(pos).is_start = true;
        self.start = Some(pos);
    }

    /// Designates the tile at the given position as the end tile. Same no-op
    /// rules as [set_start](TileGrid::set_start).
    pub fn set_end(&mut self, row: usize, col: usize) {
        if !self.in_bounds(row, col) {
            return;
        }
        let pos = Position::new(row, col);
        let tile = self.at(pos);
        if tile.is_start || tile.is_end {
            return;
        }
        self.clear_obstacle_at(pos);
        if let Some(previous) = self.end.take() {
            self.at_mut(previous).is_end = false;
        }
        self.at_mut(pos).is_end = true;
        self.end = Some(pos);
    }

    /// Marks the tile at the given position as an obstacle. No-op when the
    /// position is out of range or the tile is the start or end tile.
    /// Placing an obstacle can split a component, so the component structure
    /// is only flagged dirty here.
    pub fn set_obstacle(&mut self, row: usize, col: usize) {
        if !self.in_bounds(row, col) {
            return;
        }
        let tile = self.at_mut(Position::new(row, col));
        if tile.is_start || tile.is_end || tile.kind == TileKind::Obstacle {
            return;
        }
        tile.kind = TileKind::Obstacle;
        self.components_dirty = true;
    }

    /// Clears an obstacle at the given position. Out-of-range positions are
    /// treated as a no-op rather than a fault.
    pub fn remove_obstacle(&mut self, row: usize, col: usize) {
        if !self.in_bounds(row, col) {
            return;
        }
        self.clear_obstacle_at(Position::new(row, col));
    }

    /// Clearing an obstacle only ever joins components, so the union can be
    /// done immediately without a regeneration pass.
    fn clear_obstacle_at(&mut self, pos: Position) {
        if self.at(pos).kind != TileKind::Obstacle {
            return;
        }
        self.at_mut(pos).kind = TileKind::Empty;
        let ix = self.index(pos);
        for neighbor in self.neighbors(pos) {
            if self.at(neighbor).kind != TileKind::Obstacle {
                let neighbor_ix = self.index(neighbor);
                self.components.union(ix, neighbor_ix);
            }
        }
    }

    /// Clears all obstacles, then independently marks every non-start,
    /// non-end tile as an obstacle with the given probability. Probabilities
    /// outside [0, 1] are rejected, not clamped.
    pub fn randomize<R: Rng>(&mut self, probability: f64, rng: &mut R) -> Result<(), GridError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(GridError::InvalidProbability(probability));
        }
        self.clear_obstacles();
        for tile in self.tiles.iter_mut() {
            if !tile.is_start && !tile.is_end && rng.gen_bool(probability) {
                tile.kind = TileKind::Obstacle;
            }
        }
        self.components_dirty = true;
        Ok(())
    }

    fn clear_obstacles(&mut self) {
        for tile in self.tiles.iter_mut() {
            if tile.kind == TileKind::Obstacle {
                tile.kind = TileKind::Empty;
            }
        }
        self.components_dirty = true;
    }

    /// Restores every non-obstacle tile to Empty and clears all transient
    /// search state, preserving the start/end designation and the obstacle
    /// layout. Run this between searches on the same layout; calling it twice
    /// is the same as calling it once.
    pub fn reset(&mut self) {
        for tile in self.tiles.iter_mut() {
            if tile.kind != TileKind::Obstacle {
                tile.kind = TileKind::Empty;
            }
            tile.clear_search_state();
        }
    }

    /// The largest recorded cost across all tiles, for gradient colouring.
    pub fn max_cost_so_far(&self) -> u32 {
        self.tiles
            .iter()
            .filter_map(Tile::cost_so_far)
            .max()
            .unwrap_or(0)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and joins cardinally adjacent
    /// non-obstacle tiles into the same components.
    pub fn generate_components(&mut self) {
        info!("generating connected components");
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for (row, col) in iproduct!(0..self.rows, 0..self.cols) {
            let pos = Position::new(row, col);
            if self.at(pos).kind == TileKind::Obstacle {
                continue;
            }
            let ix = self.index(pos);
            // Right and Down cover every edge once over the full sweep.
            for next in [
                self.neighbor(pos, Direction::Right),
                self.neighbor(pos, Direction::Down),
            ]
            .into_iter()
            .flatten()
            {
                if self.at(next).kind != TileKind::Obstacle {
                    let next_ix = self.index(next);
                    self.components.union(ix, next_ix);
                }
            }
        }
    }

    /// Checks if start and end are on the same component.
    pub fn reachable(&self, start: &Position, end: &Position) -> bool {
        !self.unreachable(start, end)
    }

    /// Checks if start and end are not on the same component. Out-of-range
    /// positions are unreachable by definition.
    pub fn unreachable(&self, start: &Position, end: &Position) -> bool {
        if self.in_bounds(start.row, start.col) && self.in_bounds(end.row, end.col) {
            let start_ix = self.index(*start);
            let end_ix = self.index(*end);
            if self.components.equiv(start_ix, end_ix) {
                false
            } else {
                info!("{} and {} are on different components", start, end);
                true
            }
        } else {
            true
        }
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let tile = self.at(Position::new(row, col));
                let c = if tile.is_start {
                    'S'
                } else if tile.is_end {
                    'E'
                } else {
                    match tile.kind {
                        TileKind::Empty => '.',
                        TileKind::Obstacle => '#',
                        TileKind::Queued => '+',
                        TileKind::Routed => 'o',
                        TileKind::Head => '@',
                        TileKind::Path => '*',
                    }
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
