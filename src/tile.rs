use core::fmt;

use smallvec::SmallVec;

/// Cardinal movement direction on the grid. `Up` decreases the row index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in the probing order used during expansion.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// The (row, col) offset of a single step in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// A (row, col) coordinate pair. Tiles refer to each other by position, never
/// by pointer, so parent links cannot form cycles of ownership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }

    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Straight-line distance, used as the A* heuristic.
    pub fn euclidean_distance(&self, other: &Position) -> f64 {
        let delta_row = self.row as f64 - other.row as f64;
        let delta_col = self.col as f64 - other.col as f64;
        (delta_row * delta_row + delta_col * delta_col).sqrt()
    }

    /// The direction of a single step from `self` to an adjacent position, or
    /// [None] if the positions are not cardinal neighbours.
    pub fn direction_to(&self, other: &Position) -> Option<Direction> {
        let delta_row = other.row as isize - self.row as isize;
        let delta_col = other.col as isize - self.col as isize;
        match (delta_row, delta_col) {
            (-1, 0) => Some(Direction::Up),
            (0, 1) => Some(Direction::Right),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Mutually exclusive visitation/role state of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    Empty,
    Obstacle,
    /// Discovered and waiting in the frontier.
    Queued,
    /// Expanded.
    Routed,
    /// The tile currently being expanded.
    Head,
    /// Part of the reconstructed path.
    Path,
}

/// Algorithm-specific cost bookkeeping. Exactly one variant is in play per
/// run, depending on the selected algorithm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SearchMeta {
    None,
    /// Steps from the start tile (BFS/DFS).
    Steps(u32),
    /// Turns taken to reach the tile (least-turns wavefront).
    Turns(u32),
    /// Accumulated step count and heuristic-augmented score (A*).
    Scores { g: u32, f: f64 },
}

/// One cell of the grid together with its search state.
///
/// `row` and `col` are fixed at creation; everything else is either painted
/// by the caller (kind, start/end flags) or written by the active search and
/// cleared by [TileGrid::reset](crate::TileGrid::reset).
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
    pub kind: TileKind,
    pub is_start: bool,
    pub is_end: bool,
    /// Prevents re-enqueueing by BFS/DFS/A*.
    pub in_frontier: bool,
    /// The direction taken to reach this tile from its first parent.
    pub facing: Option<Direction>,
    /// Equal-cost predecessors, in discovery order. BFS/DFS/A* record at most
    /// one; the least-turns search may record up to four.
    pub parents: SmallVec<[Position; 4]>,
    pub meta: SearchMeta,
}

impl Tile {
    pub fn new(row: usize, col: usize) -> Tile {
        Tile {
            row,
            col,
            kind: TileKind::Empty,
            is_start: false,
            is_end: false,
            in_frontier: false,
            facing: None,
            parents: SmallVec::new(),
            meta: SearchMeta::None,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// The scalar cost recorded by the active algorithm, if any. Used by
    /// renderers for gradient colouring.
    pub fn cost_so_far(&self) -> Option<u32> {
        match self.meta {
            SearchMeta::None => None,
            SearchMeta::Steps(steps) => Some(steps),
            SearchMeta::Turns(turns) => Some(turns),
            SearchMeta::Scores { g, .. } => Some(g),
        }
    }

    /// Clears all transient search fields, leaving kind and flags untouched.
    pub fn clear_search_state(&mut self) {
        self.in_frontier = false;
        self.facing = None;
        self.parents.clear();
        self.meta = SearchMeta::None;
    }
}
