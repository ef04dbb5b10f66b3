use crate::tile::Position;
use crate::tile_grid::TileGrid;

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod least_turns;

pub use astar::AStar;
pub use bfs::Bfs;
pub use dfs::Dfs;
pub use least_turns::LeastTurns;

/// The result of advancing a search by one unit of work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// One tile was expanded; the frontier is not empty.
    Continue,
    /// The end tile was dequeued; hand off to the backtracker.
    Found,
    /// The frontier emptied without reaching the end tile.
    Unreachable,
}

/// A search that can be advanced one frontier expansion at a time.
///
/// Every `step` marks exactly one tile as expanded (Routed), zero or more
/// newly discovered tiles as Queued with a parent link and a facing
/// direction, and the next tile to expand as Head, then yields control.
/// Algorithms never enqueue obstacle tiles.
pub trait GridSearch {
    fn step(&mut self, grid: &mut TileGrid) -> StepResult;
}

/// Selects one of the four search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Bfs,
    Dfs,
    LeastTurns,
    AStar,
}

impl Algorithm {
    /// Builds the selected search over `grid`, priming the start tile into
    /// the frontier.
    pub fn build(
        self,
        grid: &mut TileGrid,
        start: Position,
        end: Position,
    ) -> Box<dyn GridSearch> {
        match self {
            Algorithm::Bfs => Box::new(Bfs::new(grid, start, end)),
            Algorithm::Dfs => Box::new(Dfs::new(grid, start, end)),
            Algorithm::LeastTurns => Box::new(LeastTurns::new(grid, start, end)),
            Algorithm::AStar => Box::new(AStar::new(grid, start, end)),
        }
    }

    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::LeastTurns,
        Algorithm::AStar,
    ];
}
