//! # grid_path_stepper
//!
//! A grid-based pathfinding engine built for animation. Four search
//! strategies ([breadth-first](https://en.wikipedia.org/wiki/Breadth-first_search),
//! depth-first, a turn-minimizing wavefront search and
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)) advance one
//! frontier expansion per [step](crate::GridSearch::step), mutating tile
//! state so a renderer can paint every intermediate frontier. Once the end
//! tile is dequeued, a steppable [Backtracker] walks parent links back to the
//! start, producing a [Path] with length and turn-count metrics. The
//! [StepScheduler] drives both phases one unit of work per timer tick.
//!
//! Movement is cardinal-only with uniform unit edge cost. Connected
//! components over the obstacle layout are pre-computed with a
//! [union-find](https://en.wikipedia.org/wiki/Disjoint-set_data_structure)
//! structure so callers can detect a doomed run without flood-filling.

pub mod error;
pub mod path;
pub mod scheduler;
pub mod search;
pub mod tile;
pub mod tile_grid;

#[cfg(test)]
mod fuzz_test;

pub use crate::error::GridError;
pub use crate::path::{BacktrackStep, Backtracker, Path};
pub use crate::scheduler::{RunOutcome, StepScheduler, TickEvent};
pub use crate::search::{AStar, Algorithm, Bfs, Dfs, GridSearch, LeastTurns, StepResult};
pub use crate::tile::{Direction, Position, SearchMeta, Tile, TileKind};
pub use crate::tile_grid::TileGrid;
