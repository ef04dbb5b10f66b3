use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::search::{GridSearch, StepResult};
use crate::tile::{Direction, Position, SearchMeta, TileKind};
use crate::tile_grid::TileGrid;

/// Frontier entry ordered for a min-heap on the estimated total cost. Ties
/// prefer the larger accumulated cost, favouring exploration of deeper nodes
/// first.
struct OpenEntry {
    estimated: f64,
    steps: u32,
    pos: Position,
}

impl Eq for OpenEntry {}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.estimated.total_cmp(&other.estimated) == Ordering::Equal && self.steps == other.steps
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.estimated.total_cmp(&self.estimated) {
            Ordering::Equal => self.steps.cmp(&other.steps),
            ordering => ordering,
        }
    }
}

/// A* with a Euclidean-distance heuristic over uniform unit-cost edges.
///
/// A tile keeps its first-discovery g-score: already-queued tiles are not
/// re-relaxed when a cheaper path to them turns up later. On a uniform-cost
/// cardinal grid the resulting paths are close to ties with BFS but not
/// guaranteed minimal; uniform unit cost is the only supported case.
pub struct AStar {
    end: Position,
    open: BinaryHeap<OpenEntry>,
    current: Option<Position>,
}

impl AStar {
    pub fn new(grid: &mut TileGrid, start: Position, end: Position) -> AStar {
        let tile = grid.at_mut(start);
        tile.in_frontier = true;
        tile.meta = SearchMeta::Scores {
            g: 0,
            f: start.euclidean_distance(&end),
        };
        AStar {
            end,
            open: BinaryHeap::new(),
            current: Some(start),
        }
    }
}

impl GridSearch for AStar {
    fn step(&mut self, grid: &mut TileGrid) -> StepResult {
        let Some(current) = self.current else {
            return StepResult::Unreachable;
        };
        if current == self.end {
            return StepResult::Found;
        }
        let steps = match grid.at(current).meta {
            SearchMeta::Scores { g, .. } => g,
            _ => 0,
        };
        for dir in Direction::ALL {
            let Some(next) = grid.neighbor(current, dir) else {
                continue;
            };
            let tile = grid.at_mut(next);
            if tile.kind != TileKind::Empty || tile.in_frontier {
                continue;
            }
            let g = steps + 1;
            let f = g as f64 + next.euclidean_distance(&self.end);
            tile.parents.push(current);
            tile.facing = Some(dir);
            tile.meta = SearchMeta::Scores { g, f };
            tile.kind = TileKind::Queued;
            tile.in_frontier = true;
            self.open.push(OpenEntry {
                estimated: f,
                steps: g,
                pos: next,
            });
        }
        grid.at_mut(current).kind = TileKind::Routed;
        self.current = self.open.pop().map(|entry| entry.pos);
        match self.current {
            Some(next) => {
                grid.at_mut(next).kind = TileKind::Head;
                StepResult::Continue
            }
            None => StepResult::Unreachable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Backtracker;

    fn drive(search: &mut AStar, grid: &mut TileGrid) -> StepResult {
        loop {
            match search.step(grid) {
                StepResult::Continue => {}
                done => return done,
            }
        }
    }

    #[test]
    fn equal_start_and_end_returns_immediately() {
        let mut grid = TileGrid::new(3, 3).unwrap();
        let start = Position::new(1, 1);
        let mut astar = AStar::new(&mut grid, start, start);
        assert_eq!(astar.step(&mut grid), StepResult::Found);
        // Nothing beyond the start tile was touched.
        assert!(grid
            .tiles()
            .iter()
            .all(|t| t.kind == TileKind::Empty && t.parents.is_empty()));
        let mut backtracker = Backtracker::new(start, start);
        while !backtracker.is_done() {
            backtracker.step(&mut grid);
        }
        let path = backtracker.into_path();
        assert_eq!((path.length, path.turn_count), (0, 0));
    }

    #[test]
    fn open_grid_path_is_direct() {
        let mut grid = TileGrid::new(5, 5).unwrap();
        let end = Position::new(4, 4);
        let mut astar = AStar::new(&mut grid, Position::new(0, 0), end);
        assert_eq!(drive(&mut astar, &mut grid), StepResult::Found);
        match grid.at(end).meta {
            SearchMeta::Scores { g, .. } => assert_eq!(g, 8),
            other => panic!("unexpected meta {:?}", other),
        }
    }

    #[test]
    fn heuristic_prunes_expansion() {
        // With the end straight ahead, A* should route no tiles behind the
        // start while BFS would flood the whole row.
        let mut grid = TileGrid::new(1, 9).unwrap();
        let mut astar = AStar::new(&mut grid, Position::new(0, 4), Position::new(0, 8));
        assert_eq!(drive(&mut astar, &mut grid), StepResult::Found);
        assert_ne!(grid.at(Position::new(0, 0)).kind, TileKind::Routed);
    }

    #[test]
    fn walled_end_is_unreachable() {
        let mut grid = TileGrid::new(3, 3).unwrap();
        grid.set_obstacle(0, 1);
        grid.set_obstacle(1, 1);
        grid.set_obstacle(2, 1);
        let mut astar = AStar::new(&mut grid, Position::new(0, 0), Position::new(0, 2));
        assert_eq!(drive(&mut astar, &mut grid), StepResult::Unreachable);
    }
}
