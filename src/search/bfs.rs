use std::collections::VecDeque;

use crate::search::{GridSearch, StepResult};
use crate::tile::{Direction, Position, SearchMeta, TileKind};
use crate::tile_grid::TileGrid;

/// Breadth-first search: FIFO frontier, uniform step cost. Guarantees a
/// shortest path in edge count; makes no promise about turns.
pub struct Bfs {
    end: Position,
    queue: VecDeque<Position>,
    current: Option<Position>,
}

impl Bfs {
    pub fn new(grid: &mut TileGrid, start: Position, end: Position) -> Bfs {
        let tile = grid.at_mut(start);
        tile.in_frontier = true;
        tile.meta = SearchMeta::Steps(0);
        Bfs {
            end,
            queue: VecDeque::new(),
            current: Some(start),
        }
    }
}

impl GridSearch for Bfs {
    fn step(&mut self, grid: &mut TileGrid) -> StepResult {
        let Some(current) = self.current else {
            return StepResult::Unreachable;
        };
        if current == self.end {
            return StepResult::Found;
        }
        let steps = match grid.at(current).meta {
            SearchMeta::Steps(steps) => steps,
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
            tile.parents.push(current);
            tile.facing = Some(dir);
            tile.meta = SearchMeta::Steps(steps + 1);
            tile.kind = TileKind::Queued;
            tile.in_frontier = true;
            self.queue.push_back(next);
        }
        grid.at_mut(current).kind = TileKind::Routed;
        self.current = self.queue.pop_front();
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

    fn drive(search: &mut dyn GridSearch, grid: &mut TileGrid) -> StepResult {
        loop {
            match search.step(grid) {
                StepResult::Continue => {}
                done => return done,
            }
        }
    }

    #[test]
    fn reaches_end_around_obstacle() {
        // S#.
        // .#.
        // ..E
        let mut grid = TileGrid::new(3, 3).unwrap();
        grid.set_obstacle(0, 1);
        grid.set_obstacle(1, 1);
        let start = Position::new(0, 0);
        let end = Position::new(2, 2);
        let mut bfs = Bfs::new(&mut grid, start, end);
        assert_eq!(drive(&mut bfs, &mut grid), StepResult::Found);
        // Shortest distance around the wall is recorded on the end tile.
        assert_eq!(grid.at(end).meta, SearchMeta::Steps(4));
        assert_eq!(grid.at(end).parents.len(), 1);
    }

    #[test]
    fn walled_end_is_unreachable() {
        let mut grid = TileGrid::new(3, 3).unwrap();
        grid.set_obstacle(0, 1);
        grid.set_obstacle(1, 1);
        grid.set_obstacle(2, 1);
        let mut bfs = Bfs::new(&mut grid, Position::new(0, 0), Position::new(0, 2));
        assert_eq!(
            drive(&mut bfs, &mut grid),
            StepResult::Unreachable
        );
    }

    #[test]
    fn one_expansion_per_step() {
        let mut grid = TileGrid::new(2, 2).unwrap();
        let mut bfs = Bfs::new(&mut grid, Position::new(0, 0), Position::new(1, 1));
        assert_eq!(bfs.step(&mut grid), StepResult::Continue);
        let routed = grid
            .tiles()
            .iter()
            .filter(|t| t.kind == TileKind::Routed)
            .count();
        let heads = grid
            .tiles()
            .iter()
            .filter(|t| t.kind == TileKind::Head)
            .count();
        assert_eq!((routed, heads), (1, 1));
    }

    #[test]
    fn discovered_tiles_are_not_requeued() {
        let mut grid = TileGrid::new(3, 3).unwrap();
        let mut bfs = Bfs::new(&mut grid, Position::new(1, 1), Position::new(2, 2));
        while bfs.step(&mut grid) == StepResult::Continue {}
        // Every tile has at most one discovery, so at most one parent.
        assert!(grid.tiles().iter().all(|t| t.parents.len() <= 1));
    }
}
