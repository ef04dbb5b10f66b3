use crate::search::{GridSearch, StepResult};
use crate::tile::{Direction, Position, SearchMeta, TileKind};
use crate::tile_grid::TileGrid;

/// Depth-first search: LIFO frontier, otherwise the same discovery rule as
/// BFS. Makes no shortest-path guarantee; included for contrast in the
/// visualization.
pub struct Dfs {
    end: Position,
    stack: Vec<Position>,
    current: Option<Position>,
}

impl Dfs {
    pub fn new(grid: &mut TileGrid, start: Position, end: Position) -> Dfs {
        let tile = grid.at_mut(start);
        tile.in_frontier = true;
        tile.meta = SearchMeta::Steps(0);
        Dfs {
            end,
            stack: Vec::new(),
            current: Some(start),
        }
    }
}

impl GridSearch for Dfs {
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
            self.stack.push(next);
        }
        grid.at_mut(current).kind = TileKind::Routed;
        self.current = self.stack.pop();
        match self.current {
            Some(next) => {
                grid.at_mut(next).kind = TileKind::Head;
                StepResult::Continue
            }
            None => StepResult::Unreachable,
        }
    }
}
