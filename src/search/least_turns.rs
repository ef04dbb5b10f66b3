use std::collections::VecDeque;
use std::mem;

use crate::search::{GridSearch, StepResult};
use crate::tile::{Direction, Position, SearchMeta, TileKind};
use crate::tile_grid::TileGrid;

/// Turn-minimizing wavefront search: a cost-scaled BFS where the cost is the
/// number of turns, not the distance. `current_wave` holds tiles reachable
/// with the current turn count; a discovery that requires one extra turn
/// goes into `next_wave`. When the current wave empties, the next wave is
/// promoted and the turn level increments.
///
/// A strictly cheaper rediscovery overwrites cost and parent and re-enqueues
/// the tile; the stale entry already sitting in a wave is left there and may
/// cause a redundant (harmless) re-expansion. An equal-cost rediscovery
/// appends the extra parent without re-enqueueing, so the backtracker can
/// tie-break between equal-turn predecessors.
pub struct LeastTurns {
    end: Position,
    current_wave: VecDeque<Position>,
    next_wave: VecDeque<Position>,
    turn_level: u32,
    current: Option<Position>,
}

impl LeastTurns {
    pub fn new(grid: &mut TileGrid, start: Position, end: Position) -> LeastTurns {
        let tile = grid.at_mut(start);
        tile.in_frontier = true;
        tile.meta = SearchMeta::Turns(0);
        LeastTurns {
            end,
            current_wave: VecDeque::new(),
            next_wave: VecDeque::new(),
            turn_level: 0,
            current: Some(start),
        }
    }

    /// The turn count of the wave currently being expanded.
    pub fn turn_level(&self) -> u32 {
        self.turn_level
    }

    fn pop_next(&mut self) -> Option<Position> {
        loop {
            if let Some(pos) = self.current_wave.pop_front() {
                return Some(pos);
            }
            if self.next_wave.is_empty() {
                return None;
            }
            mem::swap(&mut self.current_wave, &mut self.next_wave);
            self.turn_level += 1;
        }
    }
}

impl GridSearch for LeastTurns {
    fn step(&mut self, grid: &mut TileGrid) -> StepResult {
        let Some(current) = self.current else {
            return StepResult::Unreachable;
        };
        if current == self.end {
            return StepResult::Found;
        }
        let (incoming, turns) = {
            let tile = grid.at(current);
            let turns = match tile.meta {
                SearchMeta::Turns(turns) => turns,
                _ => 0,
            };
            (tile.facing, turns)
        };
        for dir in Direction::ALL {
            // Never step straight back into the parent.
            if incoming == Some(dir.opposite()) {
                continue;
            }
            let Some(next) = grid.neighbor(current, dir) else {
                continue;
            };
            let turn = match incoming {
                None => 0,
                Some(facing) if facing == dir => 0,
                Some(_) => 1,
            };
            let candidate = turns + turn;
            let tile = grid.at_mut(next);
            if tile.kind == TileKind::Obstacle {
                continue;
            }
            match tile.meta {
                SearchMeta::Turns(existing) if candidate < existing => {
                    tile.meta = SearchMeta::Turns(candidate);
                    tile.parents.clear();
                    tile.parents.push(current);
                    tile.facing = Some(dir);
                    // The stale wave entry is tolerated, not removed.
                    if turn == 0 {
                        self.current_wave.push_back(next);
                    } else {
                        self.next_wave.push_back(next);
                    }
                }
                SearchMeta::Turns(existing) if candidate == existing => {
                    if !tile.parents.contains(&current) {
                        tile.parents.push(current);
                    }
                }
                SearchMeta::Turns(_) => {}
                _ => {
                    // First discovery.
                    tile.meta = SearchMeta::Turns(candidate);
                    tile.parents.push(current);
                    tile.facing = Some(dir);
                    tile.kind = TileKind::Queued;
                    tile.in_frontier = true;
                    if turn == 0 {
                        self.current_wave.push_back(next);
                    } else {
                        self.next_wave.push_back(next);
                    }
                }
            }
        }
        grid.at_mut(current).kind = TileKind::Routed;
        self.current = self.pop_next();
        match self.current {
            Some(next) => {
                grid.at_mut(next).kind = TileKind::Head;
                StepResult::Continue
            }
            None => StepResult::Unreachable,
        }
    }
}
