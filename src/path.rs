use itertools::Itertools;
use log::warn;

use crate::tile::{Direction, Position, TileKind};
use crate::tile_grid::TileGrid;

/// A completed path from start to end with its derived metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// Tile positions in start-to-end order.
    pub tiles: Vec<Position>,
    /// Edge count.
    pub length: usize,
    /// Number of direction changes along the tile sequence.
    pub turn_count: usize,
}

impl Path {
    /// Builds a path from a start-to-end position sequence, deriving length
    /// and turn count.
    pub fn new(tiles: Vec<Position>) -> Path {
        let length = tiles.len().saturating_sub(1);
        let turn_count = tiles
            .iter()
            .tuple_windows()
            .filter_map(|(a, b)| a.direction_to(b))
            .tuple_windows()
            .filter(|(a, b)| a != b)
            .count();
        Path {
            tiles,
            length,
            turn_count,
        }
    }
}

/// The result of advancing the backtracker by one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BacktrackStep {
    Continue,
    /// The start tile has been marked; the walk is complete.
    Done,
}

/// Walks parent links from the end tile back to the start tile, one tile per
/// step, marking each visited tile as part of the path and keeping running
/// length and turn-count metrics.
///
/// At a tile with multiple equal-cost parents the parent whose edge continues
/// the current backtracking direction is preferred, which resolves ties
/// toward the straightest path; with no continuing parent the first recorded
/// parent is the canonical default.
pub struct Backtracker {
    start: Position,
    current: Option<Position>,
    /// Forward direction of the most recently consumed edge.
    walk_direction: Option<Direction>,
    visited: Vec<Position>,
    length: usize,
    turn_count: usize,
}

impl Backtracker {
    /// Starts a walk at the end tile. Only valid after a search reported the
    /// end tile as found; an unreachable end must not be backtracked.
    pub fn new(end: Position, start: Position) -> Backtracker {
        Backtracker {
            start,
            current: Some(end),
            walk_direction: None,
            visited: Vec::new(),
            length: 0,
            turn_count: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.current.is_none()
    }

    /// Edges walked so far.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Direction changes seen so far.
    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    /// Marks one tile as part of the path and follows one parent link.
    pub fn step(&mut self, grid: &mut TileGrid) -> BacktrackStep {
        let Some(current) = self.current else {
            return BacktrackStep::Done;
        };
        grid.at_mut(current).kind = TileKind::Path;
        self.visited.push(current);
        if current == self.start {
            self.current = None;
            return BacktrackStep::Done;
        }
        let parents = &grid.at(current).parents;
        let continuing = self.walk_direction.and_then(|walk| {
            parents
                .iter()
                .copied()
                .find(|parent| parent.direction_to(&current) == Some(walk))
        });
        let parent = continuing.or_else(|| parents.first().copied());
        match parent {
            Some(parent) => {
                let edge = parent.direction_to(&current);
                if let (Some(walk), Some(edge)) = (self.walk_direction, edge) {
                    if walk != edge {
                        self.turn_count += 1;
                    }
                }
                self.walk_direction = edge;
                self.length += 1;
                self.current = Some(parent);
                BacktrackStep::Continue
            }
            None => {
                // A found end always has a parent chain back to the start;
                // hitting this means the grid was mutated mid-run.
                warn!("parent chain broken at {}, abandoning backtrack", current);
                self.current = None;
                BacktrackStep::Done
            }
        }
    }

    /// Finishes the walk into a start-to-end [Path].
    pub fn into_path(mut self) -> Path {
        self.visited.reverse();
        Path::new(self.visited)
    }
}
