use std::time::{Duration, Instant};

use log::info;

use crate::error::GridError;
use crate::path::{BacktrackStep, Backtracker, Path};
use crate::search::{Algorithm, GridSearch, StepResult};
use crate::tile::Position;
use crate::tile_grid::TileGrid;

/// What a single scheduler tick produced.
#[derive(Debug)]
pub enum TickEvent {
    /// No active run, or the step interval has not elapsed yet.
    Idle,
    /// One frontier expansion was performed.
    Advanced,
    /// One backtracking step was performed; metrics so far.
    PathStep { length: usize, turn_count: usize },
    /// The run terminated and has been cleared.
    Finished(RunOutcome),
}

/// Terminal outcome of a run. An unreachable end tile is a normal outcome,
/// not an error; no reconstruction is attempted for it.
#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
    Found(Path),
    Unreachable,
}

enum RunPhase {
    Searching(Box<dyn GridSearch>),
    Backtracking(Backtracker),
}

struct ActiveRun {
    algorithm: Algorithm,
    phase: RunPhase,
    start: Position,
    end: Position,
}

/// Drives a search one unit of work per tick so a caller can repaint between
/// ticks. Single-threaded and cooperative: nothing blocks within a tick, and
/// cancellation takes effect between ticks with no further tile mutation.
///
/// At most one run is active at a time; starting a new run first cancels the
/// active one. The interval can be changed mid-run without restarting.
pub struct StepScheduler {
    interval: Duration,
    next_due: Option<Instant>,
    run: Option<ActiveRun>,
}

impl StepScheduler {
    pub fn new(interval: Duration) -> Result<StepScheduler, GridError> {
        if interval.is_zero() {
            return Err(GridError::InvalidInterval);
        }
        Ok(StepScheduler {
            interval,
            next_due: None,
            run: None,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Changes the per-step interval without restarting the run; the next
    /// step is rescheduled one new interval from now.
    pub fn set_interval(&mut self, interval: Duration) -> Result<(), GridError> {
        if interval.is_zero() {
            return Err(GridError::InvalidInterval);
        }
        self.interval = interval;
        if self.run.is_some() {
            self.next_due = Some(Instant::now() + interval);
        }
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Begins a run of the selected algorithm, cancelling any active run and
    /// clearing transient search state left over from a previous one. Fails
    /// if the grid has no start or no end tile designated.
    pub fn start(&mut self, grid: &mut TileGrid, algorithm: Algorithm) -> Result<(), GridError> {
        if self.run.is_some() {
            self.cancel();
        }
        let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
            return Err(GridError::EndpointsNotSet);
        };
        grid.reset();
        let search = algorithm.build(grid, start, end);
        info!("starting {:?} run from {} to {}", algorithm, start, end);
        self.run = Some(ActiveRun {
            algorithm,
            phase: RunPhase::Searching(search),
            start,
            end,
        });
        self.next_due = Some(Instant::now() + self.interval);
        Ok(())
    }

    /// Cancels the active run, if any. No tile is mutated afterwards; the
    /// grid keeps whatever intermediate state the run had painted.
    pub fn cancel(&mut self) {
        if let Some(run) = self.run.take() {
            info!("cancelling {:?} run", run.algorithm);
        }
        self.next_due = None;
    }

    /// Performs one unit of work immediately: one frontier expansion or one
    /// backtracking step.
    pub fn tick(&mut self, grid: &mut TileGrid) -> TickEvent {
        let Some(mut run) = self.run.take() else {
            return TickEvent::Idle;
        };
        let (phase, event) = match run.phase {
            RunPhase::Searching(mut search) => match search.step(grid) {
                StepResult::Continue => (Some(RunPhase::Searching(search)), TickEvent::Advanced),
                StepResult::Found => (
                    Some(RunPhase::Backtracking(Backtracker::new(run.end, run.start))),
                    TickEvent::Advanced,
                ),
                StepResult::Unreachable => {
                    info!("{:?} exhausted its frontier before reaching {}", run.algorithm, run.end);
                    (None, TickEvent::Finished(RunOutcome::Unreachable))
                }
            },
            RunPhase::Backtracking(mut backtracker) => match backtracker.step(grid) {
                BacktrackStep::Continue => {
                    let event = TickEvent::PathStep {
                        length: backtracker.length(),
                        turn_count: backtracker.turn_count(),
                    };
                    (Some(RunPhase::Backtracking(backtracker)), event)
                }
                BacktrackStep::Done => {
                    let path = backtracker.into_path();
                    info!(
                        "{:?} found a path of length {} with {} turns",
                        run.algorithm, path.length, path.turn_count
                    );
                    (None, TickEvent::Finished(RunOutcome::Found(path)))
                }
            },
        };
        match phase {
            Some(phase) => {
                run.phase = phase;
                self.run = Some(run);
            }
            None => self.next_due = None,
        }
        event
    }

    /// Performs one unit of work if the step interval has elapsed, otherwise
    /// reports [TickEvent::Idle]. Callers poll this from their frame or event
    /// loop.
    pub fn poll(&mut self, grid: &mut TileGrid) -> TickEvent {
        if self.run.is_none() {
            return TickEvent::Idle;
        }
        let now = Instant::now();
        match self.next_due {
            Some(due) if now < due => TickEvent::Idle,
            _ => {
                self.next_due = Some(now + self.interval);
                self.tick(grid)
            }
        }
    }

    /// Drives the active run to termination ignoring the interval. The entry
    /// point for headless use and tests; returns [None] when no run is
    /// active.
    pub fn run_to_completion(&mut self, grid: &mut TileGrid) -> Option<RunOutcome> {
        loop {
            match self.tick(grid) {
                TickEvent::Finished(outcome) => return Some(outcome),
                TickEvent::Idle => return None,
                _ => {}
            }
        }
    }
}
