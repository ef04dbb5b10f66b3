use thiserror::Error;

/// Errors reported by the grid and the scheduler. All of these are local,
/// synchronous and recoverable; nothing here is fatal and nothing is retried
/// internally.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GridError {
    #[error("grid dimensions must be nonzero, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("position ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("obstacle probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("step interval must be greater than zero")]
    InvalidInterval,

    #[error("a run requires both a start and an end tile")]
    EndpointsNotSet,
}
