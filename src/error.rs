//! Error type shared by the planner, the master LP backend and the input reader.

use thiserror::Error;

/// Errors produced while building a problem or computing a flight plan.
#[derive(Debug, Error)]
pub enum FlightPlanError {
    /// The problem has no platforms besides the depot.
    #[error("problem must contain at least one platform")]
    NoPlatforms,

    /// More platforms than a [`PlatformSet`](crate::pricing::PlatformSet) can hold.
    #[error("too many platforms: {count} (at most {max} supported)")]
    TooManyPlatforms { count: usize, max: usize },

    /// Helicopter passenger capacity must be positive.
    #[error("helicopter capacity must be positive")]
    InvalidCapacity,

    /// Range limit must be positive and finite.
    #[error("invalid range limit: {0}")]
    InvalidRange(f64),

    /// Two inputs disagree on the number of locations.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// An explicit distance matrix is not a valid metric table.
    #[error("invalid distance matrix: {0}")]
    InvalidDistances(String),

    /// Malformed platform or demand file.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The master LP could not be solved to optimality.
    #[error("master LP failed: {0}")]
    Master(String),

    /// The rounding heuristic found no column it could fix.
    #[error("rounding made no progress with {remaining} passengers left")]
    NoProgress { remaining: u64 },

    /// A selection strategy returned an index outside the candidate list.
    #[error("selection index {index} out of range for {candidates} candidates")]
    InvalidSelection { index: usize, candidates: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FlightPlanError>;
