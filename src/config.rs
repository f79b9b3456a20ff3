//! Solver parameters for column generation and rounding.

use serde::{Deserialize, Serialize};

/// Tuning parameters of the column-generation loop.
///
/// Defaults: at most 15 new columns per iteration, an iteration ceiling of
/// 100 000 and a numeric tolerance of `1e-8` for reduced-cost negativity and
/// primal positivity.
///
/// # Examples
///
/// ```
/// use u_flightplan::config::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_iteration_limit(500)
///     .with_max_columns_per_iteration(5);
/// assert_eq!(config.iteration_limit, 500);
/// assert_eq!(config.max_columns_per_iteration, 5);
/// assert_eq!(config.tolerance, 1e-8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Iteration ceiling of one column-generation run.
    pub iteration_limit: usize,
    /// Maximum number of columns injected per iteration.
    pub max_columns_per_iteration: usize,
    /// Tolerance for reduced costs and primal values.
    pub tolerance: f64,
    /// Added to the range limit to form the pricing oracle's bound, so that
    /// tours of exactly the range length are still found.
    pub range_slack: f64,
    /// Log the master objective every this many iterations (0 disables).
    pub progress_interval: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iteration_limit: 100_000,
            max_columns_per_iteration: 15,
            tolerance: 1e-8,
            range_slack: 0.1,
            progress_interval: 25,
        }
    }
}

impl SolverConfig {
    /// Sets the iteration ceiling.
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = limit;
        self
    }

    /// Sets the number of columns injected per iteration.
    pub fn with_max_columns_per_iteration(mut self, max: usize) -> Self {
        self.max_columns_per_iteration = max;
        self
    }

    /// Sets the numeric tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the slack added to the range for the oracle bound.
    pub fn with_range_slack(mut self, slack: f64) -> Self {
        self.range_slack = slack;
        self
    }

    /// Sets the progress logging interval.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}
