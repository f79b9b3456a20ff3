//! Restricted master LP contract and its backend.
//!
//! - [`MasterLp`] — the narrow interface the column-generation core uses
//! - [`LpColumn`] — one sparse column with its objective coefficient
//! - [`ClarabelMaster`] — interior-point backend built on `clarabel`

mod clarabel_master;

pub use clarabel_master::ClarabelMaster;

use crate::error::Result;

/// A sparse LP column: row indices, coefficients and an objective cost.
///
/// The variable's lower bound is always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LpColumn {
    rows: Vec<usize>,
    coefficients: Vec<f64>,
    cost: f64,
}

impl LpColumn {
    /// Creates an empty column with the given objective coefficient.
    pub fn new(cost: f64) -> Self {
        Self {
            rows: Vec::new(),
            coefficients: Vec::new(),
            cost,
        }
    }

    /// Appends a nonzero entry.
    pub fn push(&mut self, row: usize, coefficient: f64) {
        self.rows.push(row);
        self.coefficients.push(coefficient);
    }

    /// Row indices of the nonzero entries.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Coefficients, parallel to [`rows`](Self::rows).
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Objective coefficient.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Iterates over `(row, coefficient)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.rows.iter().copied().zip(self.coefficients.iter().copied())
    }
}

/// Minimization LP with one equality row per platform and nonnegative
/// columns, as needed by the column-generation loop.
///
/// Rows are 0-based (row `i` belongs to platform `i + 1`). Primal values and
/// duals refer to the most recent successful [`solve`](Self::solve); columns
/// added afterwards report a zero primal value until the next solve.
pub trait MasterLp {
    /// Number of equality rows.
    fn num_rows(&self) -> usize;

    /// Sets the right-hand side of row `row`.
    fn set_rhs(&mut self, row: usize, value: f64);

    /// Adds a column and returns its index.
    fn add_column(&mut self, column: LpColumn) -> usize;

    /// Overwrites column `index`.
    fn replace_column(&mut self, index: usize, column: LpColumn);

    /// Deletes the given columns; later columns shift down.
    fn delete_columns(&mut self, indices: &[usize]);

    /// Number of columns.
    fn column_count(&self) -> usize;

    /// Column `index`.
    fn column(&self, index: usize) -> &LpColumn;

    /// Solves the relaxation. Infeasible, unbounded or numerically failed
    /// models yield [`FlightPlanError::Master`](crate::error::FlightPlanError::Master).
    fn solve(&mut self) -> Result<()>;

    /// Objective value of the last solution.
    fn objective_value(&self) -> f64;

    /// Primal value of column `index` in the last solution.
    fn column_primal(&self, index: usize) -> f64;

    /// Dual price of row `row` in the last solution.
    fn row_dual(&self, row: usize) -> f64;
}
