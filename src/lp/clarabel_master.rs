//! `clarabel` interior-point backend for the restricted master problem.
//!
//! The master LP
//!
//! ```text
//! min  cᵀx   s.t.  A x = d,  x ≥ 0
//! ```
//!
//! is posed in Clarabel's conic form `Ax + s = b, s ∈ K` by stacking the
//! equality rows (zero cone) over the rows `−x + s = 0` (nonnegative cone).
//! With that convention the LP dual of an equality row is `y = −z`.
//!
//! Rows with a zero right-hand side whose coefficients are all nonnegative
//! force every column with a positive coefficient in them to zero. Those rows
//! and columns are eliminated before the solve; they report a zero dual and
//! a zero primal value.

use clarabel::algebra::CscMatrix;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};
use tracing::trace;

use super::{LpColumn, MasterLp};
use crate::error::{FlightPlanError, Result};

/// Restricted master LP solved with Clarabel.
///
/// # Examples
///
/// ```
/// use u_flightplan::lp::{ClarabelMaster, LpColumn, MasterLp};
///
/// // min 20 x0 + 30 x1  s.t.  2 x0 = 2,  3 x1 = 3
/// let mut lp = ClarabelMaster::new(vec![2.0, 3.0]);
/// let mut a = LpColumn::new(20.0);
/// a.push(0, 2.0);
/// let mut b = LpColumn::new(30.0);
/// b.push(1, 3.0);
/// lp.add_column(a);
/// lp.add_column(b);
/// lp.solve().unwrap();
/// assert!((lp.objective_value() - 50.0).abs() < 1e-5);
/// assert!((lp.row_dual(0) - 10.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClarabelMaster {
    rhs: Vec<f64>,
    columns: Vec<LpColumn>,
    primal: Vec<f64>,
    duals: Vec<f64>,
    objective: f64,
}

impl ClarabelMaster {
    /// Creates a model with one equality row per entry of `rhs` and no columns.
    pub fn new(rhs: Vec<f64>) -> Self {
        let rows = rhs.len();
        Self {
            rhs,
            columns: Vec::new(),
            primal: Vec::new(),
            duals: vec![0.0; rows],
            objective: 0.0,
        }
    }

    /// Creates a model with `rows` equality rows, all with zero right-hand side.
    pub fn with_rows(rows: usize) -> Self {
        Self::new(vec![0.0; rows])
    }

    /// Rows that are fixed at zero and can only be met by zeroing their columns.
    fn eliminated_rows(&self) -> Vec<bool> {
        let mut eliminated: Vec<bool> = self.rhs.iter().map(|&d| d == 0.0).collect();
        for column in &self.columns {
            for (row, a) in column.entries() {
                if a < 0.0 {
                    eliminated[row] = false;
                }
            }
        }
        eliminated
    }
}

impl MasterLp for ClarabelMaster {
    fn num_rows(&self) -> usize {
        self.rhs.len()
    }

    fn set_rhs(&mut self, row: usize, value: f64) {
        self.rhs[row] = value;
    }

    fn add_column(&mut self, column: LpColumn) -> usize {
        self.columns.push(column);
        self.columns.len() - 1
    }

    fn replace_column(&mut self, index: usize, column: LpColumn) {
        self.columns[index] = column;
    }

    fn delete_columns(&mut self, indices: &[usize]) {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        for j in sorted {
            if j < self.columns.len() {
                self.columns.remove(j);
            }
            if j < self.primal.len() {
                self.primal.remove(j);
            }
        }
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column(&self, index: usize) -> &LpColumn {
        &self.columns[index]
    }

    fn solve(&mut self) -> Result<()> {
        let m = self.rhs.len();
        let eliminated = self.eliminated_rows();

        let mut row_map = vec![None; m];
        let mut active_rhs = Vec::new();
        for (r, &d) in self.rhs.iter().enumerate() {
            if !eliminated[r] {
                row_map[r] = Some(active_rhs.len());
                active_rhs.push(d);
            }
        }

        let kept: Vec<usize> = (0..self.columns.len())
            .filter(|&j| {
                self.columns[j]
                    .entries()
                    .all(|(r, a)| !(eliminated[r] && a > 0.0))
            })
            .collect();

        self.primal = vec![0.0; self.columns.len()];
        self.duals = vec![0.0; m];
        self.objective = 0.0;

        let mr = active_rhs.len();
        let nk = kept.len();
        if mr == 0 {
            return match kept.iter().find(|&&j| self.columns[j].cost() < 0.0) {
                Some(&j) => Err(FlightPlanError::Master(format!(
                    "column {j} has negative cost and no binding row: unbounded"
                ))),
                None => Ok(()),
            };
        }
        if nk == 0 {
            return Err(FlightPlanError::Master(
                "no columns cover the demand rows: infeasible".into(),
            ));
        }

        // A = [A_eq; -I] in compressed sparse column form.
        let mut col_ptr = Vec::with_capacity(nk + 1);
        let mut row_idx = Vec::new();
        let mut values = Vec::new();
        for (k, &j) in kept.iter().enumerate() {
            col_ptr.push(row_idx.len());
            let mut entries: Vec<(usize, f64)> = self.columns[j]
                .entries()
                .filter_map(|(r, a)| row_map[r].map(|row| (row, a)))
                .collect();
            entries.sort_by_key(|&(row, _)| row);
            for (row, a) in entries {
                row_idx.push(row);
                values.push(a);
            }
            row_idx.push(mr + k);
            values.push(-1.0);
        }
        col_ptr.push(row_idx.len());

        let a_mat = CscMatrix::new(mr + nk, nk, col_ptr, row_idx, values);
        let p_mat = CscMatrix::new(nk, nk, vec![0; nk + 1], Vec::new(), Vec::new());
        let q: Vec<f64> = kept.iter().map(|&j| self.columns[j].cost()).collect();
        let mut b = active_rhs;
        b.resize(mr + nk, 0.0);
        let cones = [
            SupportedConeT::ZeroConeT(mr),
            SupportedConeT::NonnegativeConeT(nk),
        ];

        let settings = DefaultSettingsBuilder::default()
            .verbose(false)
            .build()
            .map_err(|e| FlightPlanError::Master(format!("settings error: {e:?}")))?;
        let mut solver = DefaultSolver::new(&p_mat, &q, &a_mat, &b, &cones, settings)
            .map_err(|e| FlightPlanError::Master(format!("initialization failed: {e:?}")))?;
        solver.solve();

        let sol = &solver.solution;
        if !matches!(sol.status, SolverStatus::Solved | SolverStatus::AlmostSolved) {
            return Err(FlightPlanError::Master(format!(
                "clarabel returned status {:?}",
                sol.status
            )));
        }
        trace!(
            rows = mr,
            columns = nk,
            iterations = sol.iterations,
            "master solved"
        );

        for (k, &j) in kept.iter().enumerate() {
            self.primal[j] = sol.x[k].max(0.0);
        }
        for (r, row) in row_map.iter().enumerate() {
            if let Some(row) = *row {
                self.duals[r] = -sol.z[row];
            }
        }
        self.objective = kept
            .iter()
            .map(|&j| self.columns[j].cost() * self.primal[j])
            .sum();
        Ok(())
    }

    fn objective_value(&self) -> f64 {
        self.objective
    }

    fn column_primal(&self, index: usize) -> f64 {
        self.primal.get(index).copied().unwrap_or(0.0)
    }

    fn row_dual(&self, row: usize) -> f64 {
        self.duals.get(row).copied().unwrap_or(0.0)
    }
}
