//! Restricted master problem: LP columns paired with their itineraries.

use std::collections::HashSet;

use crate::error::Result;
use crate::lp::MasterLp;
use crate::models::{FlightProblem, Itinerary, RelaxedFlight};

/// The restricted master problem over the itineraries known so far.
///
/// The first N columns are the single-platform basis itineraries; they are
/// rebuilt by [`reset`](Self::reset) whenever the residual demand changes
/// and are never deleted. Generated columns follow. An itinerary whose
/// allocation is already present is not added twice.
#[derive(Debug)]
pub struct RestrictedMaster<L> {
    lp: L,
    itineraries: Vec<Itinerary>,
    known: HashSet<Vec<u32>>,
    num_basis: usize,
}

impl<L: MasterLp> RestrictedMaster<L> {
    /// Wraps an empty LP with one row per platform.
    pub fn new(lp: L) -> Self {
        debug_assert_eq!(lp.column_count(), 0, "master LP must start without columns");
        let num_basis = lp.num_rows();
        Self {
            lp,
            itineraries: Vec::new(),
            known: HashSet::new(),
            num_basis,
        }
    }

    /// Sets every row's right-hand side to the residual demand and rebuilds
    /// the basis columns.
    ///
    /// Basis column `j` serves platform `j` alone with `max(min(C, D_j), 1)`
    /// passengers at the cost of a round trip, which keeps the master
    /// feasible for any residual demand.
    pub fn reset(&mut self, problem: &FlightProblem, residual: &[u32]) {
        let n = problem.num_platforms();
        debug_assert_eq!(n, self.num_basis);
        for j in 1..=n {
            self.lp.set_rhs(j - 1, f64::from(residual[j]));

            let mut allocation = vec![0; n + 1];
            allocation[j] = problem.capacity().min(residual[j]).max(1);
            let round_trip = problem.distance(0, j) + problem.distance(j, 0);
            let basis = Itinerary::new(vec![j], round_trip, allocation);

            if j - 1 < self.itineraries.len() {
                self.lp.replace_column(j - 1, basis.to_column());
                self.itineraries[j - 1] = basis;
            } else {
                self.lp.add_column(basis.to_column());
                self.itineraries.push(basis);
            }
        }
        self.rebuild_known();
    }

    /// Returns `true` if an itinerary with the same allocation is present.
    pub fn contains(&self, itinerary: &Itinerary) -> bool {
        self.known.contains(itinerary.allocation())
    }

    /// Adds a column for `itinerary`. Returns `false` for duplicates.
    pub fn add(&mut self, itinerary: Itinerary) -> bool {
        if !self.known.insert(itinerary.allocation().to_vec()) {
            return false;
        }
        self.lp.add_column(itinerary.to_column());
        self.itineraries.push(itinerary);
        true
    }

    /// Solves the LP relaxation.
    pub fn solve(&mut self) -> Result<()> {
        self.lp.solve()
    }

    /// Objective value of the last solve.
    pub fn objective(&self) -> f64 {
        self.lp.objective_value()
    }

    /// Dual prices indexed by location id (depot slot is zero).
    pub fn duals(&self) -> Vec<f64> {
        let mut duals = vec![0.0; self.num_basis + 1];
        for (row, y) in duals.iter_mut().skip(1).enumerate() {
            *y = self.lp.row_dual(row);
        }
        duals
    }

    /// Itineraries used at a frequency above `tolerance`, in column order.
    pub fn positive_flights(&self, tolerance: f64) -> Vec<RelaxedFlight> {
        self.itineraries
            .iter()
            .enumerate()
            .filter_map(|(j, it)| {
                let x = self.lp.column_primal(j);
                (x > tolerance).then(|| RelaxedFlight {
                    itinerary: it.clone(),
                    frequency: x,
                })
            })
            .collect()
    }

    /// All itineraries in column order (basis columns first).
    pub fn itineraries(&self) -> &[Itinerary] {
        &self.itineraries
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.itineraries.len()
    }

    /// Returns `true` if the master has no columns yet.
    pub fn is_empty(&self) -> bool {
        self.itineraries.is_empty()
    }

    /// Deletes every generated column whose allocation exceeds `residual`.
    /// Returns the number of deleted columns.
    pub fn remove_infeasible(&mut self, residual: &[u32]) -> usize {
        let doomed: Vec<usize> = (self.num_basis..self.itineraries.len())
            .filter(|&j| !self.itineraries[j].fits(residual))
            .collect();
        if doomed.is_empty() {
            return 0;
        }

        self.lp.delete_columns(&doomed);
        for &j in doomed.iter().rev() {
            self.itineraries.remove(j);
        }
        debug_assert_eq!(self.lp.column_count(), self.itineraries.len());
        self.rebuild_known();
        doomed.len()
    }

    /// The underlying LP.
    pub fn lp(&self) -> &L {
        &self.lp
    }

    fn rebuild_known(&mut self) {
        self.known = self
            .itineraries
            .iter()
            .map(|it| it.allocation().to_vec())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::lp::ClarabelMaster;

    fn problem() -> FlightProblem {
        let dm = DistanceMatrix::from_data(
            3,
            vec![0.0, 10.0, 15.0, 10.0, 0.0, 8.0, 15.0, 8.0, 0.0],
        )
        .expect("valid");
        FlightProblem::from_demands(&[2, 3], dm, 4, 100.0).expect("valid")
    }

    fn master(problem: &FlightProblem) -> RestrictedMaster<ClarabelMaster> {
        let mut m = RestrictedMaster::new(ClarabelMaster::with_rows(problem.num_platforms()));
        m.reset(problem, &problem.demands());
        m
    }

    #[test]
    fn test_reset_builds_basis() {
        let p = problem();
        let m = master(&p);
        assert_eq!(m.len(), 2);
        assert_eq!(m.itineraries()[0].allocation(), &[0, 2, 0]);
        assert_eq!(m.itineraries()[1].allocation(), &[0, 0, 3]);
        assert_eq!(m.itineraries()[1].tour_length(), 30.0);
        assert_eq!(m.lp().column(0).cost(), 20.0);
    }

    #[test]
    fn test_basis_solution() {
        let p = problem();
        let mut m = master(&p);
        m.solve().expect("solvable");
        assert!((m.objective() - 50.0).abs() < 1e-5);
        let duals = m.duals();
        assert_eq!(duals[0], 0.0);
        assert!((duals[1] - 10.0).abs() < 1e-4);
        assert!((duals[2] - 10.0).abs() < 1e-4);
        assert_eq!(m.positive_flights(1e-8).len(), 2);
    }

    #[test]
    fn test_duplicates_rejected() {
        let p = problem();
        let mut m = master(&p);
        let it = Itinerary::greedy(&[1, 2], 33.0, &p.demands(), p.capacity());
        assert!(!m.contains(&it));
        assert!(m.add(it.clone()));
        assert!(m.contains(&it));
        assert!(!m.add(it));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_reset_with_zero_residual_keeps_basis_feasible() {
        let p = problem();
        let mut m = master(&p);
        m.reset(&p, &[0, 0, 1]);
        assert_eq!(m.itineraries()[0].allocation(), &[0, 1, 0]);
        assert_eq!(m.itineraries()[1].allocation(), &[0, 0, 1]);
        m.solve().expect("solvable");
        assert!((m.objective() - 30.0).abs() < 1e-5);
    }

    #[test]
    fn test_remove_infeasible_keeps_basis() {
        let p = problem();
        let mut m = master(&p);
        m.add(Itinerary::greedy(&[1, 2], 33.0, &p.demands(), p.capacity()));
        m.add(Itinerary::greedy(&[2, 1], 33.0, &p.demands(), p.capacity()));
        let residual = [0, 1, 3];
        m.reset(&p, &residual);
        // (2, 2) no longer fits, (1, 3) does.
        assert_eq!(m.remove_infeasible(&residual), 1);
        assert_eq!(m.len(), 3);
        assert_eq!(m.itineraries()[2].allocation(), &[0, 1, 3]);
        assert_eq!(m.lp().column_count(), 3);
    }
}
