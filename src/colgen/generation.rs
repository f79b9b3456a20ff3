//! Column-generation loop.
//!
//! # Algorithm
//!
//! ```text
//! repeat
//!     solve the restricted master, read duals y
//!     sort demand-positive platforms by descending y
//!     for each subset S in pruned lexicographic order:
//!         d(S) = shortest tour (cached), stop extending S if d(S) > R
//!         allocate passengers greedily in dual order, w_i = min(left, D_i)
//!         stop extending S if Σ D_i ≥ C
//!         inject S if d(S) − Σ w_i y_i < −ε
//! until nothing was injected (optimal) or the iteration limit is hit
//! ```
//!
//! Superset pruning is sound because adding platforms never shortens a
//! tour (triangle inequality) and, once the capacity is filled, added
//! platforms receive no passengers.

use tracing::{debug, info, warn};

use super::RestrictedMaster;
use crate::config::SolverConfig;
use crate::error::Result;
use crate::lp::MasterLp;
use crate::models::{FlightProblem, Itinerary, RelaxedFlight};
use crate::pricing::{SubsetEnumerator, TourCache};

/// Terminal state of one column-generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    /// No column with negative reduced cost exists: the master is LP-optimal.
    Converged,
    /// The iteration limit was reached; the solution is the best found.
    LimitExceeded,
}

/// Result of one column-generation run.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// How the run ended.
    pub status: GenerationStatus,
    /// Number of master solves performed in the loop.
    pub iterations: usize,
    /// Objective of the final master solution.
    pub objective: f64,
    /// Itineraries with positive frequency in the final solution.
    pub flights: Vec<RelaxedFlight>,
    /// Final dual prices indexed by location id.
    pub duals: Vec<f64>,
    /// Columns injected over the whole run.
    pub columns_added: usize,
}

/// Drives the master/pricing iteration for one problem.
///
/// # Examples
///
/// ```
/// use u_flightplan::colgen::{ColumnGeneration, GenerationStatus, RestrictedMaster};
/// use u_flightplan::config::SolverConfig;
/// use u_flightplan::distance::DistanceMatrix;
/// use u_flightplan::lp::ClarabelMaster;
/// use u_flightplan::models::FlightProblem;
/// use u_flightplan::pricing::TourCache;
///
/// let dm = DistanceMatrix::from_data(
///     3,
///     vec![0.0, 10.0, 15.0, 10.0, 0.0, 8.0, 15.0, 8.0, 0.0],
/// )
/// .unwrap();
/// let problem = FlightProblem::from_demands(&[2, 3], dm, 4, 100.0).unwrap();
/// let config = SolverConfig::default();
/// let mut cache = TourCache::new();
/// let mut master = RestrictedMaster::new(ClarabelMaster::with_rows(2));
///
/// let outcome = ColumnGeneration::new(&problem, &config)
///     .run(&mut master, &mut cache, &problem.demands())
///     .unwrap();
/// assert_eq!(outcome.status, GenerationStatus::Converged);
/// assert!((outcome.objective - 41.25).abs() < 1e-4);
/// ```
pub struct ColumnGeneration<'a> {
    problem: &'a FlightProblem,
    config: &'a SolverConfig,
}

impl<'a> ColumnGeneration<'a> {
    /// Creates a loop for the given problem and parameters.
    pub fn new(problem: &'a FlightProblem, config: &'a SolverConfig) -> Self {
        Self { problem, config }
    }

    /// Runs column generation against `residual` demand (indexed by location
    /// id) until convergence or the iteration limit.
    ///
    /// The master's right-hand sides and basis columns are reset first;
    /// previously generated columns are kept.
    pub fn run<L: MasterLp>(
        &self,
        master: &mut RestrictedMaster<L>,
        cache: &mut TourCache,
        residual: &[u32],
    ) -> Result<GenerationOutcome> {
        master.reset(self.problem, residual);

        let mut candidates: Vec<usize> = (1..=self.problem.num_platforms())
            .filter(|&i| residual[i] > 0)
            .collect();

        let limit = self.config.iteration_limit.max(1);
        let interval = self.config.progress_interval;
        let mut iterations = 0;
        let mut columns_added = 0;

        let (status, duals) = loop {
            iterations += 1;
            master.solve()?;

            if interval > 0 && iterations % interval == 0 {
                debug!(
                    iteration = iterations,
                    objective = master.objective(),
                    columns = master.len(),
                    "column generation progress"
                );
            }

            let duals = master.duals();
            sort_by_dual(&mut candidates, &duals);

            let added = self.price(master, cache, residual, &duals, &candidates);
            columns_added += added;

            if added == 0 {
                break (GenerationStatus::Converged, duals);
            }
            if iterations >= limit {
                master.solve()?;
                break (GenerationStatus::LimitExceeded, master.duals());
            }
        };

        let objective = master.objective();
        match status {
            GenerationStatus::Converged => info!(
                iterations,
                objective, columns_added, "column generation converged"
            ),
            GenerationStatus::LimitExceeded => warn!(
                iterations,
                objective, "column generation stopped at the iteration limit"
            ),
        }

        Ok(GenerationOutcome {
            status,
            iterations,
            objective,
            flights: master.positive_flights(self.config.tolerance),
            duals,
            columns_added,
        })
    }

    /// One pricing scan; returns the number of injected columns.
    fn price<L: MasterLp>(
        &self,
        master: &mut RestrictedMaster<L>,
        cache: &mut TourCache,
        residual: &[u32],
        duals: &[f64],
        candidates: &[usize],
    ) -> usize {
        let range = self.problem.range();
        let bound = range + self.config.range_slack;
        let capacity = self.problem.capacity();

        let mut enumerator = SubsetEnumerator::new(candidates.len());
        let mut stops = Vec::with_capacity(candidates.len());
        let mut extend = true;
        let mut added = 0;

        while added < self.config.max_columns_per_iteration {
            let Some(positions) = enumerator.next(extend) else {
                break;
            };
            extend = true;
            stops.clear();
            stops.extend(positions.iter().map(|&p| candidates[p]));

            let length = cache.tour_length(&stops, self.problem.distances(), bound);
            if length > range {
                extend = false;
                continue;
            }

            let demand: u64 = stops.iter().map(|&p| u64::from(residual[p])).sum();
            if demand >= u64::from(capacity) {
                extend = false;
            }

            let itinerary = Itinerary::greedy(&stops, length, residual, capacity);
            if itinerary.reduced_cost(duals) < -self.config.tolerance && master.add(itinerary) {
                added += 1;
            }
        }
        added
    }
}

/// Stable sort of platform ids by descending dual price.
pub(crate) fn sort_by_dual(platforms: &mut [usize], duals: &[f64]) {
    platforms.sort_by(|&a, &b| duals[b].total_cmp(&duals[a]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::lp::ClarabelMaster;
    use crate::models::Platform;
    use crate::pricing::shortest_tour;

    fn two_platform_problem() -> FlightProblem {
        let dm = DistanceMatrix::from_data(
            3,
            vec![0.0, 10.0, 15.0, 10.0, 0.0, 8.0, 15.0, 8.0, 0.0],
        )
        .expect("valid");
        FlightProblem::from_demands(&[2, 3], dm, 4, 100.0).expect("valid")
    }

    fn five_platform_problem() -> FlightProblem {
        let platforms = vec![
            Platform::depot(),
            Platform::new(1, 10.0, 0.0, 2),
            Platform::new(2, 0.0, 12.0, 3),
            Platform::new(3, -8.0, -6.0, 4),
            Platform::new(4, 7.0, 7.0, 1),
            Platform::new(5, 3.0, -9.0, 2),
        ];
        FlightProblem::new(platforms, 5, 45.0).expect("valid")
    }

    fn run(
        problem: &FlightProblem,
        config: &SolverConfig,
    ) -> (GenerationOutcome, RestrictedMaster<ClarabelMaster>) {
        let mut cache = TourCache::new();
        let mut master =
            RestrictedMaster::new(ClarabelMaster::with_rows(problem.num_platforms()));
        let outcome = ColumnGeneration::new(problem, config)
            .run(&mut master, &mut cache, &problem.demands())
            .expect("solvable");
        (outcome, master)
    }

    #[test]
    fn test_sort_by_dual_is_stable_descending() {
        let mut p = vec![1, 2, 3, 4];
        sort_by_dual(&mut p, &[0.0, 5.0, 9.0, 5.0, 1.0]);
        assert_eq!(p, vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_two_platform_relaxation() {
        let problem = two_platform_problem();
        let (outcome, master) = run(&problem, &SolverConfig::default());
        assert_eq!(outcome.status, GenerationStatus::Converged);
        assert!((outcome.objective - 41.25).abs() < 1e-4);
        assert!(outcome.columns_added >= 2);

        // Both combined itineraries are in the master.
        let combined: Vec<&Itinerary> = master
            .itineraries()
            .iter()
            .filter(|it| it.platforms().len() == 2)
            .collect();
        assert_eq!(combined.len(), 2);
        assert!(combined.iter().all(|it| (it.tour_length() - 33.0).abs() < 1e-10));

        let total: f64 = outcome.flights.iter().map(|f| f.frequency).sum();
        assert!((total - 1.25).abs() < 1e-4);
    }

    #[test]
    fn test_iteration_limit_is_soft() {
        let problem = five_platform_problem();
        let config = SolverConfig::default()
            .with_iteration_limit(1)
            .with_max_columns_per_iteration(1);
        let (outcome, _) = run(&problem, &config);
        assert_eq!(outcome.status, GenerationStatus::LimitExceeded);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.columns_added, 1);
        assert!(outcome.objective > 0.0);
    }

    #[test]
    fn test_range_excludes_long_tours() {
        let problem = five_platform_problem();
        let (_, master) = run(&problem, &SolverConfig::default());
        for it in master.itineraries().iter().skip(problem.num_platforms()) {
            assert!(it.tour_length() <= problem.range());
            assert!(it.total_passengers() <= problem.capacity());
        }
    }

    /// Every itinerary absent from the converged master prices out under the
    /// final duals.
    #[test]
    fn test_convergence_implies_no_negative_reduced_cost() {
        let problem = five_platform_problem();
        let config = SolverConfig::default();
        let (outcome, master) = run(&problem, &config);
        assert_eq!(outcome.status, GenerationStatus::Converged);

        let demands = problem.demands();
        let mut order: Vec<usize> = (1..=problem.num_platforms()).collect();
        sort_by_dual(&mut order, &outcome.duals);

        let k = order.len();
        for mask in 1u32..(1 << k) {
            let stops: Vec<usize> = (0..k)
                .filter(|&b| mask & (1 << b) != 0)
                .map(|b| order[b])
                .collect();
            let length = shortest_tour(&stops, problem.distances(), f64::INFINITY);
            if length > problem.range() {
                continue;
            }
            let it = Itinerary::greedy(&stops, length, &demands, problem.capacity());
            if stops.iter().any(|&p| it.passengers(p) == 0) || master.contains(&it) {
                continue;
            }
            let rc = it.reduced_cost(&outcome.duals);
            assert!(rc >= -1e-6, "stops {stops:?} have reduced cost {rc}");
        }
    }

    #[test]
    fn test_zero_demand_platform_is_skipped() {
        let dm = DistanceMatrix::from_data(
            3,
            vec![0.0, 10.0, 15.0, 10.0, 0.0, 8.0, 15.0, 8.0, 0.0],
        )
        .expect("valid");
        let problem = FlightProblem::from_demands(&[0, 3], dm, 4, 100.0).expect("valid");
        let (outcome, master) = run(&problem, &SolverConfig::default());
        assert_eq!(outcome.status, GenerationStatus::Converged);
        assert!((outcome.objective - 30.0).abs() < 1e-4);
        assert!(master
            .itineraries()
            .iter()
            .skip(2)
            .all(|it| it.passengers(1) == 0));
    }
}
