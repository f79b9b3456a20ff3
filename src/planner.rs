//! Planner facade: one problem, one configuration and a shared tour cache.

use tracing::info;

use crate::colgen::{
    ColumnGeneration, GenerationStatus, RestrictedMaster, RoundedPlan, RoundingHeuristic,
    SelectionStrategy,
};
use crate::config::SolverConfig;
use crate::error::Result;
use crate::lp::{ClarabelMaster, MasterLp};
use crate::models::{FlightProblem, Itinerary, RelaxedFlight};
use crate::pricing::TourCache;

/// LP relaxation of a flight planning problem.
#[derive(Debug, Clone)]
pub struct Relaxation {
    /// Itineraries with positive frequency.
    pub flights: Vec<RelaxedFlight>,
    /// Every column of the final restricted master, basis columns first.
    pub columns: Vec<Itinerary>,
    /// LP objective: a lower bound on the cost of any integer plan.
    pub objective: f64,
    /// Whether column generation converged.
    pub status: GenerationStatus,
    /// Master solves performed.
    pub iterations: usize,
    /// Final dual prices indexed by location id.
    pub duals: Vec<f64>,
}

/// Computes flight plans for one problem.
///
/// The tour cache lives as long as the planner, so repeated calls (several
/// rounding trials, say) reuse the tours found earlier.
///
/// # Examples
///
/// ```
/// use u_flightplan::colgen::LargestFrequency;
/// use u_flightplan::config::SolverConfig;
/// use u_flightplan::models::{FlightProblem, Platform};
/// use u_flightplan::planner::FlightPlanner;
///
/// let platforms = vec![
///     Platform::depot(),
///     Platform::new(1, 10.0, 0.0, 3),
///     Platform::new(2, 10.0, 6.0, 2),
///     Platform::new(3, -4.0, 9.0, 5),
/// ];
/// let problem = FlightProblem::new(platforms, 4, 60.0).unwrap();
/// let mut planner = FlightPlanner::new(problem, SolverConfig::default());
///
/// let relaxation = planner.solve_relaxation().unwrap();
/// let rounded = planner.round_to_integer(&mut LargestFrequency).unwrap();
///
/// assert_eq!(rounded.plan.served(4), vec![0, 3, 2, 5]);
/// assert!(rounded.plan.objective() >= relaxation.objective - 1e-4);
/// ```
#[derive(Debug)]
pub struct FlightPlanner {
    problem: FlightProblem,
    config: SolverConfig,
    cache: TourCache,
}

impl FlightPlanner {
    /// Creates a planner with an empty tour cache.
    pub fn new(problem: FlightProblem, config: SolverConfig) -> Self {
        Self {
            problem,
            config,
            cache: TourCache::new(),
        }
    }

    /// Solves the LP relaxation with the Clarabel backend.
    pub fn solve_relaxation(&mut self) -> Result<Relaxation> {
        let lp = ClarabelMaster::with_rows(self.problem.num_platforms());
        self.solve_relaxation_with(lp)
    }

    /// Solves the LP relaxation on the given (empty) LP backend.
    pub fn solve_relaxation_with<L: MasterLp>(&mut self, lp: L) -> Result<Relaxation> {
        let mut master = RestrictedMaster::new(lp);
        let outcome = ColumnGeneration::new(&self.problem, &self.config).run(
            &mut master,
            &mut self.cache,
            &self.problem.demands(),
        )?;
        self.cache.log_stats();

        Ok(Relaxation {
            flights: outcome.flights,
            columns: master.itineraries().to_vec(),
            objective: outcome.objective,
            status: outcome.status,
            iterations: outcome.iterations,
            duals: outcome.duals,
        })
    }

    /// Builds an integer plan with the rounding heuristic and the Clarabel
    /// backend.
    pub fn round_to_integer<S>(&mut self, strategy: &mut S) -> Result<RoundedPlan>
    where
        S: SelectionStrategy + ?Sized,
    {
        let lp = ClarabelMaster::with_rows(self.problem.num_platforms());
        self.round_to_integer_with(lp, strategy)
    }

    /// Builds an integer plan on the given (empty) LP backend.
    pub fn round_to_integer_with<L, S>(&mut self, lp: L, strategy: &mut S) -> Result<RoundedPlan>
    where
        L: MasterLp,
        S: SelectionStrategy + ?Sized,
    {
        let mut master = RestrictedMaster::new(lp);
        let rounded = RoundingHeuristic::new(&self.problem, &self.config).run(
            &mut master,
            &mut self.cache,
            strategy,
        )?;
        info!(
            flights = rounded.plan.len(),
            objective = rounded.plan.objective(),
            "integer plan ready"
        );
        Ok(rounded)
    }

    /// The problem being planned.
    pub fn problem(&self) -> &FlightProblem {
        &self.problem
    }

    /// Solver parameters.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Tour cache shared by every run of this planner.
    pub fn cache(&self) -> &TourCache {
        &self.cache
    }

    /// Drops every cached tour.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
