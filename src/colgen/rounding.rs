//! Rounding heuristic: integer flight plans from repeated column generation.
//!
//! # Algorithm
//!
//! Each round solves the LP relaxation against the residual demand, fixes one
//! positive-frequency itinerary at an integer frequency
//! (`⌊x⌋` if `x ≥ 1`, else 1), subtracts the passengers it carries and drops
//! every column that no longer fits. The residual demand shrinks by at least
//! one passenger per round, so the heuristic terminates. The first round's
//! LP objective is a lower bound on any integer plan.

use tracing::{debug, info};

use super::{ColumnGeneration, RestrictedMaster, SelectionStrategy};
use crate::config::SolverConfig;
use crate::error::{FlightPlanError, Result};
use crate::lp::MasterLp;
use crate::models::{Flight, FlightPlan, FlightProblem, RelaxedFlight};
use crate::pricing::TourCache;

/// Integer plan produced by the rounding heuristic.
#[derive(Debug, Clone)]
pub struct RoundedPlan {
    /// The integer flight plan.
    pub plan: FlightPlan,
    /// LP relaxation objective of the first round (a lower bound).
    pub relaxation_bound: f64,
    /// Number of rounding rounds.
    pub rounds: usize,
}

impl RoundedPlan {
    /// Relative excess of the plan over the relaxation bound, in percent.
    pub fn gap_percent(&self) -> Option<f64> {
        self.plan.gap_percent(self.relaxation_bound)
    }
}

/// Builds an integer plan by repeatedly running column generation.
pub struct RoundingHeuristic<'a> {
    problem: &'a FlightProblem,
    config: &'a SolverConfig,
}

impl<'a> RoundingHeuristic<'a> {
    /// Creates the heuristic for a problem.
    pub fn new(problem: &'a FlightProblem, config: &'a SolverConfig) -> Self {
        Self { problem, config }
    }

    /// Runs rounds until every platform's demand is met.
    ///
    /// `master` must be freshly created (no columns); the tour cache is
    /// shared with every column-generation run of the rounds.
    pub fn run<L, S>(
        &self,
        master: &mut RestrictedMaster<L>,
        cache: &mut TourCache,
        strategy: &mut S,
    ) -> Result<RoundedPlan>
    where
        L: MasterLp,
        S: SelectionStrategy + ?Sized,
    {
        let generation = ColumnGeneration::new(self.problem, self.config);
        let tolerance = self.config.tolerance;

        let mut residual = self.problem.demands();
        let mut remaining = self.problem.total_demand();
        let mut plan = FlightPlan::new();
        let mut relaxation_bound = 0.0;
        let mut rounds = 0;

        while remaining > 0 {
            rounds += 1;
            info!(round = rounds, remaining, "rounding round");

            let outcome = generation.run(master, cache, &residual)?;
            if rounds == 1 {
                relaxation_bound = outcome.objective;
                info!(objective = relaxation_bound, "LP relaxation bound");
            }

            let candidates: Vec<RelaxedFlight> = outcome
                .flights
                .into_iter()
                .filter(|f| f.itinerary.total_passengers() > 0 && f.itinerary.fits(&residual))
                .collect();
            if candidates.is_empty() {
                return Err(FlightPlanError::NoProgress { remaining });
            }

            let index = strategy.select(&candidates);
            let chosen = candidates
                .get(index)
                .ok_or(FlightPlanError::InvalidSelection {
                    index,
                    candidates: candidates.len(),
                })?;

            let frequency = round_frequency(chosen, &residual, tolerance);
            for (d, &w) in residual.iter_mut().zip(chosen.itinerary.allocation()) {
                *d -= w * frequency;
            }
            remaining -= u64::from(chosen.itinerary.total_passengers()) * u64::from(frequency);

            debug!(
                frequency,
                relaxed = chosen.frequency,
                tour_length = chosen.itinerary.tour_length(),
                platforms = %chosen.itinerary.platforms(),
                "fixed flight"
            );
            plan.push(Flight {
                itinerary: chosen.itinerary.clone(),
                frequency,
            });

            let removed = master.remove_infeasible(&residual);
            debug!(removed, "dropped columns exceeding residual demand");
        }

        cache.log_stats();
        info!(
            rounds,
            objective = plan.objective(),
            relaxation_bound,
            "rounding finished"
        );
        Ok(RoundedPlan {
            plan,
            relaxation_bound,
            rounds,
        })
    }
}

/// `⌊x⌋` (within tolerance) when `x ≥ 1`, else 1, capped so the allocation
/// times the frequency never exceeds the residual demand.
fn round_frequency(flight: &RelaxedFlight, residual: &[u32], tolerance: f64) -> u32 {
    let rounded = ((flight.frequency + tolerance).floor() as u32).max(1);
    let admissible = flight
        .itinerary
        .allocation()
        .iter()
        .zip(residual)
        .filter(|&(&w, _)| w > 0)
        .map(|(&w, &d)| d / w)
        .min()
        .unwrap_or(1);
    rounded.min(admissible).max(1)
}
