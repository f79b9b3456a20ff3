//! # u-flightplan
//!
//! Offshore helicopter flight planning: crew exchanges at oil platforms are
//! covered by closed helicopter tours from a single airport at minimum total
//! flying distance. The LP relaxation is solved by column generation with an
//! exact, range-bounded TSP pricing oracle; integer plans come from a
//! rounding heuristic over repeated column-generation runs.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Platform, FlightProblem, Itinerary, FlightPlan)
//! - [`distance`] — Distance matrix
//! - [`pricing`] — Platform sets, TSP oracle, tour cache and subset enumeration
//! - [`lp`] — Master LP interface and the Clarabel backend
//! - [`colgen`] — Restricted master, column generation and rounding
//! - [`planner`] — Facade owning the problem, configuration and tour cache
//! - [`io`] — Platform and demand file reader
//! - [`config`] — Solver parameters
//! - [`error`] — Error type

pub mod colgen;
pub mod config;
pub mod distance;
pub mod error;
pub mod io;
pub mod lp;
pub mod models;
pub mod planner;
pub mod pricing;
