//! Domain model types for helicopter flight planning.
//!
//! Provides platforms with crew-exchange demand, the validated problem
//! instance, itineraries (master-problem columns) and flight plans.

mod itinerary;
mod plan;
mod platform;
mod problem;

pub use itinerary::Itinerary;
pub use plan::{Flight, FlightPlan, FlightSummary, RelaxedFlight};
pub use platform::Platform;
pub use problem::{FlightProblem, MAX_PLATFORMS};
