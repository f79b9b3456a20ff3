//! Column generation for the helicopter flight-planning master problem.
//!
//! - [`RestrictedMaster`] — LP columns paired with their itineraries
//! - [`ColumnGeneration`] — master/pricing loop for the LP relaxation
//! - [`RoundingHeuristic`] — integer plans by repeated column generation
//! - [`SelectionStrategy`] — which positive column a rounding round fixes

mod generation;
mod master;
mod rounding;
mod selection;

pub use generation::{ColumnGeneration, GenerationOutcome, GenerationStatus};
pub use master::RestrictedMaster;
pub use rounding::{RoundedPlan, RoundingHeuristic};
pub use selection::{FirstPositive, LargestFrequency, RandomSelection, SelectionStrategy};
