//! Pricing subproblem: finding itineraries with negative reduced cost.
//!
//! - [`PlatformSet`] — Hashable bit set used as the identity of a subset
//! - [`shortest_tour`] — Exact bounded TSP oracle with prefix pruning
//! - [`TourCache`] — Bound-aware memoization of oracle results
//! - [`SubsetEnumerator`] — Lexicographic subset generation with superset pruning

mod cache;
mod enumerator;
mod oracle;
mod platform_set;

pub use cache::{CacheStats, CachedTour, TourCache};
pub use enumerator::SubsetEnumerator;
pub use oracle::shortest_tour;
pub use platform_set::PlatformSet;
