//! Bound-aware memoization of pricing-oracle results.

use std::collections::HashMap;

use tracing::debug;

use super::oracle::shortest_tour;
use super::PlatformSet;
use crate::distance::DistanceMatrix;

/// What is known about the shortest tour through one platform set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CachedTour {
    /// The true optimum (found strictly below the bound in use at the time).
    Optimal(f64),
    /// No tour shorter than this bound exists.
    NoTourBelow(f64),
}

/// Lookup counters of a [`TourCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls to [`TourCache::tour_length`].
    pub lookups: u64,
    /// Calls answered without running the oracle.
    pub hits: u64,
    /// Oracle runs (misses plus refreshes of stale bounds).
    pub oracle_runs: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache.
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }
}

/// Memoizes [`shortest_tour`] results keyed by platform-set identity.
///
/// A result capped by a tight bound is stored as [`CachedTour::NoTourBelow`]
/// and is only reused for bounds at most that tight; a looser bound reruns
/// the oracle. Entries are never evicted.
///
/// # Examples
///
/// ```
/// use u_flightplan::distance::DistanceMatrix;
/// use u_flightplan::pricing::TourCache;
///
/// let dm = DistanceMatrix::from_data(
///     3,
///     vec![0.0, 10.0, 15.0, 10.0, 0.0, 8.0, 15.0, 8.0, 0.0],
/// )
/// .unwrap();
/// let mut cache = TourCache::new();
/// assert_eq!(cache.tour_length(&[1, 2], &dm, 20.0), 20.0);
/// assert!((cache.tour_length(&[2, 1], &dm, 100.0) - 33.0).abs() < 1e-10);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TourCache {
    entries: HashMap<PlatformSet, CachedTour>,
    stats: CacheStats,
}

impl TourCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortest tour length through `platforms`, or `bound` if no tour is
    /// shorter than `bound`. Same contract as [`shortest_tour`].
    pub fn tour_length(
        &mut self,
        platforms: &[usize],
        distances: &DistanceMatrix,
        bound: f64,
    ) -> f64 {
        self.stats.lookups += 1;
        let key = PlatformSet::from_indices(platforms.iter().copied());

        match self.entries.get(&key) {
            Some(&CachedTour::Optimal(length)) => {
                self.stats.hits += 1;
                return length.min(bound);
            }
            Some(&CachedTour::NoTourBelow(known)) if bound <= known => {
                self.stats.hits += 1;
                return bound;
            }
            _ => {}
        }

        self.stats.oracle_runs += 1;
        let z = shortest_tour(platforms, distances, bound);
        let entry = if z < bound {
            CachedTour::Optimal(z)
        } else {
            CachedTour::NoTourBelow(bound)
        };
        self.entries.insert(key, entry);
        z
    }

    /// The stored entry for a platform set, if any.
    pub fn get(&self, platforms: &PlatformSet) -> Option<CachedTour> {
        self.entries.get(platforms).copied()
    }

    /// Number of cached platform sets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookup counters since creation or the last [`clear`](Self::clear).
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    /// Emits the counters at debug level.
    pub fn log_stats(&self) {
        debug!(
            entries = self.entries.len(),
            lookups = self.stats.lookups,
            oracle_runs = self.stats.oracle_runs,
            hit_rate = self.stats.hit_rate(),
            "tour cache statistics"
        );
    }
}
