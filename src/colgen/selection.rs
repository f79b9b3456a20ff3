//! Column selection policies for the rounding heuristic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::RelaxedFlight;

/// Picks one of the positive-frequency flights to fix in a rounding round.
///
/// `candidates` is never empty. The returned index must be in range.
pub trait SelectionStrategy {
    /// Returns the index of the chosen candidate.
    fn select(&mut self, candidates: &[RelaxedFlight]) -> usize;
}

impl<F> SelectionStrategy for F
where
    F: FnMut(&[RelaxedFlight]) -> usize,
{
    fn select(&mut self, candidates: &[RelaxedFlight]) -> usize {
        self(candidates)
    }
}

/// Uniformly random choice.
///
/// # Examples
///
/// ```
/// use u_flightplan::colgen::{RandomSelection, SelectionStrategy};
/// use u_flightplan::models::{Itinerary, RelaxedFlight};
///
/// let flight = RelaxedFlight {
///     itinerary: Itinerary::new(vec![1], 20.0, vec![0, 2]),
///     frequency: 0.5,
/// };
/// let flights = vec![flight; 4];
///
/// let mut a = RandomSelection::seeded(7);
/// let mut b = RandomSelection::seeded(7);
/// assert_eq!(a.select(&flights), b.select(&flights));
/// ```
#[derive(Debug, Clone)]
pub struct RandomSelection<R = StdRng> {
    rng: R,
}

impl RandomSelection<StdRng> {
    /// Random selection with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Random selection seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl<R: Rng> RandomSelection<R> {
    /// Random selection driven by the given generator.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SelectionStrategy for RandomSelection<R> {
    fn select(&mut self, candidates: &[RelaxedFlight]) -> usize {
        self.rng.random_range(0..candidates.len())
    }
}

/// Picks the flight with the largest frequency (first one on ties).
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestFrequency;

impl SelectionStrategy for LargestFrequency {
    fn select(&mut self, candidates: &[RelaxedFlight]) -> usize {
        let mut best = 0;
        for (i, c) in candidates.iter().enumerate().skip(1) {
            if c.frequency > candidates[best].frequency {
                best = i;
            }
        }
        best
    }
}

/// Picks the first candidate in master column order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPositive;

impl SelectionStrategy for FirstPositive {
    fn select(&mut self, _candidates: &[RelaxedFlight]) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Itinerary;

    fn candidates(freqs: &[f64]) -> Vec<RelaxedFlight> {
        freqs
            .iter()
            .enumerate()
            .map(|(i, &f)| RelaxedFlight {
                itinerary: Itinerary::new(vec![i + 1], 10.0, vec![0; i + 2]),
                frequency: f,
            })
            .collect()
    }

    #[test]
    fn test_largest_frequency() {
        let c = candidates(&[0.5, 2.0, 1.0, 2.0]);
        assert_eq!(LargestFrequency.select(&c), 1);
    }

    #[test]
    fn test_first_positive() {
        let c = candidates(&[0.5, 2.0]);
        assert_eq!(FirstPositive.select(&c), 0);
    }

    #[test]
    fn test_random_in_range_and_reproducible() {
        let c = candidates(&[1.0, 1.0, 1.0, 1.0, 1.0]);
        let mut a = RandomSelection::seeded(42);
        let mut b = RandomSelection::seeded(42);
        for _ in 0..50 {
            let i = a.select(&c);
            assert!(i < c.len());
            assert_eq!(i, b.select(&c));
        }
    }

    #[test]
    fn test_closure_strategy() {
        let c = candidates(&[1.0, 3.0]);
        let mut last = |cs: &[RelaxedFlight]| cs.len() - 1;
        assert_eq!(last.select(&c), 1);
    }
}
