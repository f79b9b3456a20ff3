//! Itineraries: the columns of the master problem.

use crate::lp::LpColumn;
use crate::pricing::PlatformSet;

/// A closed tour from the depot together with its passenger allocation.
///
/// `stops` holds the platforms in the order passengers were allocated (the
/// dual-price order of the pricing scan), not necessarily the flying order.
/// `allocation` is indexed by location id; the depot slot is always zero.
///
/// # Examples
///
/// ```
/// use u_flightplan::models::Itinerary;
///
/// // Capacity 4, demands [_, 2, 3]: platform 1 gets 2, platform 2 the rest.
/// let it = Itinerary::greedy(&[1, 2], 33.0, &[0, 2, 3], 4);
/// assert_eq!(it.allocation(), &[0, 2, 2]);
/// assert_eq!(it.total_passengers(), 4);
/// assert!(it.platforms().contains(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    platforms: PlatformSet,
    stops: Vec<usize>,
    tour_length: f64,
    allocation: Vec<u32>,
}

impl Itinerary {
    /// Creates an itinerary from explicit stops and allocation.
    pub fn new(stops: Vec<usize>, tour_length: f64, allocation: Vec<u32>) -> Self {
        let platforms = PlatformSet::from_indices(stops.iter().copied());
        Self {
            platforms,
            stops,
            tour_length,
            allocation,
        }
    }

    /// Allocates passengers greedily in stop order up to `capacity`.
    ///
    /// Each stop receives `min(remaining capacity, demand)`; this is a
    /// deterministic fill, not an optimal knapsack.
    pub fn greedy(stops: &[usize], tour_length: f64, demands: &[u32], capacity: u32) -> Self {
        let mut allocation = vec![0; demands.len()];
        let mut remaining = capacity;
        for &p in stops {
            let w = remaining.min(demands[p]);
            allocation[p] = w;
            remaining -= w;
        }
        Self::new(stops.to_vec(), tour_length, allocation)
    }

    /// The platforms visited.
    pub fn platforms(&self) -> &PlatformSet {
        &self.platforms
    }

    /// Visited platforms in allocation order.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Length of the shortest closed tour through the stops.
    pub fn tour_length(&self) -> f64 {
        self.tour_length
    }

    /// Passenger allocation indexed by location id.
    pub fn allocation(&self) -> &[u32] {
        &self.allocation
    }

    /// Passengers delivered to platform `id`.
    pub fn passengers(&self, id: usize) -> u32 {
        self.allocation.get(id).copied().unwrap_or(0)
    }

    /// Total passengers carried.
    pub fn total_passengers(&self) -> u32 {
        self.allocation.iter().sum()
    }

    /// Returns `true` if every allocation fits within `residual` demand.
    pub fn fits(&self, residual: &[u32]) -> bool {
        self.allocation
            .iter()
            .zip(residual)
            .all(|(&w, &d)| w <= d)
    }

    /// `tour_length − Σ w_i · y_i` for duals indexed by location id.
    pub fn reduced_cost(&self, duals: &[f64]) -> f64 {
        self.allocation
            .iter()
            .zip(duals)
            .fold(self.tour_length, |c, (&w, &y)| c - f64::from(w) * y)
    }

    /// Master-problem column: one coefficient per served platform row
    /// (row `i - 1` for platform `i`).
    pub fn to_column(&self) -> LpColumn {
        let mut column = LpColumn::new(self.tour_length);
        for (id, &w) in self.allocation.iter().enumerate().skip(1) {
            if w > 0 {
                column.push(id - 1, f64::from(w));
            }
        }
        column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greedy_fill_respects_capacity() {
        let it = Itinerary::greedy(&[2, 1], 33.0, &[0, 2, 3], 4);
        assert_eq!(it.allocation(), &[0, 1, 3]);
        assert_eq!(it.stops(), &[2, 1]);
        assert_eq!(it.total_passengers(), 4);
    }

    #[test]
    fn test_greedy_fill_zero_when_full() {
        let it = Itinerary::greedy(&[1, 2, 3], 50.0, &[0, 5, 2, 2], 5);
        assert_eq!(it.allocation(), &[0, 5, 0, 0]);
        assert_eq!(it.platforms().len(), 3);
    }

    #[test]
    fn test_reduced_cost() {
        let it = Itinerary::greedy(&[1, 2], 33.0, &[0, 2, 3], 4);
        // 33 - 2 * 10 - 2 * 10
        assert!((it.reduced_cost(&[0.0, 10.0, 10.0]) + 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_fits() {
        let it = Itinerary::greedy(&[1, 2], 33.0, &[0, 2, 3], 4);
        assert!(it.fits(&[0, 2, 2]));
        assert!(!it.fits(&[0, 1, 3]));
    }

    #[test]
    fn test_to_column_skips_unserved() {
        let it = Itinerary::new(vec![1, 3], 12.0, vec![0, 4, 0, 0]);
        let col = it.to_column();
        assert_eq!(col.rows(), &[0]);
        assert_eq!(col.coefficients(), &[4.0]);
        assert_eq!(col.cost(), 12.0);
    }

    #[test]
    fn test_passengers_out_of_range() {
        let it = Itinerary::new(vec![1], 2.0, vec![0, 1]);
        assert_eq!(it.passengers(1), 1);
        assert_eq!(it.passengers(7), 0);
    }
}
