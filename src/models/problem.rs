//! Flight planning problem instance.

use super::Platform;
use crate::distance::DistanceMatrix;
use crate::error::{FlightPlanError, Result};
use crate::pricing::PlatformSet;

/// Largest number of locations (depot included) a problem may have.
pub const MAX_PLATFORMS: usize = PlatformSet::CAPACITY;

/// A validated helicopter flight planning instance.
///
/// Holds the platforms (index 0 = depot), the distance matrix, the passenger
/// capacity of one helicopter and the range limit of one flight.
///
/// # Examples
///
/// ```
/// use u_flightplan::models::{FlightProblem, Platform};
///
/// let platforms = vec![
///     Platform::depot(),
///     Platform::new(1, 10.0, 0.0, 2),
///     Platform::new(2, 0.0, 15.0, 3),
/// ];
/// let problem = FlightProblem::new(platforms, 4, 100.0).unwrap();
/// assert_eq!(problem.num_platforms(), 2);
/// assert_eq!(problem.demand(2), 3);
/// assert!((problem.distance(0, 1) - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct FlightProblem {
    platforms: Vec<Platform>,
    distances: DistanceMatrix,
    capacity: u32,
    range: f64,
}

impl FlightProblem {
    /// Builds a problem with Euclidean distances between the platforms.
    ///
    /// `platforms[0]` is the depot; `platforms[i]` must have id `i`.
    pub fn new(platforms: Vec<Platform>, capacity: u32, range: f64) -> Result<Self> {
        let distances = DistanceMatrix::from_platforms(&platforms);
        Self::with_distances(platforms, distances, capacity, range)
    }

    /// Builds a problem with an explicit distance matrix.
    ///
    /// The matrix must be square over all locations, symmetric, with a zero
    /// diagonal and nonnegative finite entries.
    pub fn with_distances(
        platforms: Vec<Platform>,
        distances: DistanceMatrix,
        capacity: u32,
        range: f64,
    ) -> Result<Self> {
        if platforms.len() < 2 {
            return Err(FlightPlanError::NoPlatforms);
        }
        if platforms.len() > MAX_PLATFORMS {
            return Err(FlightPlanError::TooManyPlatforms {
                count: platforms.len() - 1,
                max: MAX_PLATFORMS - 1,
            });
        }
        if capacity == 0 {
            return Err(FlightPlanError::InvalidCapacity);
        }
        if !range.is_finite() || range <= 0.0 {
            return Err(FlightPlanError::InvalidRange(range));
        }
        if distances.size() != platforms.len() {
            return Err(FlightPlanError::DimensionMismatch {
                expected: platforms.len(),
                found: distances.size(),
            });
        }
        for (i, p) in platforms.iter().enumerate() {
            if p.id() != i {
                return Err(FlightPlanError::InvalidDistances(format!(
                    "location {i} has id {}",
                    p.id()
                )));
            }
        }
        if platforms[0].demand() != 0 {
            return Err(FlightPlanError::InvalidDistances(
                "depot must have zero demand".into(),
            ));
        }
        if !distances.has_zero_diagonal() || !distances.is_symmetric(1e-9) {
            return Err(FlightPlanError::InvalidDistances(
                "matrix must be symmetric with a zero diagonal".into(),
            ));
        }
        let n = distances.size();
        for i in 0..n {
            for j in 0..n {
                let d = distances.get(i, j);
                if !d.is_finite() || d < 0.0 {
                    return Err(FlightPlanError::InvalidDistances(format!(
                        "entry ({i}, {j}) = {d}"
                    )));
                }
            }
        }

        Ok(Self {
            platforms,
            distances,
            capacity,
            range,
        })
    }

    /// Builds a problem from demands and an explicit matrix, placing every
    /// location at the origin. Useful when only distances are known.
    pub fn from_demands(
        demands: &[u32],
        distances: DistanceMatrix,
        capacity: u32,
        range: f64,
    ) -> Result<Self> {
        let mut platforms = vec![Platform::depot()];
        platforms.extend(
            demands
                .iter()
                .enumerate()
                .map(|(i, &d)| Platform::new(i + 1, 0.0, 0.0, d)),
        );
        Self::with_distances(platforms, distances, capacity, range)
    }

    /// Returns all locations (index 0 = depot, 1..=N = platforms).
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Number of platforms N (excluding depot).
    pub fn num_platforms(&self) -> usize {
        self.platforms.len() - 1
    }

    /// Distance between two locations.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// The shared distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Demand of platform `id` (0 for the depot).
    pub fn demand(&self, id: usize) -> u32 {
        self.platforms[id].demand()
    }

    /// Demand vector indexed by location id (depot slot is 0).
    pub fn demands(&self) -> Vec<u32> {
        self.platforms.iter().map(|p| p.demand()).collect()
    }

    /// Total demand over all platforms.
    pub fn total_demand(&self) -> u64 {
        self.platforms.iter().map(|p| u64::from(p.demand())).sum()
    }

    /// Passenger capacity of one helicopter.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Maximum length of one flight.
    pub fn range(&self) -> f64 {
        self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_platforms() -> Vec<Platform> {
        vec![
            Platform::depot(),
            Platform::new(1, 10.0, 0.0, 2),
            Platform::new(2, 0.0, 15.0, 3),
        ]
    }

    #[test]
    fn test_new() {
        let p = FlightProblem::new(two_platforms(), 4, 100.0).expect("valid");
        assert_eq!(p.num_platforms(), 2);
        assert_eq!(p.capacity(), 4);
        assert_eq!(p.range(), 100.0);
        assert_eq!(p.demands(), vec![0, 2, 3]);
        assert_eq!(p.total_demand(), 5);
        assert!((p.distance(0, 2) - 15.0).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_empty() {
        let err = FlightProblem::new(vec![Platform::depot()], 4, 100.0).unwrap_err();
        assert!(matches!(err, FlightPlanError::NoPlatforms));
    }

    #[test]
    fn test_rejects_too_many() {
        let mut platforms = vec![Platform::depot()];
        for i in 1..=MAX_PLATFORMS {
            platforms.push(Platform::new(i, i as f64, 0.0, 1));
        }
        let err = FlightProblem::new(platforms, 4, 100.0).unwrap_err();
        assert!(matches!(
            err,
            FlightPlanError::TooManyPlatforms { count: 64, max: 63 }
        ));
    }

    #[test]
    fn test_accepts_maximum() {
        let mut platforms = vec![Platform::depot()];
        for i in 1..MAX_PLATFORMS {
            platforms.push(Platform::new(i, i as f64, 0.0, 1));
        }
        assert!(FlightProblem::new(platforms, 4, 100.0).is_ok());
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(matches!(
            FlightProblem::new(two_platforms(), 0, 100.0).unwrap_err(),
            FlightPlanError::InvalidCapacity
        ));
        assert!(matches!(
            FlightProblem::new(two_platforms(), 4, 0.0).unwrap_err(),
            FlightPlanError::InvalidRange(_)
        ));
        assert!(matches!(
            FlightProblem::new(two_platforms(), 4, f64::NAN).unwrap_err(),
            FlightPlanError::InvalidRange(_)
        ));
    }

    #[test]
    fn test_rejects_misnumbered_platforms() {
        let platforms = vec![Platform::depot(), Platform::new(2, 1.0, 1.0, 1)];
        assert!(matches!(
            FlightProblem::new(platforms, 4, 100.0).unwrap_err(),
            FlightPlanError::InvalidDistances(_)
        ));
    }

    #[test]
    fn test_from_demands() {
        let dm = DistanceMatrix::from_data(
            3,
            vec![0.0, 10.0, 15.0, 10.0, 0.0, 8.0, 15.0, 8.0, 0.0],
        )
        .expect("valid");
        let p = FlightProblem::from_demands(&[2, 3], dm, 4, 100.0).expect("valid");
        assert_eq!(p.demand(1), 2);
        assert_eq!(p.distance(1, 2), 8.0);
    }

    #[test]
    fn test_rejects_mismatched_matrix() {
        let dm = DistanceMatrix::new(2);
        assert!(matches!(
            FlightProblem::from_demands(&[2, 3], dm, 4, 100.0).unwrap_err(),
            FlightPlanError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_rejects_asymmetric_matrix() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0, 0.0]).expect("valid");
        assert!(matches!(
            FlightProblem::from_demands(&[1], dm, 4, 100.0).unwrap_err(),
            FlightPlanError::InvalidDistances(_)
        ));
    }
}
