//! Dense distance matrix.

use crate::models::Platform;

/// A dense n×n distance matrix stored in row-major order.
///
/// Index 0 is the depot, indices 1..n are platforms. Built once per problem
/// and shared read-only by the pricing components.
///
/// # Examples
///
/// ```
/// use u_flightplan::models::Platform;
/// use u_flightplan::distance::DistanceMatrix;
///
/// let platforms = vec![
///     Platform::depot(),
///     Platform::new(1, 3.0, 4.0, 2),
///     Platform::new(2, 6.0, 8.0, 3),
/// ];
/// let dm = DistanceMatrix::from_platforms(&platforms);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from platform coordinates.
    pub fn from_platforms(platforms: &[Platform]) -> Self {
        let n = platforms.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = platforms[i].distance_to(&platforms[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix (depot included).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` if every diagonal entry is zero.
    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.size).all(|i| self.get(i, i) == 0.0)
    }

    /// Shortest distance from `from` to any of the given candidates.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn min_distance(&self, from: usize, candidates: &[usize]) -> Option<f64> {
        candidates
            .iter()
            .map(|&c| self.get(from, c))
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Length of the closed tour depot → `order[0]` → … → `order[n-1]` → depot.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        let mut prev = 0;
        let mut total = 0.0;
        for &p in order {
            total += self.get(prev, p);
            prev = p;
        }
        total + self.get(prev, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_platforms() -> Vec<Platform> {
        vec![
            Platform::depot(),
            Platform::new(1, 3.0, 4.0, 10),
            Platform::new(2, 0.0, 8.0, 20),
        ]
    }

    #[test]
    fn test_from_platforms() {
        let dm = DistanceMatrix::from_platforms(&sample_platforms());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.get(0, 0)).abs() < 1e-10);
        assert!(dm.has_zero_diagonal());
    }

    #[test]
    fn test_symmetric() {
        let dm = DistanceMatrix::from_platforms(&sample_platforms());
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 5.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_asymmetric_matrix() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0);
        dm.set(1, 0, 15.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_min_distance() {
        let dm = DistanceMatrix::from_platforms(&sample_platforms());
        assert_eq!(dm.min_distance(0, &[1, 2]), Some(dm.get(0, 1)));
        assert_eq!(dm.min_distance(0, &[2]), Some(dm.get(0, 2)));
        assert_eq!(dm.min_distance(0, &[]), None);
    }

    #[test]
    fn test_tour_length() {
        let dm = DistanceMatrix::from_platforms(&sample_platforms());
        // 0 → 1 → 2 → 0 = 5 + 5 + 8
        assert!((dm.tour_length(&[1, 2]) - 18.0).abs() < 1e-10);
        assert!((dm.tour_length(&[2, 1]) - 18.0).abs() < 1e-10);
        assert_eq!(dm.tour_length(&[]), 0.0);
    }
}
