//! Exact bounded TSP over a small platform subset.
//!
//! # Algorithm
//!
//! Permutations of the subset are enumerated in lexicographic order. Only
//! permutations whose first platform index is below the last are evaluated,
//! since a tour and its reverse have equal length.
//!
//! While a permutation's prefix is walked from the depot, the prefix length
//! plus the shortest depot distance of any member is a lower bound on every
//! completion:
//!
//! ```text
//! prefix(0, s[0], …, s[i]) + min_k d(s_k, 0) >= z   ⇒   prune s[0..=i]
//! ```
//!
//! Pruning sorts the unfixed suffix in descending order, so the next
//! lexicographic successor skips all permutations sharing that prefix.
//!
//! # Complexity
//!
//! O(n · n!) worst case; the bound makes practical subsets (a handful of
//! platforms reachable within the range) cheap.

use crate::distance::DistanceMatrix;

/// Length of the shortest closed tour from the depot through every platform
/// in `set`, if it is below `max_value`; otherwise `max_value`.
///
/// The caller only learns that no tour shorter than `max_value` exists, not
/// the true optimum above the bound. Input order does not matter.
///
/// # Examples
///
/// ```
/// use u_flightplan::distance::DistanceMatrix;
/// use u_flightplan::pricing::shortest_tour;
///
/// let dm = DistanceMatrix::from_data(
///     3,
///     vec![0.0, 10.0, 15.0, 10.0, 0.0, 8.0, 15.0, 8.0, 0.0],
/// )
/// .unwrap();
/// assert!((shortest_tour(&[2, 1], &dm, 100.0) - 33.0).abs() < 1e-10);
/// assert_eq!(shortest_tour(&[1, 2], &dm, 30.0), 30.0);
/// ```
pub fn shortest_tour(set: &[usize], distances: &DistanceMatrix, max_value: f64) -> f64 {
    if set.is_empty() {
        return 0.0;
    }

    let mut s = set.to_vec();
    s.sort_unstable();
    let n = s.len();

    let min_way_back = distances.min_distance(0, &s).unwrap_or(0.0);

    let mut z = max_value;
    loop {
        if s[0] < s[n - 1] || n == 1 {
            let mut perm_z = distances.get(0, s[0]);
            let mut pruned_at = None;
            for i in 1..n {
                perm_z += distances.get(s[i - 1], s[i]);
                if perm_z + min_way_back >= z {
                    pruned_at = Some(i);
                    break;
                }
            }

            match pruned_at {
                Some(i) => s[i + 1..].sort_unstable_by(|a, b| b.cmp(a)),
                None => {
                    perm_z += distances.get(s[n - 1], 0);
                    if perm_z < z {
                        z = perm_z;
                    }
                }
            }
        }

        if !next_permutation(&mut s) {
            break;
        }
    }
    z
}

/// Rearranges `items` into the next lexicographically greater permutation.
///
/// Returns `false` (leaving the slice in ascending order) once the last
/// permutation has been passed.
fn next_permutation(items: &mut [usize]) -> bool {
    let n = items.len();
    if n < 2 {
        return false;
    }

    let mut i = n - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        items.reverse();
        return false;
    }

    let mut j = n - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;
    use proptest::prelude::*;

    fn two_platform_matrix() -> DistanceMatrix {
        DistanceMatrix::from_data(3, vec![0.0, 10.0, 15.0, 10.0, 0.0, 8.0, 15.0, 8.0, 0.0])
            .expect("valid")
    }

    fn brute_force(set: &[usize], dm: &DistanceMatrix) -> f64 {
        let mut s = set.to_vec();
        s.sort_unstable();
        let mut best = f64::INFINITY;
        loop {
            best = best.min(dm.tour_length(&s));
            if !next_permutation(&mut s) {
                break;
            }
        }
        best
    }

    fn matrix_from_coords(coords: &[(f64, f64)]) -> DistanceMatrix {
        let mut platforms = vec![Platform::depot()];
        for (i, &(x, y)) in coords.iter().enumerate() {
            platforms.push(Platform::new(i + 1, x, y, 1));
        }
        DistanceMatrix::from_platforms(&platforms)
    }

    #[test]
    fn test_next_permutation_sequence() {
        let mut p = vec![1, 2, 3];
        let mut seen = vec![p.clone()];
        while next_permutation(&mut p) {
            seen.push(p.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]
        );
        assert_eq!(p, vec![1, 2, 3]);
    }

    #[test]
    fn test_two_platforms() {
        let dm = two_platform_matrix();
        assert!((shortest_tour(&[1, 2], &dm, 1e9) - 33.0).abs() < 1e-10);
    }

    #[test]
    fn test_single_platform() {
        let dm = two_platform_matrix();
        assert!((shortest_tour(&[2], &dm, 100.0) - 30.0).abs() < 1e-10);
        assert_eq!(shortest_tour(&[2], &dm, 25.0), 25.0);
    }

    #[test]
    fn test_empty_set() {
        let dm = two_platform_matrix();
        assert_eq!(shortest_tour(&[], &dm, 10.0), 0.0);
    }

    #[test]
    fn test_bound_is_returned_when_no_shorter_tour() {
        let dm = two_platform_matrix();
        // Optimum is exactly 33: a bound of 33 admits no strictly shorter tour.
        assert_eq!(shortest_tour(&[1, 2], &dm, 33.0), 33.0);
        assert_eq!(shortest_tour(&[1, 2], &dm, 20.0), 20.0);
        assert!((shortest_tour(&[1, 2], &dm, 33.5) - 33.0).abs() < 1e-10);
    }

    #[test]
    fn test_line_instance() {
        // Platforms on a line at x = 1..=5: optimal tour goes out and back.
        let coords: Vec<(f64, f64)> = (1..=5).map(|x| (x as f64, 0.0)).collect();
        let dm = matrix_from_coords(&coords);
        assert!((shortest_tour(&[5, 3, 1, 4, 2], &dm, 1e9) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_square_instance() {
        // Depot at a corner of a unit square: perimeter tour.
        let dm = matrix_from_coords(&[(1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!((shortest_tour(&[1, 2, 3], &dm, 1e9) - 4.0).abs() < 1e-10);
        assert!((shortest_tour(&[3, 1], &dm, 1e9) - (2.0 + 2f64.sqrt())).abs() < 1e-10);
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force_and_is_order_independent(
            coords in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 1..7),
            seed in any::<u64>(),
        ) {
            let dm = matrix_from_coords(&coords);
            let all: Vec<usize> = (1..=coords.len()).collect();
            let mut shuffled = all.clone();
            // Deterministic rotation + reversal driven by the seed.
            shuffled.rotate_left((seed as usize) % all.len());
            if seed % 2 == 1 {
                shuffled.reverse();
            }

            let expected = brute_force(&all, &dm);
            let a = shortest_tour(&all, &dm, 1e9);
            let b = shortest_tour(&shuffled, &dm, 1e9);
            prop_assert!((a - expected).abs() < 1e-9);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_bound_semantics(
            coords in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 1..6),
            bound in 1.0f64..400.0,
        ) {
            let dm = matrix_from_coords(&coords);
            let all: Vec<usize> = (1..=coords.len()).collect();
            let optimum = brute_force(&all, &dm);
            let result = shortest_tour(&all, &dm, bound);
            if optimum < bound - 1e-9 {
                prop_assert!((result - optimum).abs() < 1e-9);
            } else if optimum > bound + 1e-9 {
                prop_assert_eq!(result, bound);
            }
        }
    }
}
