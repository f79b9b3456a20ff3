//! Pruned lexicographic enumeration of subsets.

/// Enumerates the nonempty subsets of `{0, …, k-1}` in lexicographic order,
/// as strictly increasing position sequences.
///
/// Each call to [`next`](Self::next) either *extends* the current subset by
/// the position after its tail, or *advances* the tail (carrying into earlier
/// positions on overflow). Passing `extend = false` skips every subset that
/// would be formed by appending later positions to the current one; callers
/// use it when such supersets cannot be useful.
///
/// # Examples
///
/// ```
/// use u_flightplan::pricing::SubsetEnumerator;
///
/// let mut e = SubsetEnumerator::new(3);
/// let mut all = Vec::new();
/// while let Some(s) = e.next(true) {
///     all.push(s.to_vec());
/// }
/// assert_eq!(
///     all,
///     vec![
///         vec![0],
///         vec![0, 1],
///         vec![0, 1, 2],
///         vec![0, 2],
///         vec![1],
///         vec![1, 2],
///         vec![2],
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SubsetEnumerator {
    positions: Vec<usize>,
    k: usize,
    exhausted: bool,
}

impl SubsetEnumerator {
    /// Creates an enumerator over `k` positions.
    pub fn new(k: usize) -> Self {
        Self {
            positions: Vec::with_capacity(k),
            k,
            exhausted: k == 0,
        }
    }

    /// Produces the next subset, or `None` once the enumeration is exhausted.
    ///
    /// The very first call always yields `[0]`.
    pub fn next(&mut self, extend: bool) -> Option<&[usize]> {
        if self.exhausted {
            return None;
        }

        let k = self.k;
        let n = self.positions.len();
        let can_extend = n == 0 || (extend && n < k && self.positions[n - 1] < k - 1);

        if can_extend {
            let next = self.positions.last().map_or(0, |&tail| tail + 1);
            self.positions.push(next);
        } else {
            let mut n = n;
            self.positions[n - 1] += 1;
            while self.positions[n - 1] >= k {
                n -= 1;
                if n == 0 {
                    self.positions.clear();
                    self.exhausted = true;
                    return None;
                }
                self.positions[n - 1] += 1;
            }
            self.positions.truncate(n);
        }

        Some(self.positions.as_slice())
    }

    /// The current subset (empty before the first call and after exhaustion).
    pub fn current(&self) -> &[usize] {
        &self.positions
    }
}
