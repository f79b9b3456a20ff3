//! Hashable fixed-capacity bit set over platform indices.

use std::fmt;

const WORD_BITS: usize = u64::BITS as usize;
const WORDS: usize = 1;

/// A set of location indices stored as a fixed-size word array.
///
/// Identity depends only on membership: two sets built from the same indices
/// in any order compare equal and hash identically, which makes the type
/// suitable as a memoization key.
///
/// # Examples
///
/// ```
/// use u_flightplan::pricing::PlatformSet;
///
/// let a = PlatformSet::from_indices([3, 1, 7]);
/// let b = PlatformSet::from_indices([7, 3, 1]);
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 3);
/// assert_eq!(a.to_string(), "{1,3,7}");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformSet {
    words: [u64; WORDS],
}

impl PlatformSet {
    /// Number of indices the set can hold (63 platforms plus the depot).
    pub const CAPACITY: usize = WORDS * WORD_BITS;

    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set containing the given indices.
    ///
    /// # Panics
    ///
    /// Panics if an index is not below [`Self::CAPACITY`].
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        let mut set = Self::new();
        for i in indices {
            set.insert(i);
        }
        set
    }

    /// Adds index `i`.
    pub fn insert(&mut self, i: usize) {
        assert!(i < Self::CAPACITY, "index {i} exceeds set capacity");
        self.words[i / WORD_BITS] |= 1u64 << (i % WORD_BITS);
    }

    /// Removes index `i`.
    pub fn remove(&mut self, i: usize) {
        assert!(i < Self::CAPACITY, "index {i} exceeds set capacity");
        self.words[i / WORD_BITS] &= !(1u64 << (i % WORD_BITS));
    }

    /// Returns `true` if index `i` is in the set.
    pub fn contains(&self, i: usize) -> bool {
        i < Self::CAPACITY && self.words[i / WORD_BITS] & (1u64 << (i % WORD_BITS)) != 0
    }

    /// Number of indices in the set.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Iterates over the members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..Self::CAPACITY).filter(move |&i| self.contains(i))
    }
}

impl FromIterator<usize> for PlatformSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::from_indices(iter)
    }
}

impl fmt::Display for PlatformSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (k, i) in self.iter().enumerate() {
            if k > 0 {
                write!(f, ",")?;
            }
            write!(f, "{i}")?;
        }
        write!(f, "}}")
    }
}
