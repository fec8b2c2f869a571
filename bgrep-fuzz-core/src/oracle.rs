//! Brute-force reference search.
//!
//! This is the ground truth every `bgrep` run is judged against, so it stays
//! a plain sliding-window comparison with no skip tables or SIMD.

use serde::{Deserialize, Serialize};

/// Ascending byte offsets at which a pattern occurs in a buffer.
///
/// Overlapping occurrences are all present: `aa` in `aaaa` is `[0, 1, 2]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet(Vec<u64>);

impl MatchSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the offsets in ascending order.
    #[must_use]
    pub fn offsets(&self) -> &[u64] {
        &self.0
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the pattern never occurred.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u64>> for MatchSet {
    /// Wraps already-ordered offsets. Callers are responsible for ordering.
    fn from(offsets: Vec<u64>) -> Self {
        Self(offsets)
    }
}

/// Find every offset where `pattern` occurs in `data`.
///
/// Checks each start offset in `0..=data.len() - pattern.len()`. When the
/// pattern is longer than the data the range is empty and no byte of `data`
/// is read.
///
/// An empty `pattern` matches at every offset including `data.len()`;
/// [`TestCase`](crate::TestCase) never produces one.
///
/// # Complexity
/// O(n·m) where n = `data.len()`, m = `pattern.len()`.
#[must_use]
pub fn find_matches(data: &[u8], pattern: &[u8]) -> MatchSet {
    let Some(last_start) = data.len().checked_sub(pattern.len()) else {
        return MatchSet::new();
    };

    let offsets = (0..=last_start)
        .filter(|&i| &data[i..i + pattern.len()] == pattern)
        .map(|i| i as u64)
        .collect();

    MatchSet(offsets)
}
