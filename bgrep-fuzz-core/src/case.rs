//! Randomized test cases.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::oracle::{find_matches, MatchSet};

/// Upper bounds for one generated case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SizeBounds {
    /// Largest data length that may be drawn (inclusive).
    pub max_data_len: usize,
    /// Largest pattern length that may be drawn (inclusive, at least 1).
    pub max_pattern_len: usize,
}

impl SizeBounds {
    /// Create bounds, rejecting a zero pattern ceiling.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidBounds`] if `max_pattern_len` is zero.
    pub fn new(max_data_len: usize, max_pattern_len: usize) -> Result<Self, CoreError> {
        if max_pattern_len == 0 {
            return Err(CoreError::InvalidBounds {
                reason: "max_pattern_len must be at least 1".to_owned(),
            });
        }
        Ok(Self { max_data_len, max_pattern_len })
    }

    /// Draw per-case bounds inside these outer bounds.
    ///
    /// The data ceiling is uniform in `[0, max_data_len]` and the pattern
    /// ceiling uniform in `[1, max_pattern_len]`.
    #[must_use]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            max_data_len: rng.random_range(0..=self.max_data_len),
            max_pattern_len: rng.random_range(1..=self.max_pattern_len.max(1)),
        }
    }
}

/// One (data, pattern) pair submitted to both the oracle and the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    data: Vec<u8>,
    pattern: Vec<u8>,
}

impl TestCase {
    /// Build a case from explicit bytes.
    ///
    /// The pattern may be longer than the data; such a case simply has no
    /// matches.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyPattern`] if `pattern` is empty.
    pub fn new(data: Vec<u8>, pattern: Vec<u8>) -> Result<Self, CoreError> {
        if pattern.is_empty() {
            return Err(CoreError::EmptyPattern);
        }
        Ok(Self { data, pattern })
    }

    /// Generate a random case within `bounds`.
    ///
    /// Data length is uniform in `[0, max_data_len]`, pattern length uniform
    /// in `[1, max_pattern_len]`, drawn independently. Both buffers are filled
    /// with uniform random bytes, so the pattern usually does not occur.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidBounds`] if `bounds.max_pattern_len` is zero.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, bounds: SizeBounds) -> Result<Self, CoreError> {
        if bounds.max_pattern_len == 0 {
            return Err(CoreError::InvalidBounds {
                reason: "max_pattern_len must be at least 1".to_owned(),
            });
        }

        let data_len = rng.random_range(0..=bounds.max_data_len);
        let pattern_len = rng.random_range(1..=bounds.max_pattern_len);

        let mut data = vec![0u8; data_len];
        rng.fill(&mut data[..]);
        let mut pattern = vec![0u8; pattern_len];
        rng.fill(&mut pattern[..]);

        Self::new(data, pattern)
    }

    /// The buffer written to the data file.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The byte pattern searched for.
    #[must_use]
    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// The pattern as lowercase hex, as passed on the `bgrep` command line.
    #[must_use]
    pub fn pattern_hex(&self) -> String {
        hex::encode(&self.pattern)
    }

    /// Compute the reference matches for this case.
    #[must_use]
    pub fn expected_matches(&self) -> MatchSet {
        find_matches(&self.data, &self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn new_rejects_empty_pattern() {
        assert!(matches!(TestCase::new(vec![1, 2], vec![]), Err(CoreError::EmptyPattern)));
    }

    #[test]
    fn new_accepts_pattern_longer_than_data() {
        let case = match TestCase::new(vec![1], vec![1, 2, 3]) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert!(case.expected_matches().is_empty());
    }

    #[test]
    fn bounds_reject_zero_pattern_ceiling() {
        assert!(matches!(SizeBounds::new(10, 0), Err(CoreError::InvalidBounds { .. })));
    }

    #[test]
    fn generate_rejects_zero_pattern_ceiling() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = SizeBounds { max_data_len: 8, max_pattern_len: 0 };
        assert!(TestCase::generate(&mut rng, bounds).is_err());
    }

    #[test]
    fn pattern_hex_is_lowercase_and_even_length() {
        let case = TestCase::new(vec![], vec![0xAB, 0x0c, 0xFF]).expect("non-empty pattern");
        assert_eq!(case.pattern_hex(), "ab0cff");
    }

    #[test]
    fn same_seed_generates_same_case() {
        let bounds = SizeBounds::new(4096, 16).expect("valid bounds");
        let a = TestCase::generate(&mut StdRng::seed_from_u64(42), bounds).expect("generate");
        let b = TestCase::generate(&mut StdRng::seed_from_u64(42), bounds).expect("generate");
        assert_eq!(a, b, "case generation must be reproducible from a seed");
    }

    #[test]
    fn zero_data_ceiling_yields_empty_data() {
        let bounds = SizeBounds::new(0, 4).expect("valid bounds");
        let case = TestCase::generate(&mut StdRng::seed_from_u64(7), bounds).expect("generate");
        assert!(case.data().is_empty());
        assert!(!case.pattern().is_empty());
    }

    proptest::proptest! {
        #[test]
        fn proptest_generated_lengths_respect_bounds(
            seed in proptest::prelude::any::<u64>(),
            max_data in 0usize..2048,
            max_pattern in 1usize..64,
        ) {
            let bounds = SizeBounds::new(max_data, max_pattern).expect("valid bounds");
            let case = TestCase::generate(&mut StdRng::seed_from_u64(seed), bounds)
                .expect("generate");
            proptest::prop_assert!(case.data().len() <= max_data);
            proptest::prop_assert!((1..=max_pattern).contains(&case.pattern().len()));
        }

        #[test]
        fn proptest_sampled_bounds_stay_inside_outer_bounds(
            seed in proptest::prelude::any::<u64>(),
            max_data in 0usize..1_000_000,
            max_pattern in 1usize..100,
        ) {
            let outer = SizeBounds::new(max_data, max_pattern).expect("valid bounds");
            let inner = outer.sample(&mut StdRng::seed_from_u64(seed));
            proptest::prop_assert!(inner.max_data_len <= max_data);
            proptest::prop_assert!(inner.max_pattern_len >= 1);
            proptest::prop_assert!(inner.max_pattern_len <= max_pattern);
        }
    }
}
