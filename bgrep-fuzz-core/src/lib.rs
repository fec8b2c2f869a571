//! Core types for differential fuzzing of `bgrep`.
//!
//! Holds everything that does not touch a process or the filesystem: the
//! randomized [`TestCase`], the brute-force oracle producing a [`MatchSet`],
//! and the `-Hb` output format the tool's stdout is compared against.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod case;
pub mod error;
pub mod format;
pub mod id;
pub mod oracle;
pub mod report;

pub use case::{SizeBounds, TestCase};
pub use error::CoreError;
pub use format::{format_matches, parse_matches, OFFSET_WIDTH};
pub use id::{ContentHash, RunId};
pub use oracle::{find_matches, MatchSet};
pub use report::FailureReport;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_output_for_reference_scenario() {
        let case = TestCase::new(vec![0, 1, 2, 3, 4, 5, 2, 3, 9], vec![2, 3])
            .expect("non-empty pattern");
        let text = format_matches("data", &case.expected_matches());
        assert_eq!(text, "data:00000002\ndata:00000006\n");
    }

    #[test]
    fn truncated_tool_output_differs_from_expected() {
        let case = TestCase::new(vec![0, 1, 2, 3, 4, 5, 2, 3, 9], vec![2, 3])
            .expect("non-empty pattern");
        let expected = format_matches("data", &case.expected_matches());
        assert_ne!(expected.as_bytes(), b"data:00000002\n");
    }

    #[test]
    fn core_error_display_includes_reason() {
        let err =
            CoreError::InvalidBounds { reason: "max_pattern_len must be at least 1".to_owned() };
        assert!(err.to_string().contains("max_pattern_len"));
    }
}
