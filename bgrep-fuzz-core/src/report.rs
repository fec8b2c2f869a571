use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::case::TestCase;
use crate::id::{ContentHash, RunId};
use crate::oracle::MatchSet;

/// Machine-readable record of one detected mismatch.
///
/// Written next to the raw pattern/expected/actual artifacts so the failing
/// case can be regenerated from `case_seed` and checked against `data_hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct FailureReport {
    /// Harness session that hit the mismatch.
    pub run_id: RunId,
    /// 1-based iteration number within the session.
    pub iteration: u64,
    /// Seed of the per-case RNG that generated the case.
    pub case_seed: u64,
    /// Path string passed to the tool.
    pub filename: String,
    /// Length of the searched buffer in bytes.
    pub data_len: usize,
    /// SHA-256 of the searched buffer.
    pub data_hash: ContentHash,
    /// Pattern as lowercase hex.
    pub pattern_hex: String,
    /// Offsets computed by the oracle.
    pub expected: MatchSet,
    /// Offsets parsed from the tool output, `None` if it was not parseable.
    pub actual: Option<MatchSet>,
    /// When the mismatch was detected.
    pub detected_at: DateTime<Utc>,
}

impl FailureReport {
    /// Build a report for `case`.
    ///
    /// # Arguments
    /// - `run_id`: the harness session
    /// - `iteration`: iteration number that failed
    /// - `case_seed`: seed the case was generated from
    /// - `filename`: path string given to the tool
    /// - `case`: the failing test case
    /// - `expected`: oracle result
    /// - `actual`: parsed tool result, if any
    #[must_use]
    pub fn new(
        run_id: RunId,
        iteration: u64,
        case_seed: u64,
        filename: &str,
        case: &TestCase,
        expected: MatchSet,
        actual: Option<MatchSet>,
    ) -> Self {
        Self {
            run_id,
            iteration,
            case_seed,
            filename: filename.to_owned(),
            data_len: case.data().len(),
            data_hash: ContentHash::of(case.data()),
            pattern_hex: case.pattern_hex(),
            expected,
            actual,
            detected_at: Utc::now(),
        }
    }

    /// Offsets the oracle found but the tool did not report.
    #[must_use]
    pub fn missing(&self) -> Vec<u64> {
        let Some(actual) = &self.actual else {
            return self.expected.offsets().to_vec();
        };
        self.expected
            .offsets()
            .iter()
            .copied()
            .filter(|o| actual.offsets().binary_search(o).is_err())
            .collect()
    }

    /// Offsets the tool reported that the oracle did not find.
    #[must_use]
    pub fn spurious(&self) -> Vec<u64> {
        let Some(actual) = &self.actual else {
            return Vec::new();
        };
        actual
            .offsets()
            .iter()
            .copied()
            .filter(|o| self.expected.offsets().binary_search(o).is_err())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_case() -> TestCase {
        TestCase::new(vec![0, 1, 2, 3, 4, 5, 2, 3, 9], vec![2, 3]).expect("valid case")
    }

    #[test]
    fn report_captures_case_fingerprint() {
        let case = scenario_case();
        let report = FailureReport::new(
            RunId::new(),
            3,
            99,
            "data",
            &case,
            case.expected_matches(),
            Some(MatchSet::from(vec![2])),
        );
        assert_eq!(report.data_len, 9);
        assert_eq!(report.pattern_hex, "0203");
        assert_eq!(report.data_hash, ContentHash::of(case.data()));
    }

    #[test]
    fn missing_and_spurious_diff_offsets() {
        let case = scenario_case();
        let report = FailureReport::new(
            RunId::new(),
            1,
            0,
            "data",
            &case,
            MatchSet::from(vec![2, 6]),
            Some(MatchSet::from(vec![2, 7])),
        );
        assert_eq!(report.missing(), vec![6]);
        assert_eq!(report.spurious(), vec![7]);
    }

    #[test]
    fn unparseable_actual_reports_everything_missing() {
        let case = scenario_case();
        let report =
            FailureReport::new(RunId::new(), 1, 0, "data", &case, MatchSet::from(vec![2, 6]), None);
        assert_eq!(report.missing(), vec![2, 6]);
        assert!(report.spurious().is_empty());
    }

    #[test]
    fn report_serializes_to_json() {
        let case = scenario_case();
        let report =
            FailureReport::new(RunId::new(), 1, 0, "data", &case, case.expected_matches(), None);
        let json = serde_json::to_string(&report).expect("report serialization must not fail");
        assert!(json.contains("\"pattern_hex\":\"0203\""), "got {json}");
        let back: FailureReport =
            serde_json::from_str(&json).expect("report deserialization must not fail");
        assert_eq!(back.expected, report.expected);
    }
}
