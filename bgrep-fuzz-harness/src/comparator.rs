//! Output comparison and failure capture.
//!
//! The expected text is rebuilt from the oracle in `bgrep -Hb` format and
//! compared byte-for-byte with the tool's stdout. A mismatch writes the
//! pattern, both outputs and a JSON report to fixed file names, then
//! surfaces as [`HarnessError::Mismatch`].

use std::path::{Path, PathBuf};

use bgrep_fuzz_core::{format_matches, parse_matches, FailureReport, MatchSet, RunId, TestCase};

use crate::HarnessError;

/// Pattern artifact: the failing pattern as lowercase hex.
pub const PATTERN_FILE: &str = "res_pattern";
/// Expected-output artifact.
pub const EXPECTED_FILE: &str = "res_expected";
/// Actual-output artifact.
pub const ACTUAL_FILE: &str = "res_bgrep";
/// JSON failure report artifact.
pub const REPORT_FILE: &str = "res_report.json";

/// Where failure artifacts are written. Only the latest failure is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Directory holding all artifacts.
    pub dir: PathBuf,
    /// Pattern hex text.
    pub pattern: PathBuf,
    /// Expected output text.
    pub expected: PathBuf,
    /// Actual output bytes.
    pub actual: PathBuf,
    /// JSON [`FailureReport`].
    pub report: PathBuf,
}

impl ArtifactPaths {
    /// Artifact paths inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            pattern: dir.join(PATTERN_FILE),
            expected: dir.join(EXPECTED_FILE),
            actual: dir.join(ACTUAL_FILE),
            report: dir.join(REPORT_FILE),
            dir,
        }
    }
}

/// Identifies the case being compared, for the failure report.
#[derive(Debug, Clone, Copy)]
pub struct CaseContext<'a> {
    /// Harness session.
    pub run_id: RunId,
    /// 1-based iteration number.
    pub iteration: u64,
    /// Seed the case was generated from.
    pub case_seed: u64,
    /// Path string passed to the tool.
    pub filename: &'a str,
    /// The case itself.
    pub case: &'a TestCase,
}

/// Compares tool output with the oracle and records failures.
#[derive(Debug, Clone)]
pub struct Comparator {
    artifacts: ArtifactPaths,
}

impl Comparator {
    /// Create a comparator writing artifacts into `artifact_dir`.
    #[must_use]
    pub fn new(artifact_dir: impl Into<PathBuf>) -> Self {
        Self { artifacts: ArtifactPaths::in_dir(artifact_dir) }
    }

    /// Artifact locations.
    #[must_use]
    pub fn artifacts(&self) -> &ArtifactPaths {
        &self.artifacts
    }

    /// Check `actual` against the formatted oracle result.
    ///
    /// Equal outputs return `Ok(())` with no side effects.
    ///
    /// # Errors
    /// Returns [`HarnessError::Mismatch`] after writing all artifacts if the
    /// outputs differ, or [`HarnessError::Artifact`] / [`HarnessError::Report`]
    /// if the artifacts themselves cannot be written.
    pub async fn check(
        &self,
        ctx: &CaseContext<'_>,
        expected: MatchSet,
        actual: &[u8],
    ) -> Result<(), HarnessError> {
        let expected_text = format_matches(ctx.filename, &expected);
        if expected_text.as_bytes() == actual {
            tracing::trace!(iteration = ctx.iteration, matches = expected.len(), "outputs agree");
            return Ok(());
        }

        let actual_matches = std::str::from_utf8(actual)
            .ok()
            .and_then(|text| parse_matches(ctx.filename, text).ok());
        let report = FailureReport::new(
            ctx.run_id,
            ctx.iteration,
            ctx.case_seed,
            ctx.filename,
            ctx.case,
            expected,
            actual_matches,
        );

        let missing = report.missing();
        let spurious = report.spurious();
        let difference = first_difference(expected_text.as_bytes(), actual);
        tracing::error!(
            run_id = %ctx.run_id,
            iteration = ctx.iteration,
            case_seed = ctx.case_seed,
            pattern = %report.pattern_hex,
            data_len = report.data_len,
            data_hash = %report.data_hash,
            expected_matches = report.expected.len(),
            missing = ?first_few(&missing),
            spurious = ?first_few(&spurious),
            parseable = report.actual.is_some(),
            first_difference = ?difference,
            "bgrep output differs from reference"
        );

        self.write_artifacts(&report, &expected_text, actual).await?;

        Err(HarnessError::Mismatch {
            iteration: ctx.iteration,
            pattern_hex: report.pattern_hex,
            artifact_dir: self.artifacts.dir.clone(),
        })
    }

    async fn write_artifacts(
        &self,
        report: &FailureReport,
        expected_text: &str,
        actual: &[u8],
    ) -> Result<(), HarnessError> {
        let paths = &self.artifacts;
        create_dir(&paths.dir).await?;

        write_artifact(&paths.pattern, format!("{}\n", report.pattern_hex).as_bytes()).await?;
        write_artifact(&paths.expected, expected_text.as_bytes()).await?;
        write_artifact(&paths.actual, actual).await?;

        let mut json = serde_json::to_vec_pretty(report)?;
        json.push(b'\n');
        write_artifact(&paths.report, &json).await?;

        tracing::info!(dir = %paths.dir.display(), "failure artifacts written");
        Ok(())
    }
}

async fn create_dir(dir: &Path) -> Result<(), HarnessError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| HarnessError::Artifact { path: dir.to_owned(), source })
}

async fn write_artifact(path: &Path, contents: &[u8]) -> Result<(), HarnessError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| HarnessError::Artifact { path: path.to_owned(), source })
}

/// At most eight offsets, for log lines.
fn first_few(offsets: &[u64]) -> &[u64] {
    &offsets[..offsets.len().min(8)]
}

/// 1-based line number and both versions of the first differing line.
fn first_difference(expected: &[u8], actual: &[u8]) -> Option<(usize, String, String)> {
    let mut exp_lines = expected.split_inclusive(|&b| b == b'\n');
    let mut act_lines = actual.split_inclusive(|&b| b == b'\n');
    let mut line_no = 0;
    loop {
        line_no += 1;
        match (exp_lines.next(), act_lines.next()) {
            (None, None) => return None,
            (e, a) if e == a => {}
            (e, a) => {
                let show = |line: Option<&[u8]>| {
                    line.map_or_else(
                        || "<eof>".to_owned(),
                        |l| String::from_utf8_lossy(l).into_owned(),
                    )
                };
                return Some((line_no, show(e), show(a)));
            }
        }
    }
}
