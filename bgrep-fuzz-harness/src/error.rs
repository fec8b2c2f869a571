//! Error types for the harness crate.

use std::path::PathBuf;

use bgrep_fuzz_core::CoreError;
use bgrep_fuzz_executor::ExecutorError;

/// Exit status for a detected output mismatch.
pub const EXIT_MISMATCH: u8 = 1;

/// Exit status for every other fatal condition.
pub const EXIT_FAILURE: u8 = 2;

/// Conditions that stop a fuzzing run.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HarnessError {
    /// The tool's output differed from the oracle. Artifacts were written.
    #[error("output mismatch at iteration {iteration} (pattern {pattern_hex}), see {artifact_dir}")]
    Mismatch {
        iteration: u64,
        pattern_hex: String,
        artifact_dir: PathBuf,
    },

    /// The tool could not be run or exited abnormally.
    #[error("search tool invocation failed: {0}")]
    Tool(#[from] ExecutorError),

    /// A domain invariant was violated (bad bounds, empty pattern).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure artifact could not be written.
    #[error("failed to write artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The failure report could not be serialized.
    #[error("failed to serialize failure report: {0}")]
    Report(#[from] serde_json::Error),
}

impl HarnessError {
    /// Process exit status for this error.
    ///
    /// Mismatches exit with [`EXIT_MISMATCH`] so they can be told apart from
    /// environment problems, which exit with [`EXIT_FAILURE`].
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            HarnessError::Mismatch { .. } => EXIT_MISMATCH,
            _ => EXIT_FAILURE,
        }
    }
}
