//! Search tool abstraction trait.
//!
//! Lets the runner drive the real `bgrep` binary or an in-process stub
//! without changing the comparison logic.

use std::path::Path;

use async_trait::async_trait;

use crate::ExecutorError;

/// Everything captured from one tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ToolOutput {
    /// Raw standard output, compared byte-for-byte against the oracle.
    pub stdout: Vec<u8>,
    /// Raw standard error, kept for diagnostics only.
    pub stderr: Vec<u8>,
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
}

impl ToolOutput {
    /// Output from a run that exited with status 0.
    #[must_use]
    pub fn from_stdout(stdout: impl Into<Vec<u8>>) -> Self {
        Self { stdout: stdout.into(), stderr: Vec::new(), exit_code: Some(0) }
    }
}

/// A binary pattern search tool.
///
/// Implementations must be `Send + Sync` so the harness can hold them
/// across await points.
#[async_trait]
pub trait SearchTool: Send + Sync {
    /// Search `file` for the exact bytes of `pattern` and return what the
    /// tool printed.
    ///
    /// # Errors
    /// Returns an [`ExecutorError`] if the tool cannot be run or exits in a
    /// way that is not a normal match/no-match result.
    async fn search(&self, pattern: &[u8], file: &Path) -> Result<ToolOutput, ExecutorError>;

    /// Check the tool is available before the first search.
    ///
    /// # Errors
    /// Returns [`ExecutorError::BinaryNotFound`] if the environment is not ready.
    async fn health_check(&self) -> Result<(), ExecutorError> {
        Ok(())
    }
}
