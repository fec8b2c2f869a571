//! Error types for the executor crate.

use std::path::PathBuf;
use std::time::Duration;

/// Errors that can occur while preparing or running the tool under test.
///
/// Every variant is a tool invocation failure, distinct from a search
/// mismatch: the harness treats them all as fatal and never retries.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExecutorError {
    /// Tool binary not found at the configured path or on `PATH`.
    #[error("search tool binary not found at {path}")]
    BinaryNotFound { path: PathBuf },

    /// The tool process could not be started or its output could not be read.
    #[error("search tool spawn failed: {0}")]
    SpawnFailed(String),

    /// The tool did not exit within the configured limit.
    #[error("search tool did not exit within {timeout:?}")]
    Timeout { timeout: Duration },

    /// The tool was killed by a signal instead of exiting.
    #[error("search tool terminated by a signal")]
    TerminatedBySignal,

    /// The tool exited with an error status (grep convention: 2 and above).
    #[error("search tool exited with status {code}: {stderr}")]
    ToolFailed { code: i32, stderr: String },

    /// The data file path cannot be passed as UTF-8 text.
    #[error("data file path is not valid UTF-8: {path}")]
    NonUtf8Path { path: PathBuf },

    /// Underlying I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
