//! Search tool configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default limit on a single tool run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How to invoke the tool under test.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ToolConfig {
    /// Path to the `bgrep` binary, or a bare name looked up on `PATH`.
    pub binary_path: PathBuf,

    /// Upper bound on one invocation. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl ToolConfig {
    /// Create a config with the default timeout.
    ///
    /// # Arguments
    /// - `binary_path`: path to the tool binary
    #[must_use]
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path, timeout: Some(DEFAULT_TIMEOUT) }
    }

    /// Replace the timeout. `None` disables it.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("bgrep"))
    }
}
