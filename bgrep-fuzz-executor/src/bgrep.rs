//! `bgrep` subprocess backend.
//!
//! Runs `bgrep -Hb <hex pattern> <file>` and captures its output. `-H`
//! forces the filename prefix even for a single file, `-b` prints byte
//! offsets instead of an xxd-style dump.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::backend::{SearchTool, ToolOutput};
use crate::{ExecutorError, ToolConfig};

/// Flags requesting filename-prefixed hex byte offsets.
pub const BGREP_FLAGS: &str = "-Hb";

/// `bgrep` backend.
///
/// Each search spawns one short-lived process. The child is killed if the
/// search future is dropped or the timeout expires.
#[derive(Debug, Clone)]
pub struct BgrepTool {
    config: ToolConfig,
}

impl BgrepTool {
    /// Create a backend with the given configuration.
    #[must_use]
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SearchTool for BgrepTool {
    async fn search(&self, pattern: &[u8], file: &Path) -> Result<ToolOutput, ExecutorError> {
        let pattern_hex = hex::encode(pattern);
        let binary = &self.config.binary_path;

        tracing::trace!(
            tool = %binary.display(),
            pattern = %pattern_hex,
            file = %file.display(),
            "invoking search tool"
        );

        let mut command = Command::new(binary);
        command
            .arg(BGREP_FLAGS)
            .arg(&pattern_hex)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let run = command.output();
        let result = match self.config.timeout {
            Some(timeout) => tokio::time::timeout(timeout, run)
                .await
                .map_err(|_| ExecutorError::Timeout { timeout })?,
            None => run.await,
        };
        let output = result
            .map_err(|e| ExecutorError::SpawnFailed(format!("exec {}: {e}", binary.display())))?;

        let exit_code = output.status.code();
        match exit_code {
            // grep convention: 0 = matches found, 1 = no match.
            Some(0 | 1) => {}
            Some(code) => {
                return Err(ExecutorError::ToolFailed {
                    code,
                    stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_owned(),
                });
            }
            None => return Err(ExecutorError::TerminatedBySignal),
        }

        tracing::trace!(
            bytes = output.stdout.len(),
            exit_code = ?exit_code,
            "search tool finished"
        );

        Ok(ToolOutput { stdout: output.stdout, stderr: output.stderr, exit_code })
    }

    async fn health_check(&self) -> Result<(), ExecutorError> {
        which_binary(&self.config.binary_path)
    }
}

/// Verify a binary exists either at the given path or in `PATH`.
///
/// Paths with more than one component (`./bgrep`, `../src/bgrep`) are
/// checked directly; bare names are looked up in each `PATH` entry.
fn which_binary(path: &Path) -> Result<(), ExecutorError> {
    if path.is_absolute() || path.components().count() > 1 {
        if path.is_file() {
            return Ok(());
        }
        return Err(ExecutorError::BinaryNotFound { path: path.to_owned() });
    }

    let found = std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(path).is_file()))
        .unwrap_or(false);

    if found {
        Ok(())
    } else {
        Err(ExecutorError::BinaryNotFound { path: path.to_owned() })
    }
}
