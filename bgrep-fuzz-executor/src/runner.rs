//! Case runner: writes a test case to disk and runs the tool against it.
//!
//! The data file write completes (flushed, synced, closed) before the tool
//! is spawned, so the tool never observes a partially written buffer.

use std::time::Instant;

use bgrep_fuzz_core::TestCase;

use crate::backend::{SearchTool, ToolOutput};
use crate::{DataFile, ExecutorError};

/// Runs test cases through a [`SearchTool`].
///
/// 1. Overwrites the fixed data file with the case's buffer
/// 2. Invokes the tool with the case's pattern and the data file path
/// 3. Returns the captured output unmodified
pub struct CaseRunner<T: SearchTool> {
    tool: T,
    data_file: DataFile,
}

impl<T: SearchTool> CaseRunner<T> {
    /// Create a runner that searches `data_file` with `tool`.
    #[must_use]
    pub fn new(tool: T, data_file: DataFile) -> Self {
        Self { tool, data_file }
    }

    /// The file every case is written to.
    #[must_use]
    pub fn data_file(&self) -> &DataFile {
        &self.data_file
    }

    /// The tool under test.
    #[must_use]
    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Write `case` to the data file and run the tool on it.
    ///
    /// # Errors
    /// Returns [`ExecutorError::Io`] if the data file cannot be written.
    /// Propagates errors from [`SearchTool::search`].
    pub async fn run(&self, case: &TestCase) -> Result<ToolOutput, ExecutorError> {
        let started = Instant::now();

        self.data_file.write(case.data()).await?;
        let output = self.tool.search(case.pattern(), self.data_file.path()).await?;

        tracing::debug!(
            data_len = case.data().len(),
            pattern_len = case.pattern().len(),
            stdout_bytes = output.stdout.len(),
            elapsed_us = started.elapsed().as_micros(),
            "case executed"
        );

        Ok(output)
    }
}
