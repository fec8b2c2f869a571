//! Differential fuzzing harness for `bgrep`.
//!
//! Wires the executor's [`CaseRunner`] to the [`Comparator`] and loops
//! forever through random cases until `bgrep` disagrees with the reference
//! search, the tool cannot be run, or the process is interrupted.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod comparator;
pub mod config;
pub mod driver;
pub mod error;

use std::future::Future;

use bgrep_fuzz_executor::{BgrepTool, CaseRunner, DataFile, SearchTool};

pub use comparator::{ArtifactPaths, CaseContext, Comparator};
pub use config::{Cli, HarnessConfig};
pub use driver::{case_from_seed, Driver};
pub use error::{HarnessError, EXIT_FAILURE, EXIT_MISMATCH};

/// Run the harness described by `config` against the real `bgrep` binary.
///
/// In replay mode a single case is checked. Otherwise the loop runs until
/// failure or until `shutdown` resolves, and returns the iteration count.
///
/// # Errors
/// Returns [`HarnessError::Tool`] if the tool is missing or fails, and
/// [`HarnessError::Mismatch`] on the first output difference.
pub async fn run<F>(config: HarnessConfig, shutdown: F) -> Result<u64, HarnessError>
where
    F: Future<Output = ()>,
{
    let tool = BgrepTool::new(config.tool.clone());
    tool.health_check().await?;
    run_with_tool(tool, config, shutdown).await
}

/// Run the harness with an arbitrary [`SearchTool`].
///
/// # Errors
/// Same as [`run`].
pub async fn run_with_tool<T, F>(
    tool: T,
    config: HarnessConfig,
    shutdown: F,
) -> Result<u64, HarnessError>
where
    T: SearchTool,
    F: Future<Output = ()>,
{
    let data_file = DataFile::new(config.data_file.clone())?;
    let runner = CaseRunner::new(tool, data_file);
    let comparator = Comparator::new(config.artifact_dir.clone());
    let mut driver = Driver::new(runner, comparator, config.bounds, config.seed)
        .with_progress_every(config.progress_every);

    tracing::info!(
        run_id = %driver.run_id(),
        seed = config.seed,
        tool = %config.tool.binary_path.display(),
        data_file = %config.data_file.display(),
        artifact_dir = %config.artifact_dir.display(),
        max_data_len = config.bounds.max_data_len,
        max_pattern_len = config.bounds.max_pattern_len,
        "bgrep-fuzz configured"
    );

    if let Some(case_seed) = config.replay {
        driver.replay(case_seed).await?;
        tracing::info!(case_seed, "replayed case matches reference");
        return Ok(driver.iterations());
    }

    driver.run_until(shutdown).await
}
