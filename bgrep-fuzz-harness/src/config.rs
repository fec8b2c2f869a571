//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use bgrep_fuzz_core::SizeBounds;
use bgrep_fuzz_executor::ToolConfig;
use clap::Parser;
use rand::Rng;

use crate::HarnessError;

/// Default ceiling on generated data length (1 MiB).
pub const DEFAULT_MAX_DATA_LEN: usize = 1024 * 1024;

/// Default ceiling on generated pattern length.
pub const DEFAULT_MAX_PATTERN_LEN: usize = 50;

/// Differential fuzzer for `bgrep`.
///
/// Generates random buffers and patterns, runs `bgrep -Hb` on them and
/// compares the output with a brute-force search. Runs until the outputs
/// differ or it is interrupted.
#[derive(Debug, Parser)]
#[command(name = "bgrep-fuzz", version, about)]
pub struct Cli {
    /// Path to the bgrep binary under test.
    #[arg(long, env = "BGREP_FUZZ_TOOL", default_value = "bgrep")]
    pub tool: PathBuf,

    /// File each generated buffer is written to before searching.
    #[arg(long, env = "BGREP_FUZZ_DATA_FILE", default_value = "data")]
    pub data_file: PathBuf,

    /// Directory failure artifacts are written to.
    #[arg(long, env = "BGREP_FUZZ_ARTIFACT_DIR", default_value = ".")]
    pub artifact_dir: PathBuf,

    /// Upper bound on generated data length in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_DATA_LEN)]
    pub max_data_len: usize,

    /// Upper bound on generated pattern length in bytes (at least 1).
    #[arg(long, default_value_t = DEFAULT_MAX_PATTERN_LEN)]
    pub max_pattern_len: usize,

    /// Seconds to wait for one bgrep run; 0 waits forever.
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Master seed; drawn from OS entropy when omitted.
    #[arg(long, env = "BGREP_FUZZ_SEED")]
    pub seed: Option<u64>,

    /// Log progress every N iterations; 0 disables.
    #[arg(long, default_value_t = 1000)]
    pub progress_every: u64,

    /// Regenerate and check the single case with this case seed, then exit.
    #[arg(long, value_name = "CASE_SEED")]
    pub replay: Option<u64>,
}

impl Cli {
    /// Validate the flags and resolve defaults.
    ///
    /// # Errors
    /// Returns [`HarnessError::Core`] if `max_pattern_len` is zero.
    pub fn into_config(self) -> Result<HarnessConfig, HarnessError> {
        let bounds = SizeBounds::new(self.max_data_len, self.max_pattern_len)?;
        let timeout = (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs));
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());

        Ok(HarnessConfig {
            tool: ToolConfig::new(self.tool).with_timeout(timeout),
            data_file: self.data_file,
            artifact_dir: self.artifact_dir,
            bounds,
            seed,
            progress_every: self.progress_every,
            replay: self.replay,
        })
    }
}

/// Resolved harness settings.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct HarnessConfig {
    /// How to run the tool.
    pub tool: ToolConfig,
    /// Shared data file path.
    pub data_file: PathBuf,
    /// Where failure artifacts go.
    pub artifact_dir: PathBuf,
    /// Outer size bounds; each iteration samples inside them.
    pub bounds: SizeBounds,
    /// Master seed for the case-seed stream.
    pub seed: u64,
    /// Progress log interval.
    pub progress_every: u64,
    /// Single case seed to replay instead of fuzzing.
    pub replay: Option<u64>,
}
