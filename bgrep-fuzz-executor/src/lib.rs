//! Subprocess adapter for the search tool under test.
//!
//! Writes each generated buffer to a fixed data file, runs `bgrep -Hb`
//! against it, and hands back the captured output for comparison.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod bgrep;
pub mod config;
pub mod data_file;
pub mod error;
pub mod runner;

pub use backend::{SearchTool, ToolOutput};
pub use bgrep::{BgrepTool, BGREP_FLAGS};
pub use config::{ToolConfig, DEFAULT_TIMEOUT};
pub use data_file::DataFile;
pub use error::ExecutorError;
pub use runner::CaseRunner;
