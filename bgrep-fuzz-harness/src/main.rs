//! Entry point for the `bgrep-fuzz` binary.

use std::process::ExitCode;

use bgrep_fuzz_harness::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Cli::parse().into_config() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::from(e.exit_code());
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(
                error = %e,
                "cannot listen for Ctrl-C; only a failure will stop the run"
            );
            std::future::pending::<()>().await;
        }
    };

    match bgrep_fuzz_harness::run(config, shutdown).await {
        Ok(iterations) => {
            tracing::info!(iterations, "bgrep-fuzz finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "bgrep-fuzz stopped");
            ExitCode::from(e.exit_code())
        }
    }
}
