//! CLI argument parsing and dispatch.

pub mod alert;
pub mod args;

use anyhow::Result;
use args::Cli;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info};

/// Exit status for configuration problems and refused incidents.
pub const EXIT_ALERT_FAILED: u8 = 13;

/// Run the CLI application.
///
/// Configuration problems and refused incidents become an exit code here;
/// transport failures are returned as errors.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    crate::logging::init(cli.log_level.filter());
    info!("Set log level to {}", cli.log_level.as_str());
    debug!(
        settings_file = %cli.settings_file.display(),
        title = %cli.title,
        allow_duplicates = cli.allow_duplicates,
        "parsed command line"
    );

    alert::execute(cli).await
}
