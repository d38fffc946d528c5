//! pd-alert - create a PagerDuty incident from a script or cron job.

use anyhow::Result;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    pdcrier_cli::run().await
}
