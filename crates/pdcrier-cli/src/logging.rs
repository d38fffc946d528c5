//! Log output setup.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*};

/// Install the global subscriber. Logs go to stderr so scripts can keep stdout.
pub fn init(level: LevelFilter) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    if let Err(e) = tracing_subscriber::registry()
        .with(layer)
        .with(level)
        .try_init()
    {
        eprintln!("pd-alert: could not install log subscriber: {e}");
    }
}
