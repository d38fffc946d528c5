//! # pdcrier-cli
//!
//! Command-line front end that opens PagerDuty incidents.
//!
//! Settings are read from a YAML file (by default
//! `$HOME/.hass-tools/pagerduty.yaml`) and overridden by flags. Repeated
//! runs with the same title do not open duplicate incidents unless
//! `--allow-duplicates` is given, so it is safe to call from cron.

pub mod cli;
pub mod config;
pub mod logging;

pub use cli::run;
