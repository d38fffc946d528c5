//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use pdcrier_core::SettingOverrides;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

use crate::config::default_settings_path;

/// Create a PagerDuty incident
///
/// Settings in the settings file are overridden by command line options.
/// Running again with the same title (or incident key) while the first
/// incident is still open does not page twice.
#[derive(Parser, Debug)]
#[command(name = "pd-alert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// PagerDuty API token
    #[arg(long, env = "PAGERDUTY_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Email address to send alerts from
    #[arg(long)]
    pub sender: Option<String>,

    /// Service ID to create the incident on
    #[arg(long)]
    pub service_id: Option<String>,

    /// Title of the incident - this is all you'll see via SMS
    #[arg(long)]
    pub title: String,

    /// Incident body - this won't be visible in SMSes
    #[arg(long)]
    pub message: Option<String>,

    /// Deduplication key (defaults to the title)
    #[arg(long)]
    pub incident_key: Option<String>,

    /// Open a new incident even if one with the same key is already open
    #[arg(long)]
    pub allow_duplicates: bool,

    /// Path to a settings file
    #[arg(
        long = "settings-file",
        visible_alias = "settings",
        value_name = "PATH",
        default_value_os_t = default_settings_path()
    )]
    pub settings_file: PathBuf,

    /// Write the merged settings back to the settings file
    #[arg(long)]
    pub save_settings: bool,

    /// Set log level
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// PagerDuty REST API base URL
    #[arg(long, hide = true)]
    pub api_url: Option<String>,
}

impl Cli {
    /// The settings given on the command line
    #[must_use]
    pub fn overrides(&self) -> SettingOverrides {
        SettingOverrides {
            api_token: self.api_token.clone(),
            sender: self.sender.clone(),
            service_id: self.service_id.clone(),
            incident_key: self.incident_key.clone(),
        }
    }
}

/// Log levels accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    #[value(name = "DEBUG")]
    Debug,
    #[value(name = "INFO")]
    Info,
    #[value(name = "WARNING")]
    Warning,
    #[value(name = "ERROR")]
    Error,
    #[value(name = "CRITICAL")]
    Critical,
}

impl LogLevel {
    /// Most verbose level that will be emitted
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error | Self::Critical => LevelFilter::ERROR,
        }
    }

    /// Name as written on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}
