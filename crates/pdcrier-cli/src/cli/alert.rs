//! Create an incident from the command line.

use anyhow::Result;
use pdcrier_client::PagerDutyClient;
use pdcrier_core::{resolve, FileSettings, IncidentResult, Settings};
use std::process::ExitCode;
use tracing::{debug, error, info};

use super::args::Cli;
use super::EXIT_ALERT_FAILED;
use crate::config;

pub async fn execute(cli: Cli) -> Result<ExitCode> {
    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e}");
            return Ok(ExitCode::from(EXIT_ALERT_FAILED));
        }
    };
    debug!(?settings, "resolved settings");

    let client = match build_client(&cli, &settings) {
        Ok(client) => client,
        Err(e) => {
            error!("{e}");
            return Ok(ExitCode::from(EXIT_ALERT_FAILED));
        }
    };

    let mut builder = client
        .incidents()
        .create(cli.title.as_str(), settings.service_id.as_str())
        .allow_duplicates(cli.allow_duplicates);

    if let Some(message) = &cli.message {
        builder = builder.message(message.as_str());
    }
    if let Some(key) = &settings.incident_key {
        builder = builder.incident_key(key.as_str());
    }

    let result = builder.send().await?;

    Ok(ExitCode::from(report(&result)))
}

/// Read the settings file, apply flags and optionally persist the result.
fn load_settings(cli: &Cli) -> pdcrier_core::Result<Settings> {
    let file = config::load(&cli.settings_file)?;
    let file_incident_key = file.incident_key.clone();
    let settings = resolve(file, cli.overrides())?;

    if cli.save_settings {
        config::save(
            &cli.settings_file,
            &settings_to_save(&settings, file_incident_key),
        )?;
        info!("Saved settings to {}", cli.settings_file.display());
    }

    Ok(settings)
}

/// Settings written by `--save-settings`. The incident key keeps whatever the
/// file already had, so a one-off `--incident-key` never becomes the default
/// for every later alert.
fn settings_to_save(settings: &Settings, file_incident_key: Option<String>) -> FileSettings {
    FileSettings {
        incident_key: file_incident_key,
        ..FileSettings::from(settings)
    }
}

fn build_client(cli: &Cli, settings: &Settings) -> pdcrier_core::Result<PagerDutyClient> {
    let mut builder =
        PagerDutyClient::builder(settings.api_token.as_str()).from(settings.sender.as_str());
    if let Some(url) = &cli.api_url {
        builder = builder.base_url(url.as_str());
    }
    builder.build()
}

/// Log the outcome and pick the exit status.
fn report(result: &IncidentResult) -> u8 {
    match result {
        IncidentResult::Created(incident) => {
            debug!(?incident, "created incident");
            info!("Incident number: {}", incident.incident_number);
            info!("Incident title: {}", incident.title);
            info!(
                "Description: {}",
                incident.description.as_deref().unwrap_or("")
            );
            if let Some(created_at) = incident.created_at {
                info!("Created At: {}", created_at.to_rfc3339());
            }
            if let Some(url) = &incident.html_url {
                info!("URL: {url}");
            }
            0
        }
        IncidentResult::Duplicate(rejection) => {
            info!(
                status = rejection.status,
                code = rejection.code,
                "An open incident with the same incident key already exists, not creating another"
            );
            0
        }
        IncidentResult::Rejected(rejection) => {
            error!(
                status = rejection.status,
                code = rejection.code,
                "PagerDuty refused to create the incident: {}: {}",
                rejection.message,
                rejection.errors.join("; ")
            );
            EXIT_ALERT_FAILED
        }
    }
}
