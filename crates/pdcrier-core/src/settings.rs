//! Settings resolution.
//!
//! Settings come from two places: a YAML file ([`FileSettings`]) and
//! explicit caller overrides ([`SettingOverrides`], usually the command
//! line). [`resolve`] merges them into a validated [`Settings`] value, so
//! nothing downstream has to check for missing keys again.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CrierError, Result, SettingField};

/// Settings as read from the settings file. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// PagerDuty REST API token
    #[serde(
        rename = "pagerduty-api-token",
        alias = "api-token",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub api_token: Option<String>,

    /// Email address incidents are created on behalf of
    #[serde(
        rename = "default-sender",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sender: Option<String>,

    /// PagerDuty service id
    #[serde(
        rename = "service_id",
        alias = "service-id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub service_id: Option<String>,

    /// Deduplication key used when none is given for an incident
    #[serde(
        rename = "incident-key",
        alias = "incident_key",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub incident_key: Option<String>,
}

/// Values supplied by the caller that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingOverrides {
    /// `--api-token`, or `PAGERDUTY_API_TOKEN` when the flag is absent
    pub api_token: Option<String>,
    /// `--sender`
    pub sender: Option<String>,
    /// `--service-id`
    pub service_id: Option<String>,
    /// `--incident-key`, used for this run only
    pub incident_key: Option<String>,
}

/// Fully resolved settings. The three required fields are guaranteed non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// REST API token, masked in `Debug` output
    pub api_token: String,
    /// Email of the PagerDuty user the incident is created as
    pub sender: String,
    /// Service the incident is opened on
    pub service_id: String,
    /// Deduplication key; the incident title is used when `None`
    pub incident_key: Option<String>,
}

impl Settings {
    /// API token with everything but the edges masked, safe for logs
    #[must_use]
    pub fn masked_token(&self) -> String {
        let token = &self.api_token;
        let chars = token.chars().count();
        if chars > 8 {
            let head: String = token.chars().take(4).collect();
            let tail: String = token.chars().skip(chars - 4).collect();
            format!("{head}...{tail}")
        } else {
            "****".to_string()
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_token", &self.masked_token())
            .field("sender", &self.sender)
            .field("service_id", &self.service_id)
            .field("incident_key", &self.incident_key)
            .finish()
    }
}

impl From<&Settings> for FileSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            api_token: Some(settings.api_token.clone()),
            sender: Some(settings.sender.clone()),
            service_id: Some(settings.service_id.clone()),
            incident_key: settings.incident_key.clone(),
        }
    }
}

/// Merge file settings with overrides.
///
/// A non-empty override replaces the file value for the same field. Once
/// merged, the API token, sender and service id must all be present and
/// non-empty; the first one that is not is reported as
/// [`CrierError::MissingRequiredSetting`]. The incident key override is
/// copied as given.
pub fn resolve(file: FileSettings, overrides: SettingOverrides) -> Result<Settings> {
    let api_token = required(SettingField::ApiToken, overrides.api_token, file.api_token)?;
    let sender = required(SettingField::Sender, overrides.sender, file.sender)?;
    let service_id = required(SettingField::ServiceId, overrides.service_id, file.service_id)?;

    Ok(Settings {
        api_token,
        sender,
        service_id,
        incident_key: overrides.incident_key.or(file.incident_key),
    })
}

fn required(
    field: SettingField,
    override_value: Option<String>,
    file_value: Option<String>,
) -> Result<String> {
    override_value
        .filter(|v| !v.is_empty())
        .or(file_value)
        .filter(|v| !v.is_empty())
        .ok_or(CrierError::MissingRequiredSetting { field })
}
