use std::fmt;
use thiserror::Error;

/// Result type alias for pdcrier operations
pub type Result<T> = std::result::Result<T, CrierError>;

/// The mandatory settings an incident cannot be created without
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    /// PagerDuty REST API token
    ApiToken,
    /// Email address sent in the `From` header
    Sender,
    /// PagerDuty service the incident is opened on
    ServiceId,
}

impl SettingField {
    /// Key used for this field in the settings file
    #[must_use]
    pub const fn file_key(self) -> &'static str {
        match self {
            Self::ApiToken => "pagerduty-api-token",
            Self::Sender => "default-sender",
            Self::ServiceId => "service_id",
        }
    }

    /// Command-line flag that overrides this field
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::ApiToken => "--api-token",
            Self::Sender => "--sender",
            Self::ServiceId => "--service-id",
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::ApiToken => "PagerDuty API token",
            Self::Sender => "default sender email address",
            Self::ServiceId => "PagerDuty service id",
        }
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Errors that can occur while resolving settings or talking to PagerDuty
#[derive(Error, Debug)]
pub enum CrierError {
    /// A mandatory setting is absent after merging file and overrides
    #[error(
        "missing {field}: set `{key}` in the settings file or pass {flag}",
        key = .field.file_key(),
        flag = .field.flag()
    )]
    MissingRequiredSetting {
        /// Which setting is missing
        field: SettingField,
    },

    /// Settings file could not be read, parsed or written
    #[error("settings file error: {0}")]
    Settings(String),

    /// Authentication failed - invalid or missing API token
    #[error("authentication failed: invalid API token")]
    Unauthorized,

    /// Resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded")]
    RateLimited,

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
        /// PagerDuty error code from the body (not the HTTP status)
        error_code: Option<i64>,
        /// Detailed error strings from the `errors` list, if any
        errors: Vec<String>,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out: {0}")]
    Timeout(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Client configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl CrierError {
    /// Returns true if this error is a caller configuration problem
    /// rather than a failure talking to PagerDuty
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredSetting { .. } | Self::Settings(_) | Self::Config(_)
        )
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited => Some(429),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
