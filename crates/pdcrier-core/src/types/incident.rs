use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Substring PagerDuty uses when an open incident already holds the dedup key
pub const DUPLICATE_INCIDENT_MARKER: &str = "matching dedup key already exists";

/// Reference to the service an incident belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceReference {
    /// Service ID
    pub id: String,

    /// Reference type, `service_reference` on requests
    #[serde(rename = "type")]
    pub kind: String,

    /// Service name (responses only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl ServiceReference {
    /// Reference a service by ID
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: "service_reference".to_string(),
            summary: None,
        }
    }
}

/// Free-form incident details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentBody {
    /// Body type, always `incident_body`
    #[serde(rename = "type")]
    pub kind: String,

    /// The details text. Not shown in SMS notifications.
    pub details: String,
}

impl IncidentBody {
    /// Create a body carrying the given details
    #[must_use]
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            kind: "incident_body".to_string(),
            details: details.into(),
        }
    }
}

/// Incident fields sent when creating an incident
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIncident {
    /// Always `incident`
    #[serde(rename = "type")]
    pub kind: String,

    /// Incident title, the only part visible in SMS notifications
    pub title: String,

    /// Owning service
    pub service: ServiceReference,

    /// Optional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<IncidentBody>,

    /// Deduplication key; omitted to allow duplicate open incidents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_key: Option<String>,
}

/// Request envelope for `POST /incidents`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIncidentRequest {
    pub incident: NewIncident,
}

/// Response envelope for `POST /incidents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentEnvelope {
    pub incident: Incident,
}

/// An incident as returned by PagerDuty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    /// Incident ID
    pub id: String,

    /// Account-wide incident number
    pub incident_number: u64,

    /// Incident title
    pub title: String,

    /// Description, usually the title again
    #[serde(default)]
    pub description: Option<String>,

    /// When the incident was created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// triggered, acknowledged or resolved
    #[serde(default)]
    pub status: Option<String>,

    /// Link to the incident in the web UI
    #[serde(default)]
    pub html_url: Option<String>,

    /// Echoed deduplication key
    #[serde(default)]
    pub incident_key: Option<String>,

    /// Owning service
    #[serde(default)]
    pub service: Option<ServiceReference>,
}

/// A structured refusal from PagerDuty to create an incident
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentRejection {
    /// HTTP status code of the response
    pub status: u16,

    /// Error summary
    pub message: String,

    /// PagerDuty error code, e.g. 2001 for invalid input
    pub code: Option<i64>,

    /// Error details as sent by PagerDuty
    pub errors: Vec<String>,
}

impl IncidentRejection {
    /// Returns true if PagerDuty refused because an open incident has the same key
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.contains(DUPLICATE_INCIDENT_MARKER))
    }
}

/// Outcome of an incident creation attempt that reached PagerDuty
#[derive(Debug, Clone)]
pub enum IncidentResult {
    /// The incident was created
    Created(Incident),

    /// An open incident with the same dedup key already exists
    Duplicate(IncidentRejection),

    /// PagerDuty refused the request for another reason
    Rejected(IncidentRejection),
}

impl IncidentResult {
    /// Sort a rejection into [`Self::Duplicate`] or [`Self::Rejected`]
    #[must_use]
    pub fn from_rejection(rejection: IncidentRejection) -> Self {
        if rejection.is_duplicate() {
            Self::Duplicate(rejection)
        } else {
            Self::Rejected(rejection)
        }
    }

    /// Returns true if an open incident exists after this attempt
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Created(_) | Self::Duplicate(_))
    }
}
