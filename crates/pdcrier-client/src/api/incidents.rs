//! Incident API endpoints.

use crate::PagerDutyClient;
use pdcrier_core::{
    CreateIncidentRequest, CrierError, IncidentBody, IncidentEnvelope, IncidentRejection,
    IncidentResult, NewIncident, Result, ServiceReference,
};
use tracing::{debug, info, warn};

/// Incident API endpoints
pub struct IncidentApi<'a> {
    client: &'a PagerDutyClient,
}

impl<'a> IncidentApi<'a> {
    pub(crate) const fn new(client: &'a PagerDutyClient) -> Self {
        Self { client }
    }

    /// Create a new incident on a service
    #[must_use]
    pub fn create(
        &self,
        title: impl Into<String>,
        service_id: impl Into<String>,
    ) -> CreateIncidentBuilder<'a> {
        CreateIncidentBuilder::new(self.client, title.into(), service_id.into())
    }
}

/// Builder for creating incidents
///
/// Unless [`allow_duplicates`](Self::allow_duplicates) is set, the request
/// carries an incident key so PagerDuty refuses a second open incident with
/// the same key. Without an explicit key the title is used.
pub struct CreateIncidentBuilder<'a> {
    client: &'a PagerDutyClient,
    title: String,
    service_id: String,
    message: Option<String>,
    incident_key: Option<String>,
    allow_duplicates: bool,
}

impl<'a> CreateIncidentBuilder<'a> {
    const fn new(client: &'a PagerDutyClient, title: String, service_id: String) -> Self {
        Self {
            client,
            title,
            service_id,
            message: None,
            incident_key: None,
            allow_duplicates: false,
        }
    }

    /// Set the incident details. An empty message sends no body.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the deduplication key
    #[must_use]
    pub fn incident_key(mut self, key: impl Into<String>) -> Self {
        self.incident_key = Some(key.into());
        self
    }

    /// Allow several open incidents with the same title
    #[must_use]
    pub const fn allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// The request this builder will send
    #[must_use]
    pub fn request(&self) -> CreateIncidentRequest {
        let body = match self.message.as_deref() {
            Some(details) if !details.is_empty() => {
                debug!(details, "setting incident body");
                Some(IncidentBody::new(details))
            }
            _ => {
                debug!("no incident body set");
                None
            }
        };

        let incident_key = if self.allow_duplicates {
            None
        } else {
            Some(
                self.incident_key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .unwrap_or_else(|| self.title.clone()),
            )
        };

        CreateIncidentRequest {
            incident: NewIncident {
                kind: "incident".to_string(),
                title: self.title.clone(),
                service: ServiceReference::new(self.service_id.clone()),
                body,
                incident_key,
            },
        }
    }

    /// Create the incident
    ///
    /// Structured refusals from PagerDuty come back as
    /// [`IncidentResult::Duplicate`] or [`IncidentResult::Rejected`]; only
    /// transport, authentication and decoding failures are errors.
    pub async fn send(self) -> Result<IncidentResult> {
        let request = self.request();
        info!(
            title = %request.incident.title,
            service_id = %request.incident.service.id,
            incident_key = ?request.incident.incident_key,
            "creating incident"
        );
        debug!(payload = ?request, "incident payload");

        match self
            .client
            .post::<IncidentEnvelope, _>("incidents", &request)
            .await
        {
            Ok(envelope) => {
                debug!(incident = ?envelope.incident, "incident created");
                Ok(IncidentResult::Created(envelope.incident))
            }
            Err(CrierError::Api {
                code,
                message,
                error_code,
                errors,
            }) if !errors.is_empty() => {
                for error in &errors {
                    warn!(status = code, error_code, "PagerDuty: {error}");
                }
                Ok(IncidentResult::from_rejection(IncidentRejection {
                    status: code,
                    message,
                    code: error_code,
                    errors,
                }))
            }
            Err(e) => Err(e),
        }
    }
}
