//! Main PagerDuty API client implementation.

use crate::api::IncidentApi;
use pdcrier_core::{ApiErrorResponse, CrierError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, FROM};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// The PagerDuty REST API base URL
const DEFAULT_BASE_URL: &str = "https://api.pagerduty.com";

/// Media type selecting version 2 of the REST API
const PAGERDUTY_ACCEPT: &str = "application/vnd.pagerduty+json;version=2";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Main PagerDuty API client
#[derive(Clone)]
pub struct PagerDutyClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
}

impl PagerDutyClient {
    /// Create a new client with the given API token using default settings
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        PagerDutyClientBuilder::new(api_token).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(api_token: impl Into<String>) -> PagerDutyClientBuilder {
        PagerDutyClientBuilder::new(api_token)
    }

    /// Access incident endpoints
    #[must_use]
    pub fn incidents(&self) -> IncidentApi<'_> {
        IncidentApi::new(self)
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Perform a POST request with JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");

        let response = self
            .inner
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| CrierError::InvalidUrl(e.to_string()))
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(transport_error)?;
            serde_json::from_str(&body).map_err(CrierError::Json)
        } else {
            self.handle_error(status, response).await
        }
    }

    /// Convert an error response to a CrierError
    async fn handle_error<T>(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> Result<T> {
        let code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        debug!(status = code, body = %body, "error response");

        let (message, error_code, errors) = match ApiErrorResponse::parse(&body) {
            Some(parsed) => (
                parsed
                    .error
                    .message
                    .unwrap_or_else(|| reason(status)),
                parsed.error.code,
                parsed.error.errors,
            ),
            None if body.is_empty() => (reason(status), None, Vec::new()),
            None => (body, None, Vec::new()),
        };

        if !errors.is_empty() {
            return Err(CrierError::Api {
                code,
                message,
                error_code,
                errors,
            });
        }

        match code {
            401 => Err(CrierError::Unauthorized),
            404 => Err(CrierError::NotFound { resource: message }),
            429 => {
                warn!("Rate limited by PagerDuty API");
                Err(CrierError::RateLimited)
            }
            _ => Err(CrierError::Api {
                code,
                message,
                error_code,
                errors,
            }),
        }
    }
}

fn reason(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

fn transport_error(e: reqwest::Error) -> CrierError {
    if e.is_timeout() {
        CrierError::Timeout(e.to_string())
    } else {
        CrierError::Http(e.to_string())
    }
}

/// Builder for configuring a [`PagerDutyClient`]
pub struct PagerDutyClientBuilder {
    api_token: String,
    from: Option<String>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl PagerDutyClientBuilder {
    /// Create a new builder with the given API token
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            from: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("pdcrier/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Email address of the user acting on incidents, sent as the `From` header
    #[must_use]
    pub fn from(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<PagerDutyClient> {
        let mut base_url =
            Url::parse(&self.base_url).map_err(|e| CrierError::InvalidUrl(e.to_string()))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        let mut auth = header_value(&format!("Token token={}", self.api_token), "API token")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(PAGERDUTY_ACCEPT));
        if let Some(from) = &self.from {
            headers.insert(FROM, header_value(from, "sender")?);
        }

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| CrierError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(PagerDutyClient {
            inner: Arc::new(ClientInner { http, base_url }),
        })
    }
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| CrierError::Config(format!("{what} contains characters not allowed in an HTTP header")))
}
