use serde::{Deserialize, Serialize};

/// Error body returned by the PagerDuty REST API on non-success responses
///
/// ```json
/// {"error": {"message": "Invalid Input Provided", "code": 2001, "errors": ["..."]}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Contents of the `error` object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Short summary such as "Invalid Input Provided"
    #[serde(default)]
    pub message: Option<String>,

    /// PagerDuty error code (not the HTTP status)
    #[serde(default)]
    pub code: Option<i64>,

    /// Human readable details, one per problem
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ApiErrorResponse {
    /// Parse an error body, returning `None` if it is not PagerDuty's error shape
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_error() {
        let body = r#"{"error":{"message":"Invalid Input Provided","code":2001,"errors":["Service not found"]}}"#;
        let parsed = ApiErrorResponse::parse(body).unwrap();
        assert_eq!(parsed.error.message.as_deref(), Some("Invalid Input Provided"));
        assert_eq!(parsed.error.code, Some(2001));
        assert_eq!(parsed.error.errors, vec!["Service not found".to_string()]);
    }

    #[test]
    fn test_parse_errors_only() {
        let parsed = ApiErrorResponse::parse(r#"{"error":{"errors":["boom"]}}"#).unwrap();
        assert_eq!(parsed.error.message, None);
        assert_eq!(parsed.error.errors.len(), 1);
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(ApiErrorResponse::parse("<html>bad gateway</html>").is_none());
        assert!(ApiErrorResponse::parse(r#"{"message":"nope"}"#).is_none());
    }
}
