use pdcrier_client::{CrierError, IncidentResult, PagerDutyClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PagerDutyClient {
    PagerDutyClient::builder("TOK")
        .from("a@b.com")
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn incident_json() -> serde_json::Value {
    json!({
        "incident": {
            "id": "PT4KHLK",
            "type": "incident",
            "incident_number": 42,
            "title": "Disk full",
            "description": "Disk full",
            "created_at": "2022-06-01T12:00:00Z",
            "status": "triggered",
            "incident_key": "Disk full"
        }
    })
}

#[tokio::test]
async fn creates_incident_with_headers_and_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/incidents"))
        .and(header("authorization", "Token token=TOK"))
        .and(header("from", "a@b.com"))
        .and(header("accept", "application/vnd.pagerduty+json;version=2"))
        .and(body_json(json!({
            "incident": {
                "type": "incident",
                "title": "Disk full",
                "service": {"id": "SVC1", "type": "service_reference"},
                "body": {"type": "incident_body", "details": "/var at 99%"},
                "incident_key": "Disk full"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(incident_json()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .incidents()
        .create("Disk full", "SVC1")
        .message("/var at 99%")
        .send()
        .await
        .unwrap();

    match result {
        IncidentResult::Created(incident) => {
            assert_eq!(incident.incident_number, 42);
            assert_eq!(incident.title, "Disk full");
            assert_eq!(incident.incident_key.as_deref(), Some("Disk full"));
        }
        other => panic!("expected Created, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_is_a_result_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/incidents"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "message": "Invalid Input Provided",
                "code": 2001,
                "errors": ["Open incident with matching dedup key already exists on this service"]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .incidents()
        .create("Disk full", "SVC1")
        .send()
        .await
        .unwrap();

    match result {
        IncidentResult::Duplicate(rejection) => {
            assert_eq!(rejection.status, 400);
            assert_eq!(rejection.message, "Invalid Input Provided");
            assert_eq!(rejection.code, Some(2001));
            assert_eq!(rejection.errors.len(), 1);
        }
        other => panic!("expected Duplicate, got {other:?}"),
    }
}

#[tokio::test]
async fn other_structured_error_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/incidents"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": {"errors": ["Service not found"]}})),
        )
        .mount(&server)
        .await;

    let result = client_for(&server)
        .incidents()
        .create("Disk full", "MISSING")
        .send()
        .await
        .unwrap();

    match result {
        IncidentResult::Rejected(rejection) => {
            assert_eq!(rejection.errors, vec!["Service not found".to_string()]);
            assert_eq!(rejection.message, "Bad Request");
            assert_eq!(rejection.code, None);
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_propagates_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/incidents"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error": {"message": "Unauthorized", "code": 2006}})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .incidents()
        .create("Disk full", "SVC1")
        .send()
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
}

#[tokio::test]
async fn malformed_success_body_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/incidents"))
        .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .incidents()
        .create("Disk full", "SVC1")
        .send()
        .await
        .unwrap_err();

    assert!(matches!(err, CrierError::Json(_)));
}

#[tokio::test]
async fn server_error_without_error_list_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/incidents"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .incidents()
        .create("Disk full", "SVC1")
        .allow_duplicates(true)
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(503));
}
