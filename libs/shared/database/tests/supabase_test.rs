use assert_matches::assert_matches;
use reqwest::Method;
use serde_json::{json, Value};
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{body_json, header, method, path, query_param};

use shared_database::{DatabaseError, SupabaseClient};
use shared_utils::test_utils::TestConfig;

async fn client_for(mock_server: &MockServer) -> SupabaseClient {
    let config = TestConfig::with_supabase_url(&mock_server.uri()).to_app_config();
    SupabaseClient::new(&config)
}

#[tokio::test]
async fn sends_api_key_and_bearer_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("select", "*"))
        .and(header("apikey", "test-service-key"))
        .and(header("Authorization", "Bearer test-service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let rows: Vec<Value> = client
        .request(Method::GET, "/rest/v1/doctors?select=*", None)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn return_representation_header_is_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/faqs"))
        .and(header("Prefer", "return=representation"))
        .and(body_json(json!({"question": "q", "answer": "a"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{"id": "x", "question": "q", "answer": "a"}])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let rows: Vec<Value> = client
        .request_with_headers(
            Method::POST,
            "/rest/v1/faqs",
            Some(json!({"question": "q", "answer": "a"})),
            Some(SupabaseClient::return_representation()),
        )
        .await
        .unwrap();

    assert_eq!(rows[0]["question"], "q");
}

#[tokio::test]
async fn empty_success_body_decodes_as_unit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/faqs"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result: Result<(), DatabaseError> = client
        .request(Method::DELETE, "/rest/v1/faqs?id=eq.1", None)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn unique_violation_is_typed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "details": "Key (doctor_id, date) already exists.",
            "hint": null,
            "message": "duplicate key value violates unique constraint"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result: Result<Vec<Value>, DatabaseError> = client
        .request(Method::POST, "/rest/v1/appointments", Some(json!({})))
        .await;

    assert_matches!(result, Err(DatabaseError::UniqueViolation(_)));
}

#[tokio::test]
async fn server_errors_keep_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result: Result<Vec<Value>, DatabaseError> = client
        .request(Method::GET, "/rest/v1/doctors", None)
        .await;

    assert_matches!(
        result,
        Err(DatabaseError::Api { status, .. }) if status.as_u16() == 503
    );
}
