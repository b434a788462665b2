use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use records_cell::router::records_routes;
use records_cell::services::{InMemoryRecordStore, RecordService};

fn create_test_app() -> Router {
    let records = RecordService::new(Arc::new(InMemoryRecordStore::new()));
    records_routes(Arc::new(records))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_treatment_lifecycle() {
    let app = create_test_app();

    let created = app
        .clone()
        .oneshot(json_request("POST", "/treatments", json!({ "name": "Cupping", "details": "Suction therapy" })))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let json = body_json(created).await;
    assert_eq!(json["message"], "Treatment added");
    let id = json["record"]["id"].as_str().unwrap().to_string();

    let updated = app
        .clone()
        .oneshot(json_request("PUT", &format!("/treatments/{}", id), json!({ "name": "Cupping", "details": "Updated" })))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["record"]["details"], "Updated");

    let fetched = app
        .clone()
        .oneshot(empty_request("GET", &format!("/treatments/{}", id)))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["details"], "Updated");

    let listed = app
        .clone()
        .oneshot(empty_request("GET", "/treatments"))
        .await
        .unwrap();
    assert_eq!(body_json(listed).await.as_array().unwrap().len(), 1);

    let deleted = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/treatments/{}", id)))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);

    let again = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/treatments/{}", id)))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(again).await["error"], "Treatment not found.");

    let gone = app
        .oneshot(empty_request("GET", &format!("/treatments/{}", id)))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_medicine_update_requires_price() {
    let app = create_test_app();

    let created = app
        .clone()
        .oneshot(json_request("POST", "/medicines", json!({ "name": "Amox", "price": 12.5 })))
        .await
        .unwrap();
    let id = body_json(created).await["record"]["id"].as_str().unwrap().to_string();

    let rejected = app
        .clone()
        .oneshot(json_request("PUT", &format!("/medicines/{}", id), json!({ "name": "Amoxicillin" })))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(rejected).await["error"], "Price is required.");

    let fetched = app
        .oneshot(empty_request("GET", &format!("/medicines/{}", id)))
        .await
        .unwrap();
    assert_eq!(body_json(fetched).await["price"], 12.5);
}

#[tokio::test]
async fn test_treatment_requires_name_and_details() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request("POST", "/treatments", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Name and details are required.");
}

#[tokio::test]
async fn test_review_rating_route() {
    let app = create_test_app();
    let treatment_id = Uuid::new_v4();

    let rejected = app
        .clone()
        .oneshot(json_request("POST", "/reviews", json!({
            "treatment_id": treatment_id, "user_id": "u1", "rating": 9
        })))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(rejected).await["error"], "Rating must be between 1 and 5.");

    for rating in [2, 4] {
        let submitted = app
            .clone()
            .oneshot(json_request("POST", "/reviews", json!({
                "treatment_id": treatment_id, "user_id": "u1", "rating": rating, "review": "fine"
            })))
            .await
            .unwrap();
        assert_eq!(submitted.status(), StatusCode::CREATED);
    }

    let rating = app
        .clone()
        .oneshot(empty_request("GET", &format!("/treatments/{}/rating", treatment_id)))
        .await
        .unwrap();
    let json = body_json(rating).await;
    assert_eq!(json["average_rating"], 3.0);
    assert_eq!(json["review_count"], 2);

    let reviews = app
        .oneshot(empty_request("GET", &format!("/treatments/{}/reviews", treatment_id)))
        .await
        .unwrap();
    assert_eq!(body_json(reviews).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_emergency_contacts_routes() {
    let app = create_test_app();

    let created = app
        .clone()
        .oneshot(json_request("POST", "/emergency-contacts", json!({
            "user_id": "u1", "name": "Mom", "phone": "555-0100"
        })))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["record"]["id"].as_str().unwrap().to_string();

    let listed = app
        .clone()
        .oneshot(empty_request("GET", "/users/u1/emergency-contacts"))
        .await
        .unwrap();
    assert_eq!(body_json(listed).await[0]["name"], "Mom");

    let deleted = app
        .oneshot(empty_request("DELETE", &format!("/users/u1/emergency-contacts/{}", id)))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(body_json(deleted).await["success"], true);
}

#[tokio::test]
async fn test_profile_upsert_routes() {
    let app = create_test_app();

    let missing = app
        .clone()
        .oneshot(empty_request("GET", "/users/u1/profile"))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let created = app
        .clone()
        .oneshot(json_request("PUT", "/users/u1/profile", json!({ "age": 40 })))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(body_json(created).await["message"], "Profile created successfully");

    let updated = app
        .clone()
        .oneshot(json_request("PUT", "/users/u1/profile", json!({ "age": 41 })))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["message"], "Profile updated successfully");

    let fetched = app
        .oneshot(empty_request("GET", "/users/u1/profile"))
        .await
        .unwrap();
    assert_eq!(body_json(fetched).await["age"], 41);
}

#[tokio::test]
async fn test_faqs_and_medicines() {
    let app = create_test_app();

    let faq = app
        .clone()
        .oneshot(json_request("POST", "/faqs", json!({ "question": "Parking?", "answer": "Yes" })))
        .await
        .unwrap();
    assert_eq!(faq.status(), StatusCode::CREATED);

    let medicine = app
        .clone()
        .oneshot(json_request("POST", "/medicines", json!({ "name": "Paracetamol" })))
        .await
        .unwrap();
    assert_eq!(medicine.status(), StatusCode::CREATED);
    assert_eq!(body_json(medicine).await["record"]["price"], 0.0);

    let faqs = app
        .oneshot(empty_request("GET", "/faqs"))
        .await
        .unwrap();
    assert_eq!(body_json(faqs).await[0]["answer"], "Yes");
}
