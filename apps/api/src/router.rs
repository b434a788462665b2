use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use tracing::{info, warn};

use appointment_cell::router::appointment_routes;
use appointment_cell::services::{
    InMemoryAppointmentLedger, SchedulingService, SupabaseAppointmentLedger,
};
use doctor_cell::router::doctor_routes;
use doctor_cell::services::{InMemoryDoctorDirectory, SharedDirectory, SupabaseDoctorDirectory};
use records_cell::router::records_routes;
use records_cell::services::{InMemoryRecordStore, RecordService, SupabaseRecordStore};
use shared_config::{AppConfig, StorageBackend};
use shared_database::SupabaseClient;

/// Everything the routers need, wired against one storage backend.
pub struct Services {
    pub directory: SharedDirectory,
    pub scheduling: Arc<SchedulingService>,
    pub records: Arc<RecordService>,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Self {
        match config.storage_backend {
            StorageBackend::Supabase if config.is_configured() => {
                info!("Using Supabase storage at {}", config.supabase_url);
                Self::supabase(config)
            }
            StorageBackend::Supabase => {
                warn!("Supabase is not configured, falling back to in-memory storage");
                Self::in_memory()
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Self::in_memory()
            }
        }
    }

    pub fn supabase(config: &AppConfig) -> Self {
        let supabase = Arc::new(SupabaseClient::new(config));
        let directory: SharedDirectory = Arc::new(SupabaseDoctorDirectory::new(supabase.clone()));
        let ledger = Arc::new(SupabaseAppointmentLedger::new(supabase.clone()));

        Self {
            scheduling: Arc::new(SchedulingService::new(directory.clone(), ledger)),
            directory,
            records: Arc::new(RecordService::new(Arc::new(SupabaseRecordStore::new(supabase)))),
        }
    }

    pub fn in_memory() -> Self {
        let directory: SharedDirectory = Arc::new(InMemoryDoctorDirectory::new());
        let ledger = Arc::new(InMemoryAppointmentLedger::new());

        Self {
            scheduling: Arc::new(SchedulingService::new(directory.clone(), ledger)),
            directory,
            records: Arc::new(RecordService::new(Arc::new(InMemoryRecordStore::new()))),
        }
    }
}

pub fn create_router(services: Services) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic API is running!" }))
        .nest("/doctors", doctor_routes(services.directory))
        .nest("/appointments", appointment_routes(services.scheduling))
        .merge(records_routes(services.records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn liveness_route_answers() {
        let app = create_router(Services::in_memory());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn doctors_and_appointments_share_the_directory() {
        let app = create_router(Services::in_memory());

        let doctor = app
            .clone()
            .oneshot(post("/doctors", json!({
                "name": "Dr. A",
                "specialty": "Cardio",
                "available_date": "2024-06-01"
            })))
            .await
            .unwrap();
        assert_eq!(doctor.status(), StatusCode::CREATED);
        let doctor_id = body_json(doctor).await["doctor"]["id"].clone();

        let alice = app
            .clone()
            .oneshot(post("/appointments/book", json!({ "doctor_id": doctor_id, "user_name": "alice" })))
            .await
            .unwrap();
        assert_eq!(alice.status(), StatusCode::CREATED);

        let bob = app
            .clone()
            .oneshot(post("/appointments/book", json!({ "doctor_id": doctor_id, "user_name": "bob" })))
            .await
            .unwrap();
        assert_eq!(bob.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(bob).await["error"], "Doctor already appointed on this date.");

        let cancelled = app
            .clone()
            .oneshot(post("/appointments/cancel", json!({ "doctor_id": doctor_id, "user_name": "alice" })))
            .await
            .unwrap();
        assert_eq!(cancelled.status(), StatusCode::OK);

        let rebooked = app
            .oneshot(post("/appointments/book", json!({ "doctor_id": doctor_id, "user_name": "bob" })))
            .await
            .unwrap();
        assert_eq!(rebooked.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn records_are_mounted_at_root() {
        let app = create_router(Services::in_memory());

        let response = app
            .oneshot(Request::builder().uri("/faqs").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
