use std::net::SocketAddr;

use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::{AppConfig, StorageBackend};

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_api_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_api_key: "test-service-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_supabase_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_api_key: self.supabase_api_key.clone(),
            storage_backend: StorageBackend::Supabase,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        }
    }
}

/// Row shapes PostgREST returns for the clinic schema.
pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn doctor_response(doctor_id: Uuid, name: &str, specialty: &str, available_date: Option<NaiveDate>) -> Value {
        json!({
            "id": doctor_id,
            "name": name,
            "specialty": specialty,
            "available_date": available_date,
            "created_at": Utc::now().to_rfc3339()
        })
    }

    pub fn appointment_response(appointment_id: Uuid, doctor_id: Uuid, user_name: &str, date: NaiveDate) -> Value {
        json!({
            "id": appointment_id,
            "doctor_id": doctor_id,
            "user_name": user_name,
            "date": date,
            "created_at": Utc::now().to_rfc3339()
        })
    }

    pub fn unique_violation_response(constraint: &str) -> Value {
        json!({
            "code": "23505",
            "details": "Key already exists.",
            "hint": null,
            "message": format!("duplicate key value violates unique constraint \"{}\"", constraint)
        })
    }

    pub fn error_response(message: &str, code: &str) -> Value {
        json!({
            "code": code,
            "details": null,
            "hint": null,
            "message": message
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default();
        let app_config = config.to_app_config();

        assert_eq!(app_config.supabase_url, "http://localhost:54321");
        assert_eq!(app_config.supabase_api_key, "test-service-key");
        assert!(app_config.is_configured());
    }

    #[test]
    fn appointment_response_carries_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let row = MockSupabaseResponses::appointment_response(Uuid::new_v4(), Uuid::new_v4(), "alice", date);
        assert_eq!(row["date"], "2024-06-01");
        assert_eq!(row["user_name"], "alice");
    }
}
