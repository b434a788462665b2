use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_database::SupabaseClient;

use crate::models::{CreateDoctorRequest, Doctor, DoctorError};
use crate::services::directory::DoctorDirectory;

/// Directory backed by the `doctors` table.
pub struct SupabaseDoctorDirectory {
    supabase: Arc<SupabaseClient>,
}

#[derive(Debug, Deserialize)]
struct AvailableDateRow {
    available_date: Option<NaiveDate>,
}

impl SupabaseDoctorDirectory {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }

    fn parse_doctor(row: Value) -> Result<Doctor, DoctorError> {
        serde_json::from_value(row)
            .map_err(|e| DoctorError::DatabaseError(format!("Failed to parse doctor: {}", e)))
    }
}

#[async_trait]
impl DoctorDirectory for SupabaseDoctorDirectory {
    async fn register(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        let new_doctor = request.validate()?;
        debug!("Creating doctor profile for: {}", new_doctor.name);

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/doctors",
            Some(json!(new_doctor)),
            Some(SupabaseClient::return_representation()),
        ).await.map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next()
            .ok_or_else(|| DoctorError::DatabaseError("Failed to create doctor profile".to_string()))?;

        let doctor = Self::parse_doctor(row)?;
        debug!("Doctor profile created with ID: {}", doctor.id);
        Ok(doctor)
    }

    async fn get(&self, doctor_id: Uuid) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor profile: {}", doctor_id);

        let path = format!("/rest/v1/doctors?id=eq.{}", doctor_id);
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await.map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next().ok_or(DoctorError::NotFound)?;
        Self::parse_doctor(row)
    }

    async fn list(&self) -> Result<Vec<Doctor>, DoctorError> {
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            "/rest/v1/doctors?select=*&order=name.asc,created_at.asc",
            None,
        ).await.map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        result.into_iter().map(Self::parse_doctor).collect()
    }

    async fn set_available_date(
        &self,
        doctor_id: Uuid,
        available_date: Option<NaiveDate>,
    ) -> Result<Doctor, DoctorError> {
        debug!("Setting available date of doctor {} to {:?}", doctor_id, available_date);

        let path = format!("/rest/v1/doctors?id=eq.{}", doctor_id);
        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::PATCH,
            &path,
            Some(json!({ "available_date": available_date })),
            Some(SupabaseClient::return_representation()),
        ).await.map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next().ok_or(DoctorError::NotFound)?;
        Self::parse_doctor(row)
    }

    async fn available_date(&self, doctor_id: Uuid) -> Result<Option<NaiveDate>, DoctorError> {
        let path = format!("/rest/v1/doctors?id=eq.{}&select=available_date", doctor_id);
        let result: Vec<AvailableDateRow> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await.map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        result.into_iter()
            .next()
            .map(|row| row.available_date)
            .ok_or(DoctorError::NotFound)
    }
}
