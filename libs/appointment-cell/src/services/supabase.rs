use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_database::{DatabaseError, SupabaseClient};

use crate::models::{Appointment, AppointmentError, AppointmentQuery, NewAppointment};
use crate::services::ledger::AppointmentLedger;

/// Ledger backed by the `appointments` table. The table's
/// `UNIQUE (doctor_id, date)` constraint is what serializes concurrent claims;
/// PostgREST reports a violation as 409 / SQLSTATE 23505.
pub struct SupabaseAppointmentLedger {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseAppointmentLedger {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }

    fn parse_appointments(rows: Vec<Value>) -> Result<Vec<Appointment>, AppointmentError> {
        rows.into_iter()
            .map(|row| {
                serde_json::from_value(row).map_err(|e| {
                    AppointmentError::DatabaseError(format!("Failed to parse appointment: {}", e))
                })
            })
            .collect()
    }
}

fn storage_error(e: DatabaseError) -> AppointmentError {
    AppointmentError::DatabaseError(e.to_string())
}

#[async_trait]
impl AppointmentLedger for SupabaseAppointmentLedger {
    async fn has_conflict(&self, doctor_id: Uuid, date: NaiveDate) -> Result<bool, AppointmentError> {
        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&date=eq.{}&select=id&limit=1",
            doctor_id, date
        );

        let existing: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await.map_err(storage_error)?;

        Ok(!existing.is_empty())
    }

    async fn insert(
        &self,
        doctor_id: Uuid,
        user_name: &str,
        date: NaiveDate,
    ) -> Result<Appointment, AppointmentError> {
        let row = NewAppointment { doctor_id, user_name, date };

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/appointments",
            Some(json!(row)),
            Some(SupabaseClient::return_representation()),
        ).await.map_err(|e| match e {
            DatabaseError::UniqueViolation(detail) => {
                debug!("Insert lost the race for ({}, {}): {}", doctor_id, date, detail);
                AppointmentError::ConflictDetected
            }
            other => storage_error(other),
        })?;

        Self::parse_appointments(result)?
            .into_iter()
            .next()
            .ok_or_else(|| AppointmentError::DatabaseError("Failed to create appointment".to_string()))
    }

    async fn remove_by_doctor_and_user(
        &self,
        doctor_id: Uuid,
        user_name: &str,
    ) -> Result<usize, AppointmentError> {
        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&user_name=eq.{}",
            doctor_id,
            urlencoding::encode(user_name)
        );

        let removed: Vec<Value> = self.supabase.request_with_headers(
            Method::DELETE,
            &path,
            None,
            Some(SupabaseClient::return_representation()),
        ).await.map_err(storage_error)?;

        if removed.is_empty() {
            return Err(AppointmentError::NotFound);
        }

        Ok(removed.len())
    }

    async fn list(&self, query: &AppointmentQuery) -> Result<Vec<Appointment>, AppointmentError> {
        let mut query_parts = vec!["select=*".to_string()];

        if let Some(doctor_id) = query.doctor_id {
            query_parts.push(format!("doctor_id=eq.{}", doctor_id));
        }
        if let Some(ref user_name) = query.user_name {
            query_parts.push(format!("user_name=eq.{}", urlencoding::encode(user_name)));
        }
        query_parts.push("order=date.asc,created_at.asc".to_string());

        let path = format!("/rest/v1/appointments?{}", query_parts.join("&"));
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await.map_err(storage_error)?;

        Self::parse_appointments(result)
    }
}
