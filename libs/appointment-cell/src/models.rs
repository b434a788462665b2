use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A booking. `date` is copied from the doctor's available date when booked
/// and never re-derived afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub user_name: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Row written to the ledger; identity and timestamp come from the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment<'a> {
    pub doctor_id: Uuid,
    pub user_name: &'a str,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub doctor_id: Uuid,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    pub doctor_id: Uuid,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentQuery {
    pub doctor_id: Option<Uuid>,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckQuery {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub has_conflict: bool,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum AppointmentError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Doctor has no available date.")]
    NoAvailableDate,

    #[error("Doctor already appointed on this date.")]
    ConflictDetected,

    #[error("No appointment found to cancel.")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
