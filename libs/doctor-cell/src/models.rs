use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_utils::validation::{describe_missing, non_blank};

/// A directory entry. `available_date` is the doctor's one bookable day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub available_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub available_date: Option<NaiveDate>,
}

impl CreateDoctorRequest {
    pub fn new(name: &str, specialty: &str, available_date: Option<NaiveDate>) -> Self {
        Self {
            name: Some(name.to_string()),
            specialty: Some(specialty.to_string()),
            available_date,
        }
    }

    /// Name and specialty must be present; the available date may be left open.
    pub fn validate(self) -> Result<NewDoctor, DoctorError> {
        let name = non_blank(self.name.as_deref());
        let specialty = non_blank(self.specialty.as_deref());

        match (name, specialty) {
            (Some(name), Some(specialty)) => Ok(NewDoctor {
                name,
                specialty,
                available_date: self.available_date,
            }),
            (name, specialty) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push("name");
                }
                if specialty.is_none() {
                    missing.push("specialty");
                }
                Err(DoctorError::ValidationError(describe_missing(&missing)))
            }
        }
    }
}

/// A registration that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub available_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAvailableDateRequest {
    pub available_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum DoctorError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Doctor not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
