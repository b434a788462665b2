use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{CreateDoctorRequest, Doctor, DoctorError};

pub type SharedDirectory = Arc<dyn DoctorDirectory>;

/// Owns doctor identity and each doctor's current available date.
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    /// Validates and persists a new doctor.
    async fn register(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError>;

    async fn get(&self, doctor_id: Uuid) -> Result<Doctor, DoctorError>;

    /// All doctors, unpaginated.
    async fn list(&self) -> Result<Vec<Doctor>, DoctorError>;

    /// Moves the doctor's single slot. Existing appointments keep their copied date.
    async fn set_available_date(
        &self,
        doctor_id: Uuid,
        available_date: Option<NaiveDate>,
    ) -> Result<Doctor, DoctorError>;

    /// `Ok(None)` means the doctor exists but has no open date.
    async fn available_date(&self, doctor_id: Uuid) -> Result<Option<NaiveDate>, DoctorError> {
        Ok(self.get(doctor_id).await?.available_date)
    }
}
