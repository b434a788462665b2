use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Appointment, AppointmentError, AppointmentQuery};

pub type SharedLedger = Arc<dyn AppointmentLedger>;

/// Owns appointment rows and the one-booking-per-(doctor, date) constraint.
///
/// Implementations must make `insert` the atomic claim: when another row
/// already holds `(doctor_id, date)` it returns
/// [`AppointmentError::ConflictDetected`], whatever `has_conflict` reported
/// beforehand.
#[async_trait]
pub trait AppointmentLedger: Send + Sync {
    async fn has_conflict(&self, doctor_id: Uuid, date: NaiveDate) -> Result<bool, AppointmentError>;

    async fn insert(
        &self,
        doctor_id: Uuid,
        user_name: &str,
        date: NaiveDate,
    ) -> Result<Appointment, AppointmentError>;

    /// Deletes every row for the pair. Zero rows is [`AppointmentError::NotFound`].
    async fn remove_by_doctor_and_user(
        &self,
        doctor_id: Uuid,
        user_name: &str,
    ) -> Result<usize, AppointmentError>;

    /// Ordered by date, then creation time.
    async fn list(&self, query: &AppointmentQuery) -> Result<Vec<Appointment>, AppointmentError>;
}
