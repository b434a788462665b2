use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::models::DoctorError;
use doctor_cell::services::SharedDirectory;
use shared_utils::validation::non_blank;

use crate::models::{Appointment, AppointmentError, AppointmentQuery};
use crate::services::ledger::SharedLedger;

/// Books and cancels appointments on top of the directory and the ledger.
///
/// Per (doctor, date) slot the lifecycle is `Open -> Booked` via [`book`] and
/// `Booked -> Open` via [`cancel`]. Booking a booked slot yields
/// `ConflictDetected`; cancelling an open one yields `NotFound`. Nothing is
/// retried.
///
/// [`book`]: SchedulingService::book
/// [`cancel`]: SchedulingService::cancel
#[derive(Clone)]
pub struct SchedulingService {
    directory: SharedDirectory,
    ledger: SharedLedger,
}

impl SchedulingService {
    pub fn new(directory: SharedDirectory, ledger: SharedLedger) -> Self {
        Self { directory, ledger }
    }

    pub async fn book(&self, doctor_id: Uuid, user_name: &str) -> Result<Appointment, AppointmentError> {
        let user_name = Self::require_user_name(user_name)?;
        debug!("Booking doctor {} for {}", doctor_id, user_name);

        let date = self.directory
            .available_date(doctor_id)
            .await
            .map_err(|e| match e {
                DoctorError::NotFound => AppointmentError::DoctorNotFound,
                DoctorError::ValidationError(msg) => AppointmentError::ValidationError(msg),
                DoctorError::DatabaseError(msg) => AppointmentError::DatabaseError(msg),
            })?
            .ok_or(AppointmentError::NoAvailableDate)?;

        if self.ledger.has_conflict(doctor_id, date).await? {
            warn!("Doctor {} already appointed on {}", doctor_id, date);
            return Err(AppointmentError::ConflictDetected);
        }

        // A concurrent booking can still claim the slot between the check and
        // here; the ledger's uniqueness guarantee turns that into a conflict.
        let appointment = self.ledger
            .insert(doctor_id, &user_name, date)
            .await
            .inspect_err(|e| {
                if *e == AppointmentError::ConflictDetected {
                    warn!("Doctor {} was appointed on {} by a concurrent booking", doctor_id, date);
                }
            })?;

        info!("Appointment {} booked with doctor {} on {}", appointment.id, doctor_id, date);
        Ok(appointment)
    }

    /// Removes every booking of `user_name` with the doctor and returns how many were removed.
    pub async fn cancel(&self, doctor_id: Uuid, user_name: &str) -> Result<usize, AppointmentError> {
        let user_name = Self::require_user_name(user_name)?;

        let removed = self.ledger
            .remove_by_doctor_and_user(doctor_id, &user_name)
            .await?;

        if removed > 1 {
            warn!("Cancelled {} appointments of {} with doctor {}", removed, user_name, doctor_id);
        } else {
            info!("Appointment of {} with doctor {} cancelled", user_name, doctor_id);
        }

        Ok(removed)
    }

    pub async fn has_conflict(&self, doctor_id: Uuid, date: NaiveDate) -> Result<bool, AppointmentError> {
        self.ledger.has_conflict(doctor_id, date).await
    }

    pub async fn appointments(&self, query: &AppointmentQuery) -> Result<Vec<Appointment>, AppointmentError> {
        self.ledger.list(query).await
    }

    fn require_user_name(user_name: &str) -> Result<String, AppointmentError> {
        non_blank(Some(user_name))
            .ok_or_else(|| AppointmentError::ValidationError("User name is required.".to_string()))
    }
}
