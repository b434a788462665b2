use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Appointment, AppointmentError, AppointmentQuery};
use crate::services::ledger::AppointmentLedger;

#[derive(Debug, Default)]
struct LedgerState {
    rows: HashMap<Uuid, Appointment>,
    // Unique index over (doctor_id, date).
    slots: HashMap<(Uuid, NaiveDate), Uuid>,
}

/// Process-local ledger. The uniqueness check and the insert share one write lock.
#[derive(Debug, Default)]
pub struct InMemoryAppointmentLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryAppointmentLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentLedger for InMemoryAppointmentLedger {
    async fn has_conflict(&self, doctor_id: Uuid, date: NaiveDate) -> Result<bool, AppointmentError> {
        Ok(self.state.read().await.slots.contains_key(&(doctor_id, date)))
    }

    async fn insert(
        &self,
        doctor_id: Uuid,
        user_name: &str,
        date: NaiveDate,
    ) -> Result<Appointment, AppointmentError> {
        let mut state = self.state.write().await;

        if state.slots.contains_key(&(doctor_id, date)) {
            debug!("Slot ({}, {}) already taken", doctor_id, date);
            return Err(AppointmentError::ConflictDetected);
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            doctor_id,
            user_name: user_name.to_string(),
            date,
            created_at: Utc::now(),
        };

        state.slots.insert((doctor_id, date), appointment.id);
        state.rows.insert(appointment.id, appointment.clone());

        Ok(appointment)
    }

    async fn remove_by_doctor_and_user(
        &self,
        doctor_id: Uuid,
        user_name: &str,
    ) -> Result<usize, AppointmentError> {
        let mut state = self.state.write().await;

        let matching: Vec<(Uuid, NaiveDate)> = state
            .rows
            .values()
            .filter(|a| a.doctor_id == doctor_id && a.user_name == user_name)
            .map(|a| (a.id, a.date))
            .collect();

        if matching.is_empty() {
            return Err(AppointmentError::NotFound);
        }

        for (id, date) in &matching {
            state.rows.remove(id);
            state.slots.remove(&(doctor_id, *date));
        }

        Ok(matching.len())
    }

    async fn list(&self, query: &AppointmentQuery) -> Result<Vec<Appointment>, AppointmentError> {
        let state = self.state.read().await;

        let mut appointments: Vec<Appointment> = state
            .rows
            .values()
            .filter(|a| query.doctor_id.map_or(true, |id| a.doctor_id == id))
            .filter(|a| query.user_name.as_deref().map_or(true, |name| a.user_name == name))
            .cloned()
            .collect();

        appointments.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(appointments)
    }
}
