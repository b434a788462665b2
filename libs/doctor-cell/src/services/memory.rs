use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::{CreateDoctorRequest, Doctor, DoctorError};
use crate::services::directory::DoctorDirectory;

/// Process-local directory used when no Supabase project is configured, and in tests.
#[derive(Debug, Default)]
pub struct InMemoryDoctorDirectory {
    doctors: RwLock<HashMap<Uuid, Doctor>>,
}

impl InMemoryDoctorDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DoctorDirectory for InMemoryDoctorDirectory {
    async fn register(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        let new_doctor = request.validate()?;

        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: new_doctor.name,
            specialty: new_doctor.specialty,
            available_date: new_doctor.available_date,
            created_at: Utc::now(),
        };

        debug!("Registering doctor {} ({})", doctor.id, doctor.name);
        self.doctors.write().await.insert(doctor.id, doctor.clone());

        Ok(doctor)
    }

    async fn get(&self, doctor_id: Uuid) -> Result<Doctor, DoctorError> {
        self.doctors
            .read()
            .await
            .get(&doctor_id)
            .cloned()
            .ok_or(DoctorError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Doctor>, DoctorError> {
        let mut doctors: Vec<Doctor> = self.doctors.read().await.values().cloned().collect();
        doctors.sort_by(|a, b| a.name.cmp(&b.name).then(a.created_at.cmp(&b.created_at)));
        Ok(doctors)
    }

    async fn set_available_date(
        &self,
        doctor_id: Uuid,
        available_date: Option<NaiveDate>,
    ) -> Result<Doctor, DoctorError> {
        let mut doctors = self.doctors.write().await;
        let doctor = doctors.get_mut(&doctor_id).ok_or(DoctorError::NotFound)?;
        doctor.available_date = available_date;
        Ok(doctor.clone())
    }
}
