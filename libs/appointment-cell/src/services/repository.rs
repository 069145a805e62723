use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use shared_database::{collections, Filter, RecordStore, StoreError};

use crate::models::{Appointment, AppointmentError, AppointmentStatus, DoctorSchedule};

/// The narrow slice of the record store the scheduling engine needs.
#[derive(Clone)]
pub struct AppointmentRepository {
    store: Arc<dyn RecordStore>,
}

fn decode<T: DeserializeOwned>(kind: &str, document: Value) -> Result<T, AppointmentError> {
    serde_json::from_value(document)
        .map_err(|e| AppointmentError::DatabaseError(format!("Malformed {} record: {}", kind, e)))
}

impl AppointmentRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn find_doctor(&self, doctor_id: &str) -> Result<Option<DoctorSchedule>, AppointmentError> {
        let filter = Filter::new().eq("doctorId", doctor_id);
        self.store
            .find_one(collections::DOCTORS, &filter)
            .await?
            .map(|doc| decode("doctor", doc))
            .transpose()
    }

    pub async fn find_appointments(
        &self,
        doctor_id: &str,
        date: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let filter = Filter::new().eq("doctor_id", doctor_id).eq("date", date);
        self.find_by(&filter).await
    }

    pub async fn find_appointment(
        &self,
        doctor_id: &str,
        date: &str,
        time: &str,
    ) -> Result<Option<Appointment>, AppointmentError> {
        let filter = Filter::new()
            .eq("doctor_id", doctor_id)
            .eq("date", date)
            .eq("time", time);
        self.store
            .find_one(collections::APPOINTMENTS, &filter)
            .await?
            .map(|doc| decode("appointment", doc))
            .transpose()
    }

    /// Raw store result so the caller can tell a unique-index rejection apart.
    pub async fn insert_appointment(&self, document: Value) -> Result<String, StoreError> {
        self.store.insert(collections::APPOINTMENTS, document).await
    }

    pub async fn find_appointment_by_id(&self, id: &str) -> Result<Option<Appointment>, AppointmentError> {
        self.store
            .find_one(collections::APPOINTMENTS, &Filter::by_id(id))
            .await?
            .map(|doc| decode("appointment", doc))
            .transpose()
    }

    pub async fn update_appointment_status(
        &self,
        id: &str,
        status: &AppointmentStatus,
    ) -> Result<Option<Appointment>, AppointmentError> {
        debug!("Setting status of appointment {} to {}", id, status);
        self.store
            .update_one(
                collections::APPOINTMENTS,
                &Filter::by_id(id),
                json!({ "status": status }),
            )
            .await?
            .map(|doc| decode("appointment", doc))
            .transpose()
    }

    pub async fn find_by(&self, filter: &Filter) -> Result<Vec<Appointment>, AppointmentError> {
        self.store
            .find_many(collections::APPOINTMENTS, filter)
            .await?
            .into_iter()
            .map(|doc| decode("appointment", doc))
            .collect()
    }

    pub async fn count(&self) -> Result<usize, AppointmentError> {
        Ok(self.store.count(collections::APPOINTMENTS, &Filter::new()).await?)
    }
}
