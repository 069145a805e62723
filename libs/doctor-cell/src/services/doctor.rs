use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use shared_database::{collections, Filter, RecordStore};
use shared_utils::documents::{strip_private_fields, text_field};

use crate::models::DoctorSummary;

pub struct DoctorService {
    store: Arc<dyn RecordStore>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Every doctor on record, in store order.
    pub async fn list_doctors(&self) -> Result<Vec<DoctorSummary>> {
        let documents = self
            .store
            .find_many(collections::DOCTORS, &Filter::new())
            .await?;

        debug!("Listing {} doctors", documents.len());
        Ok(documents.iter().map(summarize).collect())
    }

    /// Full doctor record minus credentials.
    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Value>> {
        debug!("Fetching doctor {}", doctor_id);

        let doctor = self
            .store
            .find_one(collections::DOCTORS, &Filter::new().eq("doctorId", doctor_id))
            .await?;

        Ok(doctor.map(strip_private_fields))
    }
}

fn summarize(document: &Value) -> DoctorSummary {
    let time_slots = document
        .get("timeSlots")
        .and_then(Value::as_array)
        .map(|slots| slots.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    DoctorSummary {
        id: text_field(document, "doctorId"),
        name: text_field(document, "name"),
        specialty: text_field(document, "roleOrSpec").trim().to_string(),
        contact: text_field(document, "contact"),
        status: text_field(document, "status").trim().to_string(),
        time_slots,
    }
}
