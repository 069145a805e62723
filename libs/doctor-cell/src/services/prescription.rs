use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::Utc;
use serde_json::Value;
use tracing::info;

use shared_database::{collections, RecordStore};

use crate::models::{PrescriptionPayload, DEFAULT_PRESCRIPTION_STATUS};

pub struct PrescriptionService {
    store: Arc<dyn RecordStore>,
}

impl PrescriptionService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Store a prescription and return its record id. Missing `timestamp`
    /// becomes the current UTC time; missing `status` becomes `Current`.
    pub async fn save_prescription(&self, mut payload: PrescriptionPayload) -> Result<String> {
        payload.timestamp.get_or_insert_with(|| Utc::now().to_rfc3339());
        payload
            .status
            .get_or_insert_with(|| DEFAULT_PRESCRIPTION_STATUS.to_string());

        let document: Value = serde_json::to_value(&payload)?;
        let id = self
            .store
            .insert(collections::PRESCRIPTIONS, document)
            .await
            .map_err(|e| anyhow!("Failed to save prescription: {}", e))?;

        info!(
            "Saved prescription {} for patient {} ({} medications)",
            id,
            payload.patient_id,
            payload.medications.len()
        );
        Ok(id)
    }
}
