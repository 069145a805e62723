use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;

use shared_database::{collections, Filter, RecordStore};
use shared_utils::ids::next_sequential_id;

use crate::models::{AddMedicineRequest, AdminError};
use crate::services::{conflict_or, to_document};

pub struct PharmacyService {
    store: Arc<dyn RecordStore>,
}

impl PharmacyService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Stock a medicine batch. A `(medicineName, batchNumber)` pair is stored once.
    pub async fn add_medicine(&self, mut request: AddMedicineRequest) -> Result<String, AdminError> {
        let medicine_id = match request.medicine_id.take().filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => next_sequential_id(self.store.as_ref(), collections::PHARMACY, "MED", 1000).await?,
        };

        let batch = Filter::new()
            .eq("medicineName", request.medicine_name.as_str())
            .eq("batchNumber", request.batch_number.as_str());
        if self.store.find_one(collections::PHARMACY, &batch).await?.is_some() {
            return Err(AdminError::MedicineBatchExists);
        }

        let mut document = to_document(&request)?;
        document.insert("medicineId".into(), json!(medicine_id));

        self.store
            .insert(collections::PHARMACY, Value::Object(document))
            .await
            .map_err(|e| conflict_or(e, AdminError::MedicineBatchExists))?;

        info!("Added {} batch {} as {}", request.medicine_name, request.batch_number, medicine_id);
        Ok(medicine_id)
    }
}
