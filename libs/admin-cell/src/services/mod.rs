pub mod admissions;
pub mod clinical;
pub mod pharmacy;
pub mod users;

pub use admissions::AdmissionService;
pub use clinical::ClinicalRecordService;
pub use pharmacy::PharmacyService;
pub use users::UserDirectoryService;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use shared_database::{collections, Filter, RecordStore, StoreError};
use shared_utils::ids::next_sequential_id;

use crate::models::AdminError;

const ID_ATTEMPTS: usize = 3;

pub(crate) async fn find_patient(
    store: &dyn RecordStore,
    patient_id: &str,
) -> Result<Option<Value>, StoreError> {
    store
        .find_one(
            collections::USERS,
            &Filter::new().eq("user_id", patient_id).eq("role", "patient"),
        )
        .await
}

/// Unique-index rejections become `conflict`; everything else is a store failure.
pub(crate) fn conflict_or(err: StoreError, conflict: AdminError) -> AdminError {
    if err.is_duplicate() {
        conflict
    } else {
        AdminError::from(err)
    }
}

pub(crate) fn to_document<T: Serialize>(value: &T) -> Result<Map<String, Value>, AdminError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(AdminError::Database(format!("expected an object, got {}", other))),
        Err(e) => Err(AdminError::Database(e.to_string())),
    }
}

/// Insert `document` under a fresh `PREFIX-n` id stored in `id_field`.
/// A concurrent writer taking the same id shows up as a duplicate; the id
/// is then recomputed from the new count.
pub(crate) async fn insert_with_sequential_id(
    store: &dyn RecordStore,
    collection: &str,
    id_field: &str,
    prefix: &str,
    base: u64,
    document: Map<String, Value>,
) -> Result<String, AdminError> {
    for attempt in 1..=ID_ATTEMPTS {
        let id = next_sequential_id(store, collection, prefix, base).await?;

        let mut candidate = document.clone();
        candidate.insert(id_field.to_string(), Value::String(id.clone()));

        match store.insert(collection, Value::Object(candidate)).await {
            Ok(_) => return Ok(id),
            Err(e) if e.is_duplicate() => {
                warn!("{} {} taken (attempt {}/{})", id_field, id, attempt, ID_ATTEMPTS);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AdminError::Database(format!(
        "could not allocate a {} for {}",
        id_field, collection
    )))
}
