use tracing::debug;

use shared_database::{Filter, RecordStore, StoreError};

/// `PREFIX-<base + existing + 1>`, e.g. `ADM-100001` for the first admission.
pub fn sequential_id(prefix: &str, base: u64, existing: usize) -> String {
    format!("{}-{}", prefix, base + existing as u64 + 1)
}

/// Next business id for a collection, derived from its current size.
///
/// Two concurrent callers can compute the same id; collections that use
/// these ids declare a unique index on them so the second insert fails.
pub async fn next_sequential_id(
    store: &dyn RecordStore,
    collection: &str,
    prefix: &str,
    base: u64,
) -> Result<String, StoreError> {
    let existing = store.count(collection, &Filter::new()).await?;
    let id = sequential_id(prefix, base, existing);
    debug!("Generated {} for {}", id, collection);
    Ok(id)
}
