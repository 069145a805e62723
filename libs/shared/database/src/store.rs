use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;
use crate::filter::Filter;

/// Document persistence over named collections.
///
/// Every stored document carries a string `id` assigned by the store.
/// `insert` and `update_one` must reject writes that violate a declared
/// unique index with [`StoreError::Duplicate`], atomically with respect to
/// other writers of the same collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a JSON object and return its generated id.
    async fn insert(&self, collection: &str, document: Value) -> Result<String, StoreError>;

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>, StoreError>;

    /// Matching documents. Order is backend-defined: `InMemoryStore` keeps
    /// insertion order, `SupabaseClient` sorts by `id`. Callers that present
    /// a sequence sort it themselves.
    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError>;

    /// Merge `patch` into the first matching document. `None` when nothing matched.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Value,
    ) -> Result<Option<Value>, StoreError>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<usize, StoreError>;
}
