use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::collections;
use crate::error::StoreError;
use crate::filter::Filter;
use crate::store::RecordStore;

/// Process-local store. Unique indexes are checked under the same write
/// lock as the insert, so concurrent writers cannot both claim a key.
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
    unique_indexes: HashMap<String, Vec<Vec<String>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            unique_indexes: HashMap::new(),
        }
    }

    pub fn with_default_indexes() -> Self {
        collections::unique_indexes()
            .into_iter()
            .fold(Self::new(), |store, (collection, fields)| {
                store.with_unique_index(collection, fields)
            })
    }

    pub fn with_unique_index(mut self, collection: &str, fields: &[&str]) -> Self {
        self.unique_indexes
            .entry(collection.to_string())
            .or_default()
            .push(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    fn violates_unique_index(
        &self,
        collection: &str,
        existing: &[Value],
        candidate: &Value,
        skip_position: Option<usize>,
    ) -> bool {
        let mut indexes: Vec<Vec<String>> = vec![vec!["id".to_string()]];
        if let Some(declared) = self.unique_indexes.get(collection) {
            indexes.extend(declared.iter().cloned());
        }

        existing
            .iter()
            .enumerate()
            .filter(|(position, _)| Some(*position) != skip_position)
            .any(|(_, other)| {
                indexes.iter().any(|fields| {
                    fields.iter().all(|field| {
                        candidate.get(field).unwrap_or(&Value::Null)
                            == other.get(field).unwrap_or(&Value::Null)
                    })
                })
            })
    }
}

fn as_object(collection: &str, document: Value) -> Result<Map<String, Value>, StoreError> {
    match document {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument {
            collection: collection.to_string(),
            reason: format!("expected a JSON object, got {}", other),
        }),
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn insert(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        let mut map = as_object(collection, document)?;

        let id = match map.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            _ => Uuid::new_v4().to_string(),
        };
        map.insert("id".to_string(), Value::String(id.clone()));
        let candidate = Value::Object(map);

        let mut guard = self.collections.write().await;
        let records = guard.entry(collection.to_string()).or_default();

        if self.violates_unique_index(collection, records, &candidate, None) {
            debug!("Rejected duplicate insert into {}", collection);
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
            });
        }

        records.push(candidate);
        debug!("Inserted {} into {}", id, collection);
        Ok(id)
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|records| records.iter().find(|doc| filter.matches(doc)))
            .cloned())
    }

    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Value,
    ) -> Result<Option<Value>, StoreError> {
        let patch = as_object(collection, patch)?;

        let mut guard = self.collections.write().await;
        let Some(records) = guard.get_mut(collection) else {
            return Ok(None);
        };
        let Some(position) = records.iter().position(|doc| filter.matches(doc)) else {
            return Ok(None);
        };

        let mut updated = records[position].clone();
        if let Value::Object(map) = &mut updated {
            for (key, value) in patch {
                if key != "id" {
                    map.insert(key, value);
                }
            }
        }

        if self.violates_unique_index(collection, records, &updated, Some(position)) {
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
            });
        }

        records[position] = updated.clone();
        Ok(Some(updated))
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<usize, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .map(|records| records.iter().filter(|doc| filter.matches(doc)).count())
            .unwrap_or(0))
    }
}
