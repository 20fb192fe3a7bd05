use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{ResourceStore, StoreError};

/// In-memory store used when no database is configured and as the backend
/// for end-to-end tests. Mirrors the Postgres store's observable semantics:
/// partial-merge updates, and update/delete of a missing row is an error.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<BTreeMap<i64, Map<String, Value>>>,
    next_id: AtomicI64,
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn find_many(&self) -> Result<Vec<Value>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.values().cloned().map(Value::Object).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Value>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned().map(Value::Object))
    }

    async fn create(&self, draft: Map<String, Value>) -> Result<Value, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let mut row = draft;
        row.insert("id".to_string(), Value::from(id));

        let mut rows = self.rows.write().await;
        rows.insert(id, row.clone());
        Ok(Value::Object(row))
    }

    async fn update(&self, id: i64, patch: Map<String, Value>) -> Result<Value, StoreError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::Backend(format!("no row with id {}", id)))?;

        for (key, value) in patch {
            row.insert(key, value);
        }
        Ok(Value::Object(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        match rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::Backend(format!("no row with id {}", id))),
        }
    }
}
