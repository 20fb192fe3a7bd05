//! Storage Gateway: the abstract per-resource persistence interface the CRUD
//! handlers are written against. Handlers never inspect failures beyond
//! logging them; every `StoreError` surfaces as the fixed per-operation
//! message.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("{0}")]
    Backend(String),
}

/// One store handle per resource family. `update` merges only the supplied
/// fields; `delete` reports a missing row as an error rather than a distinct
/// not-found outcome (the handler layer owns existence semantics).
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn find_many(&self) -> Result<Vec<Value>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Value>, StoreError>;

    async fn create(&self, draft: Map<String, Value>) -> Result<Value, StoreError>;

    async fn update(&self, id: i64, patch: Map<String, Value>) -> Result<Value, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
