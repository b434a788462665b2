use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Collection, Filter, Record, RecordError};

pub type SharedStore = Arc<dyn RecordStore>;

/// Schemaless persistence for the clinic's catalog and per-user collections.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Rows matching every filter, newest first for catalog collections.
    async fn list(&self, collection: Collection, filters: &[Filter]) -> Result<Vec<Record>, RecordError>;

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Record, RecordError>;

    /// Stores a new row and returns it with `id` and `created_at` filled in.
    async fn insert(&self, collection: Collection, record: Record) -> Result<Record, RecordError>;

    /// Overwrites the given columns of one row.
    async fn update(&self, collection: Collection, id: Uuid, patch: Record) -> Result<Record, RecordError>;

    /// Removes every row matching the filters and returns how many went.
    async fn delete(&self, collection: Collection, filters: &[Filter]) -> Result<usize, RecordError>;
}
