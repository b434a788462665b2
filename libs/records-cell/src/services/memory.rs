use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Collection, Filter, Record, RecordError};
use crate::services::store::RecordStore;

/// Process-local store. Rows are kept in insertion order per collection.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    tables: RwLock<HashMap<Collection, Vec<Record>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_all(record: &Record, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| filter.matches(record))
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(&self, collection: Collection, filters: &[Filter]) -> Result<Vec<Record>, RecordError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Record> = tables
            .get(&collection)
            .map(|rows| rows.iter().filter(|r| matches_all(r, filters)).cloned().collect())
            .unwrap_or_default();

        if collection.newest_first() {
            rows.reverse();
        }
        Ok(rows)
    }

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Record, RecordError> {
        let by_id = Filter::eq("id", id);
        self.tables
            .read()
            .await
            .get(&collection)
            .and_then(|rows| rows.iter().find(|r| by_id.matches(r)).cloned())
            .ok_or(RecordError::NotFound(collection.label()))
    }

    async fn insert(&self, collection: Collection, mut record: Record) -> Result<Record, RecordError> {
        let id = Uuid::new_v4();
        record.insert("id".to_string(), json!(id));
        record.insert("created_at".to_string(), json!(Utc::now()));

        debug!("Inserting {} {}", collection.table(), id);
        self.tables
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(record.clone());

        Ok(record)
    }

    async fn update(&self, collection: Collection, id: Uuid, patch: Record) -> Result<Record, RecordError> {
        let by_id = Filter::eq("id", id);
        let mut tables = self.tables.write().await;
        let row = tables
            .get_mut(&collection)
            .and_then(|rows| rows.iter_mut().find(|r| by_id.matches(r)))
            .ok_or(RecordError::NotFound(collection.label()))?;

        row.extend(patch);
        Ok(row.clone())
    }

    async fn delete(&self, collection: Collection, filters: &[Filter]) -> Result<usize, RecordError> {
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(&collection) else {
            return Ok(0);
        };

        let before = rows.len();
        rows.retain(|r| !matches_all(r, filters));
        Ok(before - rows.len())
    }
}
