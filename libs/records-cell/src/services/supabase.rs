use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_database::{DatabaseError, SupabaseClient};

use crate::models::{Collection, Filter, Record, RecordError};
use crate::services::store::RecordStore;

/// Store backed by one PostgREST table per collection.
pub struct SupabaseRecordStore {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseRecordStore {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }

    fn filter_query(filters: &[Filter]) -> Vec<String> {
        filters
            .iter()
            .map(|f| format!("{}=eq.{}", f.field, urlencoding::encode(&f.value)))
            .collect()
    }

    fn into_records(rows: Vec<Value>) -> Vec<Record> {
        rows.into_iter()
            .filter_map(|row| match row {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect()
    }
}

fn storage_error(e: DatabaseError) -> RecordError {
    RecordError::DatabaseError(e.to_string())
}

#[async_trait]
impl RecordStore for SupabaseRecordStore {
    async fn list(&self, collection: Collection, filters: &[Filter]) -> Result<Vec<Record>, RecordError> {
        let mut query_parts = vec!["select=*".to_string()];
        query_parts.extend(Self::filter_query(filters));
        query_parts.push(if collection.newest_first() {
            "order=created_at.desc".to_string()
        } else {
            "order=created_at.asc".to_string()
        });

        let path = format!("/rest/v1/{}?{}", collection.table(), query_parts.join("&"));
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await.map_err(storage_error)?;

        Ok(Self::into_records(result))
    }

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Record, RecordError> {
        let path = format!("/rest/v1/{}?id=eq.{}", collection.table(), id);
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await.map_err(storage_error)?;

        Self::into_records(result)
            .into_iter()
            .next()
            .ok_or(RecordError::NotFound(collection.label()))
    }

    async fn insert(&self, collection: Collection, record: Record) -> Result<Record, RecordError> {
        debug!("Inserting into {}", collection.table());

        let path = format!("/rest/v1/{}", collection.table());
        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            &path,
            Some(json!(record)),
            Some(SupabaseClient::return_representation()),
        ).await.map_err(storage_error)?;

        Self::into_records(result)
            .into_iter()
            .next()
            .ok_or_else(|| RecordError::DatabaseError(format!("Failed to create {}", collection.table())))
    }

    async fn update(&self, collection: Collection, id: Uuid, patch: Record) -> Result<Record, RecordError> {
        debug!("Updating {} {}", collection.table(), id);

        let path = format!("/rest/v1/{}?id=eq.{}", collection.table(), id);
        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::PATCH,
            &path,
            Some(json!(patch)),
            Some(SupabaseClient::return_representation()),
        ).await.map_err(storage_error)?;

        Self::into_records(result)
            .into_iter()
            .next()
            .ok_or(RecordError::NotFound(collection.label()))
    }

    async fn delete(&self, collection: Collection, filters: &[Filter]) -> Result<usize, RecordError> {
        let path = format!(
            "/rest/v1/{}?{}",
            collection.table(),
            Self::filter_query(filters).join("&")
        );

        let removed: Vec<Value> = self.supabase.request_with_headers(
            Method::DELETE,
            &path,
            None,
            Some(SupabaseClient::return_representation()),
        ).await.map_err(storage_error)?;

        Ok(removed.len())
    }
}
