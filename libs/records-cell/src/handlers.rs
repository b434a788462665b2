use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{Collection, Record, RecordError, TreatmentRating};
use crate::services::RecordService;

/// State for the routes that work the same way on every catalog collection.
#[derive(Clone)]
pub struct CatalogState {
    pub records: Arc<RecordService>,
    pub collection: Collection,
}

fn to_app_error(e: RecordError) -> AppError {
    match e {
        RecordError::ValidationError(msg) => AppError::ValidationError(msg),
        RecordError::NotFound(_) => AppError::NotFound(e.to_string()),
        RecordError::DatabaseError(msg) => AppError::internal(msg),
    }
}

// ==============================================================================
// CATALOG HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_entries(
    State(state): State<CatalogState>,
) -> Result<Json<Vec<Record>>, AppError> {
    let entries = state.records.list(state.collection).await.map_err(to_app_error)?;
    Ok(Json(entries))
}

#[axum::debug_handler]
pub async fn create_entry(
    State(state): State<CatalogState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let record = state.records
        .create(state.collection, body)
        .await
        .map_err(to_app_error)?;

    Ok((StatusCode::CREATED, Json(json!({
        "record": record,
        "message": format!("{} added", state.collection.label())
    }))))
}

#[axum::debug_handler]
pub async fn get_entry(
    State(state): State<CatalogState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Record>, AppError> {
    let entry = state.records.get(state.collection, id).await.map_err(to_app_error)?;
    Ok(Json(entry))
}

#[axum::debug_handler]
pub async fn update_entry(
    State(state): State<CatalogState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let record = state.records
        .update(state.collection, id, body)
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!({
        "record": record,
        "message": format!("{} updated", state.collection.label())
    })))
}

#[axum::debug_handler]
pub async fn delete_entry(
    State(state): State<CatalogState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.records
        .delete(state.collection, id)
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!({
        "success": true,
        "message": format!("{} deleted", state.collection.label())
    })))
}

// ==============================================================================
// REVIEW HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn treatment_reviews(
    State(records): State<Arc<RecordService>>,
    Path(treatment_id): Path<Uuid>,
) -> Result<Json<Vec<Record>>, AppError> {
    let reviews = records.reviews_for(treatment_id).await.map_err(to_app_error)?;
    Ok(Json(reviews))
}

#[axum::debug_handler]
pub async fn treatment_rating(
    State(records): State<Arc<RecordService>>,
    Path(treatment_id): Path<Uuid>,
) -> Result<Json<TreatmentRating>, AppError> {
    let rating = records.rating(treatment_id).await.map_err(to_app_error)?;
    Ok(Json(rating))
}

// ==============================================================================
// USER HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_emergency_contacts(
    State(records): State<Arc<RecordService>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Record>>, AppError> {
    let contacts = records.emergency_contacts(&user_id).await.map_err(to_app_error)?;
    Ok(Json(contacts))
}

#[axum::debug_handler]
pub async fn delete_emergency_contact(
    State(records): State<Arc<RecordService>>,
    Path((user_id, contact_id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, AppError> {
    records
        .remove_emergency_contact(&user_id, contact_id)
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!({ "success": true })))
}

#[axum::debug_handler]
pub async fn get_profile(
    State(records): State<Arc<RecordService>>,
    Path(user_id): Path<String>,
) -> Result<Json<Record>, AppError> {
    let profile = records.profile(&user_id).await.map_err(to_app_error)?;
    Ok(Json(profile))
}

#[axum::debug_handler]
pub async fn save_profile(
    State(records): State<Arc<RecordService>>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (profile, created) = records
        .save_profile(&user_id, body)
        .await
        .map_err(to_app_error)?;

    let (status, message) = if created {
        (StatusCode::CREATED, "Profile created successfully")
    } else {
        (StatusCode::OK, "Profile updated successfully")
    };

    Ok((status, Json(json!({
        "profile": profile,
        "message": message
    }))))
}
