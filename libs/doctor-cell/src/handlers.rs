use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{CreateDoctorRequest, DoctorError, UpdateAvailableDateRequest};
use crate::services::SharedDirectory;

fn to_app_error(e: DoctorError) -> AppError {
    match e {
        DoctorError::ValidationError(msg) => AppError::ValidationError(msg),
        DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        DoctorError::DatabaseError(msg) => AppError::internal(msg),
    }
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(directory): State<SharedDirectory>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor = directory.register(request).await.map_err(to_app_error)?;

    Ok((StatusCode::CREATED, Json(json!({
        "doctor": doctor,
        "message": "Doctor added"
    }))))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(directory): State<SharedDirectory>,
) -> Result<Json<Value>, AppError> {
    let doctors = directory.list().await.map_err(to_app_error)?;
    Ok(Json(json!(doctors)))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(directory): State<SharedDirectory>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let doctor = directory.get(doctor_id).await.map_err(to_app_error)?;
    Ok(Json(json!(doctor)))
}

/// Admin path: moves the doctor's single bookable date.
#[axum::debug_handler]
pub async fn update_available_date(
    State(directory): State<SharedDirectory>,
    Path(doctor_id): Path<Uuid>,
    Json(request): Json<UpdateAvailableDateRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor = directory
        .set_available_date(doctor_id, request.available_date)
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!({
        "doctor": doctor,
        "message": "Available date updated"
    })))
}
