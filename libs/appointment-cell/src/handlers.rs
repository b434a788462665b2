use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{
    AppointmentError, AppointmentQuery, BookAppointmentRequest, CancelAppointmentRequest,
    ConflictCheckQuery, ConflictCheckResponse,
};
use crate::services::SchedulingService;

fn to_app_error(e: AppointmentError) -> AppError {
    match e {
        AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
        AppointmentError::DoctorNotFound => AppError::NotFound(e.to_string()),
        AppointmentError::NoAvailableDate => AppError::BadRequest(e.to_string()),
        AppointmentError::ConflictDetected => AppError::BadRequest(e.to_string()),
        AppointmentError::NotFound => AppError::NotFound(e.to_string()),
        AppointmentError::DatabaseError(msg) => AppError::internal(msg),
    }
}

// ==============================================================================
// BOOKING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn book_appointment(
    State(scheduling): State<Arc<SchedulingService>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let user_name = request.user_name.as_deref().unwrap_or_default();

    let appointment = scheduling
        .book(request.doctor_id, user_name)
        .await
        .map_err(to_app_error)?;

    Ok((StatusCode::CREATED, Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment booked"
    }))))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(scheduling): State<Arc<SchedulingService>>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let user_name = request.user_name.as_deref().unwrap_or_default();

    let removed = scheduling
        .cancel(request.doctor_id, user_name)
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!({
        "success": true,
        "removed": removed,
        "message": "Appointment canceled"
    })))
}

// ==============================================================================
// QUERY HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_appointments(
    State(scheduling): State<Arc<SchedulingService>>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<Value>, AppError> {
    let appointments = scheduling
        .appointments(&query)
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn check_appointment_conflicts(
    State(scheduling): State<Arc<SchedulingService>>,
    Query(query): Query<ConflictCheckQuery>,
) -> Result<Json<ConflictCheckResponse>, AppError> {
    let has_conflict = scheduling
        .has_conflict(query.doctor_id, query.date)
        .await
        .map_err(to_app_error)?;

    Ok(Json(ConflictCheckResponse {
        doctor_id: query.doctor_id,
        date: query.date,
        has_conflict,
    }))
}
