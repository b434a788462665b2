use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::services::SchedulingService;

pub fn appointment_routes(scheduling: Arc<SchedulingService>) -> Router {
    Router::new()
        .route("/", get(handlers::list_appointments))
        .route("/book", post(handlers::book_appointment))
        .route("/cancel", post(handlers::cancel_appointment))
        .route("/conflicts", get(handlers::check_appointment_conflicts))
        .with_state(scheduling)
}
