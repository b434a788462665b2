use axum::{
    Router,
    routing::{get, patch},
};

use crate::handlers;
use crate::services::SharedDirectory;

pub fn doctor_routes(directory: SharedDirectory) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors).post(handlers::create_doctor))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .route("/{doctor_id}/available-date", patch(handlers::update_available_date))
        .with_state(directory)
}
