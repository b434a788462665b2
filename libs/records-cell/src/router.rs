use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::handlers::{self, CatalogState};
use crate::models::Collection;
use crate::services::RecordService;

fn catalog_routes(path: &str, collection: Collection, records: Arc<RecordService>) -> Router {
    Router::new()
        .route(path, get(handlers::list_entries).post(handlers::create_entry))
        .route(
            &format!("{}/{{id}}", path),
            get(handlers::get_entry).put(handlers::update_entry).delete(handlers::delete_entry),
        )
        .with_state(CatalogState { records, collection })
}

/// Treatments, medicines, lab tests, FAQs, reviews and per-user records,
/// mounted at the root of the API.
pub fn records_routes(records: Arc<RecordService>) -> Router {
    let faqs = Router::new()
        .route("/faqs", get(handlers::list_entries).post(handlers::create_entry))
        .with_state(CatalogState { records: records.clone(), collection: Collection::Faqs });

    let reviews = Router::new()
        .route("/reviews", get(handlers::list_entries).post(handlers::create_entry))
        .with_state(CatalogState { records: records.clone(), collection: Collection::Reviews });

    let contacts = Router::new()
        .route("/emergency-contacts", post(handlers::create_entry))
        .with_state(CatalogState { records: records.clone(), collection: Collection::EmergencyContacts });

    let per_record = Router::new()
        .route("/treatments/{id}/reviews", get(handlers::treatment_reviews))
        .route("/treatments/{id}/rating", get(handlers::treatment_rating))
        .route("/users/{user_id}/emergency-contacts", get(handlers::list_emergency_contacts))
        .route("/users/{user_id}/emergency-contacts/{contact_id}", delete(handlers::delete_emergency_contact))
        .route("/users/{user_id}/profile", get(handlers::get_profile).put(handlers::save_profile))
        .with_state(records.clone());

    Router::new()
        .merge(catalog_routes("/treatments", Collection::Treatments, records.clone()))
        .merge(catalog_routes("/medicines", Collection::Medicines, records.clone()))
        .merge(catalog_routes("/lab-tests", Collection::LabTests, records))
        .merge(faqs)
        .merge(reviews)
        .merge(contacts)
        .merge(per_record)
}
