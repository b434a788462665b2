use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use shared_utils::validation::{describe_missing, missing_fields, non_blank};

use crate::models::{Collection, Filter, Record, RecordError, TreatmentRating};
use crate::services::store::SharedStore;

/// Validation and per-collection rules on top of a [`RecordStore`].
///
/// [`RecordStore`]: crate::services::RecordStore
#[derive(Clone)]
pub struct RecordService {
    store: SharedStore,
}

impl RecordService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self, collection: Collection) -> Result<Vec<Record>, RecordError> {
        self.store.list(collection, &[]).await
    }

    pub async fn get(&self, collection: Collection, id: Uuid) -> Result<Record, RecordError> {
        self.store.get(collection, id).await
    }

    pub async fn create(&self, collection: Collection, body: Value) -> Result<Record, RecordError> {
        let record = prepare(collection, body, Write::Create)?;
        let created = self.store.insert(collection, record).await?;
        info!("{} added", collection.label());
        Ok(created)
    }

    pub async fn update(&self, collection: Collection, id: Uuid, body: Value) -> Result<Record, RecordError> {
        let patch = prepare(collection, body, Write::Update)?;
        self.store.update(collection, id, patch).await
    }

    pub async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), RecordError> {
        let removed = self.store.delete(collection, &[Filter::eq("id", id)]).await?;
        if removed == 0 {
            return Err(RecordError::NotFound(collection.label()));
        }

        info!("{} {} deleted", collection.label(), id);
        Ok(())
    }

    // ==========================================================================
    // REVIEWS
    // ==========================================================================

    pub async fn reviews_for(&self, treatment_id: Uuid) -> Result<Vec<Record>, RecordError> {
        self.store
            .list(Collection::Reviews, &[Filter::eq("treatment_id", treatment_id)])
            .await
    }

    /// Mean rating of a treatment; `0` when nobody has reviewed it yet.
    pub async fn rating(&self, treatment_id: Uuid) -> Result<TreatmentRating, RecordError> {
        let ratings: Vec<f64> = self
            .reviews_for(treatment_id)
            .await?
            .iter()
            .filter_map(|review| review.get("rating").and_then(Value::as_f64))
            .collect();

        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<f64>() / ratings.len() as f64
        };

        Ok(TreatmentRating {
            treatment_id: treatment_id.to_string(),
            average_rating,
            review_count: ratings.len(),
        })
    }

    // ==========================================================================
    // PER-USER RECORDS
    // ==========================================================================

    pub async fn emergency_contacts(&self, user_id: &str) -> Result<Vec<Record>, RecordError> {
        let user_id = require_user_id(user_id)?;
        self.store
            .list(Collection::EmergencyContacts, &[Filter::eq("user_id", user_id)])
            .await
    }

    /// Only removes the contact if it belongs to `user_id`.
    pub async fn remove_emergency_contact(&self, user_id: &str, contact_id: Uuid) -> Result<(), RecordError> {
        let user_id = require_user_id(user_id)?;
        let filters = [Filter::eq("id", contact_id), Filter::eq("user_id", user_id)];

        if self.store.delete(Collection::EmergencyContacts, &filters).await? == 0 {
            return Err(RecordError::NotFound(Collection::EmergencyContacts.label()));
        }
        Ok(())
    }

    pub async fn profile(&self, user_id: &str) -> Result<Record, RecordError> {
        let user_id = require_user_id(user_id)?;
        self.store
            .list(Collection::UserProfiles, &[Filter::eq("user_id", user_id)])
            .await?
            .into_iter()
            .next()
            .ok_or(RecordError::NotFound(Collection::UserProfiles.label()))
    }

    /// Creates the profile on first save and overwrites it afterwards.
    /// The flag is `true` when a new profile was created.
    pub async fn save_profile(&self, user_id: &str, mut body: Value) -> Result<(Record, bool), RecordError> {
        let user_id = require_user_id(user_id)?;
        if let Value::Object(ref mut object) = body {
            object.insert("user_id".to_string(), json!(user_id));
        }
        let record = prepare(Collection::UserProfiles, body, Write::Update)?;

        let existing = self.store
            .list(Collection::UserProfiles, &[Filter::eq("user_id", &user_id)])
            .await?
            .into_iter()
            .next();

        match existing {
            Some(profile) => {
                let id = row_id(&profile)?;
                debug!("Updating profile of {}", user_id);
                Ok((self.store.update(Collection::UserProfiles, id, record).await?, false))
            }
            None => {
                debug!("Creating profile of {}", user_id);
                Ok((self.store.insert(Collection::UserProfiles, record).await?, true))
            }
        }
    }
}

fn require_user_id(user_id: &str) -> Result<String, RecordError> {
    non_blank(Some(user_id))
        .ok_or_else(|| RecordError::ValidationError("User ID is required.".to_string()))
}

fn row_id(record: &Record) -> Result<Uuid, RecordError> {
    record
        .get("id")
        .and_then(Value::as_str)
        .and_then(|id| Uuid::parse_str(id).ok())
        .ok_or_else(|| RecordError::DatabaseError("Stored row has no valid id".to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Write {
    Create,
    Update,
}

/// Keeps only the collection's writable fields, applies create-time defaults
/// and checks required fields and value ranges.
fn prepare(collection: Collection, body: Value, write: Write) -> Result<Record, RecordError> {
    let Value::Object(mut object) = body else {
        return Err(RecordError::ValidationError("Request body must be a JSON object.".to_string()));
    };

    let mut record: Record = collection
        .fields()
        .iter()
        .filter_map(|field| object.remove(*field).map(|value| (field.to_string(), value)))
        .collect();

    // Defaults only apply to new rows.
    if write == Write::Create
        && collection == Collection::Medicines
        && matches!(record.get("price"), None | Some(Value::Null))
    {
        record.insert("price".to_string(), json!(0));
    }

    let required = match write {
        Write::Create => collection.required_fields(),
        Write::Update => collection.update_required_fields(),
    };
    let missing = missing_fields(&record, required);
    if !missing.is_empty() {
        return Err(RecordError::ValidationError(describe_missing(&missing)));
    }

    match collection {
        Collection::Medicines | Collection::LabTests => normalize_price(&mut record)?,
        Collection::Reviews => normalize_rating(&mut record)?,
        _ => {}
    }

    Ok(record)
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn normalize_price(record: &mut Record) -> Result<(), RecordError> {
    let Some(value) = record.get("price") else {
        return Ok(());
    };

    match as_number(value) {
        Some(price) if price >= 0.0 && price.is_finite() => {
            record.insert("price".to_string(), json!(price));
            Ok(())
        }
        _ => Err(RecordError::ValidationError("Price must be a non-negative number.".to_string())),
    }
}

fn normalize_rating(record: &mut Record) -> Result<(), RecordError> {
    let rating = record
        .get("rating")
        .and_then(as_number)
        .filter(|r| r.fract() == 0.0 && (1.0..=5.0).contains(r));

    match rating {
        Some(rating) => {
            record.insert("rating".to_string(), json!(rating as i64));
            Ok(())
        }
        None => Err(RecordError::ValidationError("Rating must be between 1 and 5.".to_string())),
    }
}
