use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored row. Stores add `id` and `created_at`; everything else is whatever
/// the collection declares in [`Collection::fields`].
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Treatments,
    Medicines,
    LabTests,
    Faqs,
    Reviews,
    EmergencyContacts,
    UserProfiles,
}

impl Collection {
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Treatments => "treatments",
            Collection::Medicines => "medicines",
            Collection::LabTests => "lab_tests",
            Collection::Faqs => "faqs",
            Collection::Reviews => "reviews",
            Collection::EmergencyContacts => "emergency_contacts",
            Collection::UserProfiles => "user_profiles",
        }
    }

    /// Singular name used in client-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Collection::Treatments => "Treatment",
            Collection::Medicines => "Medicine",
            Collection::LabTests => "Lab test",
            Collection::Faqs => "FAQ",
            Collection::Reviews => "Review",
            Collection::EmergencyContacts => "Emergency contact",
            Collection::UserProfiles => "Profile",
        }
    }

    /// Writable columns. Anything else in a request body is dropped.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Treatments => &["name", "details", "related_medicine"],
            Collection::Medicines => &["name", "generic_name", "details", "related_medicine", "price"],
            Collection::LabTests => &["name", "description", "price"],
            Collection::Faqs => &["question", "answer"],
            Collection::Reviews => &["treatment_id", "user_id", "rating", "review"],
            Collection::EmergencyContacts => &["user_id", "name", "phone"],
            Collection::UserProfiles => &["user_id", "age", "blood_group", "medical_history"],
        }
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Treatments => &["name", "details"],
            Collection::Medicines => &["name"],
            Collection::LabTests => &["name", "price"],
            Collection::Faqs => &["question", "answer"],
            Collection::Reviews => &["treatment_id", "user_id", "rating"],
            Collection::EmergencyContacts => &["user_id", "name", "phone"],
            Collection::UserProfiles => &["user_id"],
        }
    }

    /// Fields an update must carry. Updates overwrite columns, so values that
    /// only have a create-time default are required here.
    pub fn update_required_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Medicines => &["name", "price"],
            other => other.required_fields(),
        }
    }

    /// Catalog listings show the most recently added entries first.
    pub fn newest_first(&self) -> bool {
        matches!(self, Collection::Treatments | Collection::Medicines | Collection::LabTests)
    }
}

/// Equality filter on a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: &'static str,
    pub value: String,
}

impl Filter {
    pub fn eq(field: &'static str, value: impl ToString) -> Self {
        Self { field, value: value.to_string() }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match record.get(self.field) {
            Some(Value::String(s)) => *s == self.value,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == self.value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentRating {
    pub treatment_id: String,
    pub average_rating: f64,
    pub review_count: usize,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0} not found.")]
    NotFound(&'static str),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
