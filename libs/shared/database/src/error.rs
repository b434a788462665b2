use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// SQLSTATE Postgres reports for a unique constraint violation.
pub const UNIQUE_VIOLATION: &str = "23505";

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error payload PostgREST returns for failed statements.
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

impl DatabaseError {
    /// Classifies a non-success PostgREST response.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed: PostgrestError = serde_json::from_str(body).unwrap_or_default();
        let message = match (&parsed.message, &parsed.details) {
            (Some(message), Some(details)) => format!("{} ({})", message, details),
            (Some(message), None) => message.clone(),
            _ => body.to_string(),
        };

        if parsed.code.as_deref() == Some(UNIQUE_VIOLATION) {
            return DatabaseError::UniqueViolation(message);
        }

        match status.as_u16() {
            401 | 403 => DatabaseError::Auth(message),
            404 => DatabaseError::NotFound(message),
            409 => DatabaseError::UniqueViolation(message),
            _ => DatabaseError::Api { status, message },
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DatabaseError::UniqueViolation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn sqlstate_23505_is_a_unique_violation() {
        let body = r#"{"code":"23505","details":"Key (doctor_id, date) already exists.","hint":null,"message":"duplicate key value violates unique constraint \"appointments_doctor_id_date_key\""}"#;
        let err = DatabaseError::from_response(StatusCode::CONFLICT, body);
        assert!(err.is_unique_violation());
        assert!(err.to_string().contains("appointments_doctor_id_date_key"));
    }

    #[test]
    fn bare_409_is_a_unique_violation() {
        let err = DatabaseError::from_response(StatusCode::CONFLICT, "conflict");
        assert_matches!(err, DatabaseError::UniqueViolation(msg) if msg == "conflict");
    }

    #[test]
    fn other_statuses_are_classified() {
        assert_matches!(
            DatabaseError::from_response(StatusCode::UNAUTHORIZED, "{}"),
            DatabaseError::Auth(_)
        );
        assert_matches!(
            DatabaseError::from_response(StatusCode::NOT_FOUND, "missing"),
            DatabaseError::NotFound(_)
        );
        assert_matches!(
            DatabaseError::from_response(StatusCode::BAD_REQUEST, r#"{"code":"22P02","message":"invalid input syntax for type uuid"}"#),
            DatabaseError::Api { status, message } if status == StatusCode::BAD_REQUEST && message.contains("uuid")
        );
    }
}
