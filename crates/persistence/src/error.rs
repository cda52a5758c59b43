//! # Persistence Errors
//!
//! Error types for the persistence layer, wrapping sqlx and serde errors.

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    // === Database errors ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity} with id {id}")]
    AlreadyExists { entity: String, id: String },

    // === Conversion errors ===
    #[error("Invalid enum value: {field} = {value}")]
    InvalidEnumValue { field: String, value: String },

    #[error("Attachment list serialization error: {0}")]
    AttachmentSerialization(#[from] serde_json::Error),
}

/// Result type alias for PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// Create a NotFound error
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Create an AlreadyExists error
    pub fn already_exists(entity: &str, id: impl ToString) -> Self {
        Self::AlreadyExists {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Check whether this is a not-found failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check whether this is a uniqueness collision
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Check whether this is a storage-level failure
    pub fn is_database_error(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_helper() {
        let err = PersistenceError::not_found("Complaint", 42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Record not found: Complaint with id 42");
    }

    #[test]
    fn test_already_exists_helper() {
        let err = PersistenceError::already_exists("Identity", "ann");
        assert!(err.is_already_exists());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Record already exists: Identity with id ann");
    }

    #[test]
    fn test_invalid_enum_value() {
        let err = PersistenceError::InvalidEnumValue {
            field: "status".to_string(),
            value: "Closed".to_string(),
        };
        assert!(err.to_string().contains("status"));
        assert!(err.to_string().contains("Closed"));
        assert!(!err.is_not_found());
    }
}
