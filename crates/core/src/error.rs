//! # Error Module
//!
//! Domain errors for Vantrack core using thiserror.

use thiserror::Error;

/// Core domain errors.
///
/// Business-rule failures that do not depend on any infrastructure.
#[derive(Debug, Error)]
pub enum CoreError {
    // === Validation errors ===
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid vehicle number: {0} (must be positive)")]
    InvalidVehicleNumber(i64),

    // === Enum parsing errors ===
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid reaction: {0}")]
    InvalidReaction(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Check whether this is a validation failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::Validation(_) | CoreError::InvalidVehicleNumber(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::Validation("description must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: description must not be empty"
        );

        let err = CoreError::InvalidVehicleNumber(0);
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_is_validation() {
        assert!(CoreError::Validation("x".to_string()).is_validation());
        assert!(CoreError::InvalidVehicleNumber(-3).is_validation());
        assert!(!CoreError::InvalidStatus("x".to_string()).is_validation());
    }
}
