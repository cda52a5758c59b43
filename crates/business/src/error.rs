//! Business layer errors
//!
//! Uses anyhow for error aggregation with custom error types.

use thiserror::Error;

/// Business operation errors
#[derive(Debug, Error)]
pub enum BusinessError {
    // === Validation errors ===
    #[error("Validation error: {0}")]
    Validation(String),

    // === Authentication errors ===
    #[error("Authentication failed for user: {0}")]
    AuthenticationFailed(String),

    #[error("Identity already exists: {0}")]
    DuplicateIdentity(String),

    // === Permission errors ===
    #[error("Operation not permitted for {role}: {operation}")]
    OperationNotPermitted { role: String, operation: String },

    // === Not found errors ===
    #[error("Complaint not found: {0}")]
    ComplaintNotFound(i64),

    // === Wrapped errors ===
    #[error("Persistence error: {0}")]
    Persistence(#[from] vantrack_persistence::PersistenceError),

    #[error("Core error: {0}")]
    Core(#[from] vantrack_core::CoreError),
}

/// Result type alias for business operations
pub type BusinessResult<T> = anyhow::Result<T>;

impl BusinessError {
    /// Create an operation-not-permitted error
    pub fn not_permitted(role: vantrack_core::Role, operation: &str) -> Self {
        Self::OperationNotPermitted {
            role: role.to_string(),
            operation: operation.to_string(),
        }
    }

    /// Check whether this is an authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed(_) | Self::DuplicateIdentity(_)
        )
    }
}
