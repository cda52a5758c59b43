//! Service context shared by the role services
//!
//! Holds database access for business operations. Services borrow the
//! context; nothing here carries user state - the acting [`Identity`] is
//! passed into every operation that needs authorization context.
//!
//! [`Identity`]: vantrack_core::Identity

use sqlx::SqlitePool;
use vantrack_persistence::Database;

/// Context for business operations - contains database access
pub struct ServiceContext {
    pool: SqlitePool,
}

impl ServiceContext {
    /// Create new service context from database
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Create from a pool directly
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
