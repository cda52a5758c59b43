//! # Vantrack Persistence
//!
//! Persistence layer for the complaint tracker - a single embedded SQLite
//! database.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  Database                    │
//! │  ┌─────────────┐       ┌──────────────────┐  │
//! │  │   SQLite    │       │      Repos       │  │
//! │  │  (records)  │       │    (queries)     │  │
//! │  └─────────────┘       └──────────────────┘  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vantrack_persistence::{ComplaintRepo, Database};
//! use vantrack_core::ComplaintFilter;
//!
//! let db = Database::init("sqlite:vantrack.db").await?;
//! let rows = ComplaintRepo::list(db.pool(), &ComplaintFilter::any()).await?;
//! ```

pub mod error;
pub mod sqlite;

pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::{
    create_pool, create_schema, init_database, ComplaintMutation, ComplaintRepo, ComplaintRow,
    IdentityRepo, IdentityRow,
};

use sqlx::SqlitePool;

/// Database facade - owns the connection pool
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to an existing database
    ///
    /// # Arguments
    /// * `db_url` - SQLite database URL (e.g., "sqlite:vantrack.db")
    pub async fn new(db_url: &str) -> PersistenceResult<Self> {
        let pool = create_pool(db_url).await?;
        Ok(Self { pool })
    }

    /// Create the database (if missing) and its schema, then connect
    pub async fn init(db_url: &str) -> PersistenceResult<Self> {
        let pool = init_database(db_url).await?;
        Ok(Self { pool })
    }

    /// Get the SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}
