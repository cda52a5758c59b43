//! Repository implementations for SQLite
//!
//! All reads and writes for complaints and identities go through here.
//! Every mutation is a single atomic UPDATE scoped to one row; the pool is
//! capped at one connection, which is the single-logical-writer model the
//! storage layer assumes.

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::str::FromStr;
use vantrack_core::{Complaint, ComplaintDraft, ComplaintFilter, ComplaintStatus, Reaction, Role};

use crate::error::{PersistenceError, PersistenceResult};
use crate::sqlite::schema::{ComplaintRow, IdentityRow};

/// Field-level mutation applied through [`ComplaintRepo::apply_update`].
///
/// This is the only legal way to change a persisted complaint. Fields the
/// mutation does not carry are left untouched: in particular a `Status`
/// mutation without `resolved_at` preserves any earlier resolution time,
/// and one without `response` keeps the existing response text.
#[derive(Debug, Clone)]
pub enum ComplaintMutation {
    Status {
        status: ComplaintStatus,
        /// Replaces the stored response when present
        response: Option<String>,
        /// Stamped only when the workflow enters Resolved
        resolved_at: Option<DateTime<Utc>>,
    },
    Reaction(Reaction),
}

// ============================================================================
// Complaint Repository
// ============================================================================

/// Repository for the complaints table
pub struct ComplaintRepo;

impl ComplaintRepo {
    /// Insert a new complaint from a validated draft.
    ///
    /// The store assigns the id, sets status Open, `created_at =
    /// updated_at = now` and leaves response/reaction/resolved_at absent.
    pub async fn insert(pool: &SqlitePool, draft: &ComplaintDraft) -> PersistenceResult<Complaint> {
        let now = Utc::now();
        let attachments = serde_json::to_string(&draft.attachments)?;

        let result = sqlx::query(
            r#"
            INSERT INTO complaints
                (vehicle_number, occurred_at, category, description, attachments,
                 status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(draft.vehicle_number)
        .bind(draft.occurred_at)
        .bind(draft.category.as_str())
        .bind(&draft.description)
        .bind(&attachments)
        .bind(ComplaintStatus::Open.as_str())
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(complaint_id = id, vehicle = draft.vehicle_number, "complaint inserted");

        Self::get_by_id(pool, id).await
    }

    /// Fetch a complaint by id
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> PersistenceResult<Complaint> {
        let row = sqlx::query_as::<_, ComplaintRow>("SELECT * FROM complaints WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Complaint", id))?;
        row.try_into()
    }

    /// List complaints matching a filter, newest incident first.
    ///
    /// Ordered by `occurred_at` descending with ties broken by id
    /// descending for determinism. An empty result is valid.
    pub async fn list(
        pool: &SqlitePool,
        filter: &ComplaintFilter,
    ) -> PersistenceResult<Vec<Complaint>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM complaints WHERE 1=1");

        if let Some(vehicle) = filter.vehicle_number {
            qb.push(" AND vehicle_number = ").push_bind(vehicle);
        }
        if let Some(fragment) = &filter.category_contains {
            // instr() keeps the substring match case-sensitive; LIKE would not
            qb.push(" AND instr(category, ").push_bind(fragment).push(") > 0");
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(from) = filter.occurred_from {
            qb.push(" AND date(occurred_at) >= ").push_bind(from.to_string());
        }
        if let Some(to) = filter.occurred_to {
            qb.push(" AND date(occurred_at) <= ").push_bind(to.to_string());
        }

        qb.push(" ORDER BY occurred_at DESC, id DESC");

        let rows = qb
            .build_query_as::<ComplaintRow>()
            .fetch_all(pool)
            .await?;

        rows.into_iter().map(Complaint::try_from).collect()
    }

    /// Apply a field-level mutation to one complaint.
    ///
    /// One atomic UPDATE statement; `updated_at` always advances. Fails
    /// with NotFound when the id does not exist, leaving nothing changed.
    pub async fn apply_update(
        pool: &SqlitePool,
        id: i64,
        mutation: ComplaintMutation,
    ) -> PersistenceResult<Complaint> {
        let now = Utc::now();

        let result = match &mutation {
            ComplaintMutation::Status {
                status,
                response,
                resolved_at,
            } => {
                sqlx::query(
                    r#"
                    UPDATE complaints
                    SET status = ?,
                        response = COALESCE(?, response),
                        resolved_at = COALESCE(?, resolved_at),
                        updated_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(status.as_str())
                .bind(response)
                .bind(resolved_at)
                .bind(now)
                .bind(id)
                .execute(pool)
                .await?
            }
            ComplaintMutation::Reaction(reaction) => {
                sqlx::query("UPDATE complaints SET reaction = ?, updated_at = ? WHERE id = ?")
                    .bind(reaction.as_str())
                    .bind(now)
                    .bind(id)
                    .execute(pool)
                    .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Complaint", id));
        }

        tracing::debug!(complaint_id = id, ?mutation, "complaint updated");
        Self::get_by_id(pool, id).await
    }

    /// Count all complaints
    pub async fn count(pool: &SqlitePool) -> PersistenceResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM complaints")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}

// ============================================================================
// Identity Repository
// ============================================================================

/// Repository for the identities table
pub struct IdentityRepo;

impl IdentityRepo {
    /// Fetch an identity row by exact username
    pub async fn get_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> PersistenceResult<Option<IdentityRow>> {
        let row = sqlx::query_as::<_, IdentityRow>("SELECT * FROM identities WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Insert a new identity row.
    ///
    /// `credential_hash` is the one-way digest of the secret; the raw
    /// secret never reaches this layer. A username collision surfaces as
    /// AlreadyExists via the UNIQUE constraint.
    pub async fn insert(
        pool: &SqlitePool,
        username: &str,
        credential_hash: &str,
        role: Role,
    ) -> PersistenceResult<IdentityRow> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO identities (username, credential_hash, role, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(username)
        .bind(credential_hash)
        .bind(role.as_str())
        .bind(now)
        .execute(pool)
        .await;

        match result {
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(PersistenceError::already_exists("Identity", username));
            }
            other => {
                other?;
            }
        }

        tracing::debug!(username, role = %role, "identity inserted");

        Self::get_by_username(pool, username)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Identity", username))
    }

    /// Count all identities
    pub async fn count(pool: &SqlitePool) -> PersistenceResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM identities")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}

// ============================================================================
// Database initialization
// ============================================================================

/// Create the connection pool.
///
/// Capped at one connection: the datastore serializes writes and an
/// in-memory database stays shared across acquires in tests.
pub async fn create_pool(database_url: &str) -> PersistenceResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Create tables and indexes if they do not exist
pub async fn create_schema(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::raw_sql(
        r#"
        -- Identities: username unique, digest + role
        CREATE TABLE IF NOT EXISTS identities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            credential_hash TEXT NOT NULL,
            role TEXT NOT NULL,
            created_at DATETIME NOT NULL
        );

        -- Complaint records
        CREATE TABLE IF NOT EXISTS complaints (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            vehicle_number INTEGER NOT NULL,
            occurred_at DATETIME NOT NULL,
            category TEXT NOT NULL,
            description TEXT NOT NULL,
            attachments TEXT NOT NULL DEFAULT '[]',
            status TEXT NOT NULL DEFAULT 'Open',
            response TEXT,
            reaction TEXT,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL,
            resolved_at DATETIME
        );

        CREATE INDEX IF NOT EXISTS idx_complaints_occurred_at ON complaints(occurred_at);
        CREATE INDEX IF NOT EXISTS idx_complaints_status ON complaints(status);
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("database schema ready");
    Ok(())
}

/// Create the database file (if missing) and the schema
pub async fn init_database(database_url: &str) -> PersistenceResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use vantrack_core::Category;

    async fn test_pool() -> SqlitePool {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        create_schema(&pool).await.unwrap();
        pool
    }

    fn ts(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    fn draft(vehicle: i64, occurred: &str, category: Category, text: &str) -> ComplaintDraft {
        ComplaintDraft::new(vehicle, ts(occurred), category, text, vec![]).unwrap()
    }

    #[tokio::test]
    async fn test_insert_sets_creation_invariants() {
        let pool = test_pool().await;
        let complaint = ComplaintRepo::insert(
            &pool,
            &ComplaintDraft::new(
                12,
                ts("2024-03-01 08:00:00"),
                Category::Delay,
                "15 min late",
                vec!["uploads/a.jpg".to_string()],
            )
            .unwrap(),
        )
        .await
        .unwrap();

        assert_eq!(complaint.id, 1);
        assert_eq!(complaint.status, ComplaintStatus::Open);
        assert_eq!(complaint.created_at, complaint.updated_at);
        assert!(complaint.resolved_at.is_none());
        assert!(complaint.response.is_none());
        assert!(complaint.reaction.is_none());
        assert_eq!(complaint.attachments, vec!["uploads/a.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let pool = test_pool().await;
        let err = ComplaintRepo::get_by_id(&pool, 99).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_orders_newest_first_with_id_tiebreak() {
        let pool = test_pool().await;
        ComplaintRepo::insert(&pool, &draft(1, "2024-03-01 08:00:00", Category::Delay, "a"))
            .await
            .unwrap();
        ComplaintRepo::insert(&pool, &draft(2, "2024-03-02 08:00:00", Category::Fight, "b"))
            .await
            .unwrap();
        // Same occurred_at as the first row: id breaks the tie, descending
        ComplaintRepo::insert(&pool, &draft(3, "2024-03-01 08:00:00", Category::Other, "c"))
            .await
            .unwrap();

        let rows = ComplaintRepo::list(&pool, &ComplaintFilter::any())
            .await
            .unwrap();
        let ids: Vec<i64> = rows.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let pool = test_pool().await;
        ComplaintRepo::insert(
            &pool,
            &draft(12, "2024-03-01 08:00:00", Category::DriverMisconduct, "x"),
        )
        .await
        .unwrap();
        ComplaintRepo::insert(&pool, &draft(12, "2024-03-05 09:00:00", Category::Delay, "y"))
            .await
            .unwrap();
        ComplaintRepo::insert(&pool, &draft(7, "2024-03-10 10:00:00", Category::Delay, "z"))
            .await
            .unwrap();

        let by_vehicle = ComplaintRepo::list(&pool, &ComplaintFilter::any().with_vehicle(12))
            .await
            .unwrap();
        assert_eq!(by_vehicle.len(), 2);

        // Case-sensitive substring match
        let hit = ComplaintRepo::list(
            &pool,
            &ComplaintFilter::any().with_category_contains("Misconduct"),
        )
        .await
        .unwrap();
        assert_eq!(hit.len(), 1);
        let miss = ComplaintRepo::list(
            &pool,
            &ComplaintFilter::any().with_category_contains("misconduct"),
        )
        .await
        .unwrap();
        assert!(miss.is_empty());

        // Inclusive date bounds on the incident date
        let bounded = ComplaintRepo::list(
            &pool,
            &ComplaintFilter::any()
                .with_occurred_from(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
                .with_occurred_to(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()),
        )
        .await
        .unwrap();
        assert_eq!(bounded.len(), 2);

        // All fields at once: the intersection
        let combined = ComplaintRepo::list(
            &pool,
            &ComplaintFilter::any()
                .with_vehicle(12)
                .with_category_contains("Delay")
                .with_status(ComplaintStatus::Open)
                .with_occurred_from(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
                .with_occurred_to(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()),
        )
        .await
        .unwrap();
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].description, "y");
    }

    #[tokio::test]
    async fn test_list_status_filter() {
        let pool = test_pool().await;
        let a = ComplaintRepo::insert(&pool, &draft(1, "2024-03-01 08:00:00", Category::Delay, "a"))
            .await
            .unwrap();
        ComplaintRepo::insert(&pool, &draft(2, "2024-03-02 08:00:00", Category::Delay, "b"))
            .await
            .unwrap();

        ComplaintRepo::apply_update(
            &pool,
            a.id,
            ComplaintMutation::Status {
                status: ComplaintStatus::Resolved,
                response: None,
                resolved_at: Some(Utc::now()),
            },
        )
        .await
        .unwrap();

        let open = ComplaintRepo::list(
            &pool,
            &ComplaintFilter::any().with_status(ComplaintStatus::Open),
        )
        .await
        .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, 2);
    }

    #[tokio::test]
    async fn test_apply_update_status_and_preservation() {
        let pool = test_pool().await;
        let created = ComplaintRepo::insert(&pool, &draft(12, "2024-03-01 08:00:00", Category::Delay, "late"))
            .await
            .unwrap();

        let resolved_time = ts("2024-03-01 09:30:00");
        let resolved = ComplaintRepo::apply_update(
            &pool,
            created.id,
            ComplaintMutation::Status {
                status: ComplaintStatus::Resolved,
                response: Some("Driver rerouted".to_string()),
                resolved_at: Some(resolved_time),
            },
        )
        .await
        .unwrap();
        assert_eq!(resolved.status, ComplaintStatus::Resolved);
        assert_eq!(resolved.response.as_deref(), Some("Driver rerouted"));
        assert_eq!(resolved.resolved_at, Some(resolved_time));
        assert!(resolved.updated_at >= resolved.created_at);

        // Moving away from Resolved without a resolution stamp or response
        // keeps both untouched
        let reopened = ComplaintRepo::apply_update(
            &pool,
            created.id,
            ComplaintMutation::Status {
                status: ComplaintStatus::InProgress,
                response: None,
                resolved_at: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(reopened.status, ComplaintStatus::InProgress);
        assert_eq!(reopened.resolved_at, Some(resolved_time));
        assert_eq!(reopened.response.as_deref(), Some("Driver rerouted"));
    }

    #[tokio::test]
    async fn test_apply_update_reaction() {
        let pool = test_pool().await;
        let created = ComplaintRepo::insert(&pool, &draft(12, "2024-03-01 08:00:00", Category::Delay, "late"))
            .await
            .unwrap();

        let reacted = ComplaintRepo::apply_update(
            &pool,
            created.id,
            ComplaintMutation::Reaction(Reaction::Exemplary),
        )
        .await
        .unwrap();
        assert_eq!(reacted.reaction, Some(Reaction::Exemplary));
        // Reaction is independent of workflow fields
        assert_eq!(reacted.status, ComplaintStatus::Open);
        assert!(reacted.resolved_at.is_none());
    }

    #[tokio::test]
    async fn test_apply_update_not_found() {
        let pool = test_pool().await;
        let err = ComplaintRepo::apply_update(
            &pool,
            404,
            ComplaintMutation::Reaction(Reaction::Positive),
        )
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_identity_insert_duplicate_username() {
        let pool = test_pool().await;
        IdentityRepo::insert(&pool, "ann", "digest", Role::Operator)
            .await
            .unwrap();

        // UNIQUE constraint on username surfaces as AlreadyExists
        let err = IdentityRepo::insert(&pool, "ann", "other", Role::Reviewer)
            .await
            .unwrap_err();
        assert!(err.is_already_exists());

        // First row untouched
        let row = IdentityRepo::get_by_username(&pool, "ann")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.credential_hash, "digest");
        assert_eq!(row.role, "operator");
    }

    #[tokio::test]
    async fn test_identity_repo_roundtrip() {
        let pool = test_pool().await;
        let row = IdentityRepo::insert(&pool, "ann", "digest", Role::Operator)
            .await
            .unwrap();
        assert_eq!(row.username, "ann");
        assert_eq!(row.role, "operator");

        let found = IdentityRepo::get_by_username(&pool, "ann").await.unwrap();
        assert!(found.is_some());
        let missing = IdentityRepo::get_by_username(&pool, "bob").await.unwrap();
        assert!(missing.is_none());

        assert_eq!(IdentityRepo::count(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_init_database_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vantrack.db");
        let url = format!("sqlite:{}", path.display());

        let pool = init_database(&url).await.unwrap();
        assert!(path.exists());
        assert_eq!(ComplaintRepo::count(&pool).await.unwrap(), 0);
        pool.close().await;
    }
}
