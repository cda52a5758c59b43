//! Database schema definitions
//!
//! Row types for sqlx mapping from SQLite tables, plus conversions into
//! the domain types. Attachment references are persisted as a JSON TEXT
//! column (a list of opaque strings).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vantrack_core::{Category, Complaint, ComplaintStatus, Identity, Reaction, Role};

use crate::error::PersistenceError;

/// Row type for the `complaints` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ComplaintRow {
    pub id: i64,
    pub vehicle_number: i64,
    pub occurred_at: DateTime<Utc>,
    pub category: String,
    pub description: String,
    pub attachments: String, // JSON array stored as TEXT
    pub status: String,
    pub response: Option<String>,
    pub reaction: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Row type for the `identities` table.
///
/// Deliberately not serializable: the credential digest must not leave
/// this layer through any serialized form.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IdentityRow {
    pub id: i64,
    pub username: String,
    /// One-way digest of the secret; never exposed outside this layer
    pub credential_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

// === Conversion implementations ===

impl TryFrom<ComplaintRow> for Complaint {
    type Error = PersistenceError;

    fn try_from(row: ComplaintRow) -> Result<Self, Self::Error> {
        let category = Category::from_str(&row.category).map_err(|_| {
            PersistenceError::InvalidEnumValue {
                field: "category".to_string(),
                value: row.category.clone(),
            }
        })?;
        let status = ComplaintStatus::from_str(&row.status).map_err(|_| {
            PersistenceError::InvalidEnumValue {
                field: "status".to_string(),
                value: row.status.clone(),
            }
        })?;
        let reaction = row
            .reaction
            .as_deref()
            .map(|r| {
                Reaction::from_str(r).map_err(|_| PersistenceError::InvalidEnumValue {
                    field: "reaction".to_string(),
                    value: r.to_string(),
                })
            })
            .transpose()?;
        let attachments: Vec<String> = serde_json::from_str(&row.attachments)?;

        Ok(Complaint {
            id: row.id,
            vehicle_number: row.vehicle_number,
            occurred_at: row.occurred_at,
            category,
            description: row.description,
            attachments,
            status,
            response: row.response,
            reaction,
            created_at: row.created_at,
            updated_at: row.updated_at,
            resolved_at: row.resolved_at,
        })
    }
}

impl TryFrom<IdentityRow> for Identity {
    type Error = PersistenceError;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role).map_err(|_| PersistenceError::InvalidEnumValue {
            field: "role".to_string(),
            value: row.role.clone(),
        })?;
        Ok(Identity {
            username: row.username,
            role,
            created_at: row.created_at,
        })
    }
}
