//! # Identity Module
//!
//! Identities and roles. Every operation that needs authorization context
//! takes an explicit [`Identity`] value; there is no ambient current-user
//! state anywhere in the system.
//!
//! - Reporter: files complaints
//! - Operator: advances workflow status and writes responses
//! - Reviewer: records a sentiment reaction, nothing else

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Role assigned to an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Files complaints
    Reporter,
    /// Updates status and response text
    Operator,
    /// Records reactions
    Reviewer,
}

impl Role {
    /// String form persisted to the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reporter => "reporter",
            Role::Operator => "operator",
            Role::Reviewer => "reviewer",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "reporter" => Ok(Role::Reporter),
            "operator" => Ok(Role::Operator),
            "reviewer" => Ok(Role::Reviewer),
            _ => Err(CoreError::InvalidRole(s.to_string())),
        }
    }

    /// May this role create complaints?
    pub fn can_submit(&self) -> bool {
        matches!(self, Role::Reporter)
    }

    /// May this role change workflow status / response text?
    pub fn can_manage_status(&self) -> bool {
        matches!(self, Role::Operator)
    }

    /// May this role record a reviewer reaction?
    pub fn can_react(&self) -> bool {
        matches!(self, Role::Reviewer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated identity.
///
/// Carries username and role only. The credential digest stays inside the
/// persistence layer; it is never part of this value, never logged, and
/// never returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(username: &str, role: Role) -> Self {
        Self {
            username: username.trim().to_string(),
            role,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.username, self.role)
    }
}
