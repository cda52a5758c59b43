//! # Complaint Module
//!
//! The central entity of the tracker: a single reported incident and its
//! resolution record.
//!
//! A `Complaint` is created from a validated [`ComplaintDraft`], starts in
//! [`ComplaintStatus::Open`], and is mutated only through the repository's
//! update path. `resolved_at` records the *most recent* transition into
//! Resolved and is never cleared when a complaint is reopened.

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Problem category reported for a vehicle.
///
/// Closed enumeration; persisted as human-readable labels so substring
/// filters match the stored text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Fight,
    DriverMisconduct,
    Delay,
    Breakdown,
    Other,
}

impl Category {
    /// String form persisted to the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fight => "Fight",
            Category::DriverMisconduct => "Driver Misconduct",
            Category::Delay => "Delay",
            Category::Breakdown => "Breakdown",
            Category::Other => "Other",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "fight" => Ok(Category::Fight),
            "driver misconduct" | "driver_misconduct" => Ok(Category::DriverMisconduct),
            "delay" => Ok(Category::Delay),
            "breakdown" => Ok(Category::Breakdown),
            "other" => Ok(Category::Other),
            _ => Err(CoreError::InvalidCategory(s.to_string())),
        }
    }

    /// All categories, for selection surfaces
    pub fn all() -> [Category; 5] {
        [
            Category::Fight,
            Category::DriverMisconduct,
            Category::Delay,
            Category::Breakdown,
            Category::Other,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Workflow status of a complaint.
///
/// Open is the initial state. No state is terminal: any status may
/// transition to any other, including self-transitions. Reopening a
/// Resolved complaint is an intended operation, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    /// String form persisted to the database
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "Open",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(ComplaintStatus::Open),
            "in progress" | "in_progress" | "inprogress" => Ok(ComplaintStatus::InProgress),
            "resolved" => Ok(ComplaintStatus::Resolved),
            _ => Err(CoreError::InvalidStatus(s.to_string())),
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reviewer sentiment tag, independent of workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reaction {
    /// Handled well
    Positive,
    /// Resolution needs another look
    NeedsFollowup,
    /// Outstanding handling
    Exemplary,
}

impl Reaction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reaction::Positive => "Positive",
            Reaction::NeedsFollowup => "Needs Followup",
            Reaction::Exemplary => "Exemplary",
        }
    }

    pub fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Reaction::Positive),
            "needs followup" | "needs_followup" | "followup" => Ok(Reaction::NeedsFollowup),
            "exemplary" => Ok(Reaction::Exemplary),
            _ => Err(CoreError::InvalidReaction(s.to_string())),
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reported incident and its resolution record.
///
/// Invariants:
/// - `id` is unique, assigned by the store, never reused
/// - `description` is never empty
/// - `updated_at >= created_at`
/// - `resolved_at` is present iff the complaint has entered Resolved at
///   least once; it is overwritten only by a new Resolved transition and
///   never cleared by leaving Resolved or by unrelated updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    /// Store-assigned id, immutable after creation
    pub id: i64,
    /// Reporting vehicle (positive)
    pub vehicle_number: i64,
    /// Reporter-supplied incident time; may differ from `created_at`
    pub occurred_at: DateTime<Utc>,
    pub category: Category,
    pub description: String,
    /// Ordered opaque references to stored evidence files
    pub attachments: Vec<String>,
    pub status: ComplaintStatus,
    /// Operator response text, absent until first set
    pub response: Option<String>,
    /// Reviewer sentiment, absent until first set
    pub reaction: Option<Reaction>,
    pub created_at: DateTime<Utc>,
    /// Advances on every mutation
    pub updated_at: DateTime<Utc>,
    /// Most recent transition into Resolved
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Complaint {
    /// Check whether the complaint currently sits in Resolved
    pub fn is_resolved(&self) -> bool {
        self.status == ComplaintStatus::Resolved
    }

    /// Check whether the complaint has ever been resolved
    pub fn has_been_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }

    /// Number of attachment references
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }
}

impl fmt::Display for Complaint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Complaint #{} (vehicle {}, {}, status: {})",
            self.id, self.vehicle_number, self.category, self.status
        )
    }
}

/// Input for creating a complaint, validated at construction.
///
/// The store assigns `id`, `status`, `created_at`, `updated_at` and leaves
/// `response`, `reaction`, `resolved_at` absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintDraft {
    pub vehicle_number: i64,
    pub occurred_at: DateTime<Utc>,
    pub category: Category,
    pub description: String,
    pub attachments: Vec<String>,
}

impl ComplaintDraft {
    /// Build a validated draft.
    ///
    /// Fails when the description is empty after trimming or the vehicle
    /// number is not positive.
    pub fn new(
        vehicle_number: i64,
        occurred_at: DateTime<Utc>,
        category: Category,
        description: &str,
        attachments: Vec<String>,
    ) -> CoreResult<Self> {
        if vehicle_number <= 0 {
            return Err(CoreError::InvalidVehicleNumber(vehicle_number));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(CoreError::Validation(
                "description must not be empty".to_string(),
            ));
        }
        Ok(Self {
            vehicle_number,
            occurred_at,
            category,
            description: description.to_string(),
            attachments,
        })
    }
}
