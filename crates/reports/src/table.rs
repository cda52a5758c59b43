//! Tabular projection of a complaint set
//!
//! The flat row shape handed to rendering surfaces (terminal tables,
//! exports). Attachments appear as a count only - resolving references to
//! bytes belongs to the file-storage collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vantrack_core::Complaint;

/// One rendered row of a complaint table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintTableRow {
    pub id: i64,
    pub vehicle: i64,
    pub occurred_at: DateTime<Utc>,
    pub category: String,
    pub status: String,
    /// Empty string when no response has been recorded
    pub response: String,
    pub attachment_count: usize,
    /// Empty string when no reaction has been recorded
    pub reaction: String,
}

impl From<&Complaint> for ComplaintTableRow {
    fn from(complaint: &Complaint) -> Self {
        Self {
            id: complaint.id,
            vehicle: complaint.vehicle_number,
            occurred_at: complaint.occurred_at,
            category: complaint.category.to_string(),
            status: complaint.status.to_string(),
            response: complaint.response.clone().unwrap_or_default(),
            attachment_count: complaint.attachment_count(),
            reaction: complaint
                .reaction
                .map(|r| r.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Project a complaint slice into table rows, preserving order
pub fn project(rows: &[Complaint]) -> Vec<ComplaintTableRow> {
    rows.iter().map(ComplaintTableRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, Utc};
    use vantrack_core::{Category, ComplaintStatus, Reaction};

    fn sample() -> Complaint {
        let when = NaiveDateTime::parse_from_str("2024-03-01 08:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc();
        Complaint {
            id: 7,
            vehicle_number: 12,
            occurred_at: when,
            category: Category::DriverMisconduct,
            description: "speeding near the school gate".to_string(),
            attachments: vec!["uploads/a.jpg".to_string(), "uploads/b.jpg".to_string()],
            status: ComplaintStatus::InProgress,
            response: Some("warned the driver".to_string()),
            reaction: Some(Reaction::Positive),
            created_at: when,
            updated_at: Utc::now(),
            resolved_at: None,
        }
    }

    #[test]
    fn test_row_projection() {
        let row = ComplaintTableRow::from(&sample());
        assert_eq!(row.id, 7);
        assert_eq!(row.vehicle, 12);
        assert_eq!(row.category, "Driver Misconduct");
        assert_eq!(row.status, "In Progress");
        assert_eq!(row.response, "warned the driver");
        assert_eq!(row.attachment_count, 2);
        assert_eq!(row.reaction, "Positive");
    }

    #[test]
    fn test_absent_fields_render_empty() {
        let mut complaint = sample();
        complaint.response = None;
        complaint.reaction = None;
        let row = ComplaintTableRow::from(&complaint);
        assert_eq!(row.response, "");
        assert_eq!(row.reaction, "");
    }

    #[test]
    fn test_project_preserves_order() {
        let mut first = sample();
        first.id = 2;
        let mut second = sample();
        second.id = 1;
        let rows = project(&[first, second]);
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
