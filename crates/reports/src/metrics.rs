//! Resolution-time and count metrics
//!
//! Pure functions over a complaint slice. Resolution time is measured from
//! `created_at` to the most recent `resolved_at`; rows that have never been
//! resolved contribute nothing to duration-based metrics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vantrack_core::{Complaint, ComplaintStatus};

/// Total and open counts over a complaint set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintCounts {
    pub total: usize,
    pub open_count: usize,
}

/// Count all rows and the Open subset
pub fn counts(rows: &[Complaint]) -> ComplaintCounts {
    ComplaintCounts {
        total: rows.len(),
        open_count: rows
            .iter()
            .filter(|c| c.status == ComplaintStatus::Open)
            .count(),
    }
}

/// Count rows whose resolution date equals `today`
pub fn resolved_today(rows: &[Complaint], today: NaiveDate) -> usize {
    rows.iter()
        .filter(|c| {
            c.resolved_at
                .map(|t| t.date_naive() == today)
                .unwrap_or(false)
        })
        .count()
}

/// Arithmetic mean of `(resolved_at - created_at)` in hours over resolved
/// rows. `None` when no row carries a resolution time - an unresolved set
/// has no average, it is not a zero-hour one.
pub fn average_resolution_hours(rows: &[Complaint]) -> Option<f64> {
    let durations: Vec<f64> = rows
        .iter()
        .filter_map(|c| c.resolved_at.map(|r| (r - c.created_at).num_seconds() as f64 / 3600.0))
        .collect();

    if durations.is_empty() {
        return None;
    }
    Some(durations.iter().sum::<f64>() / durations.len() as f64)
}

/// Per-status tallies for charting.
///
/// Only statuses present in `rows` appear as keys; the caller decides what
/// an absent status means for its chart.
pub fn status_breakdown(rows: &[Complaint]) -> HashMap<ComplaintStatus, usize> {
    let mut breakdown = HashMap::new();
    for complaint in rows {
        *breakdown.entry(complaint.status).or_insert(0) += 1;
    }
    breakdown
}

/// The metrics snapshot handed to oversight surfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total: usize,
    pub open_count: usize,
    pub resolved_today: usize,
    /// Absent when nothing in the set has been resolved
    pub average_resolution_hours: Option<f64>,
}

impl MetricsSnapshot {
    /// Compute the snapshot over a filtered complaint set
    pub fn generate(rows: &[Complaint], today: NaiveDate) -> Self {
        let ComplaintCounts { total, open_count } = counts(rows);
        Self {
            total,
            open_count,
            resolved_today: resolved_today(rows, today),
            average_resolution_hours: average_resolution_hours(rows),
        }
    }
}
