//! # Filter Module
//!
//! Query configuration for selecting complaint subsets. Every field is
//! independently optional; an absent field imposes no constraint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::complaint::ComplaintStatus;

/// Predicate configuration for complaint retrieval.
///
/// Date bounds are inclusive and compared on the date portion of the
/// incident time. The category filter is a case-sensitive substring match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplaintFilter {
    /// Exact vehicle match
    pub vehicle_number: Option<i64>,
    /// Case-sensitive substring of the stored category text
    pub category_contains: Option<String>,
    /// Exact status match; `None` means any
    pub status: Option<ComplaintStatus>,
    /// Inclusive lower bound on the incident date
    pub occurred_from: Option<NaiveDate>,
    /// Inclusive upper bound on the incident date
    pub occurred_to: Option<NaiveDate>,
}

impl ComplaintFilter {
    /// Filter matching everything
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_vehicle(mut self, vehicle_number: i64) -> Self {
        self.vehicle_number = Some(vehicle_number);
        self
    }

    pub fn with_category_contains(mut self, fragment: &str) -> Self {
        self.category_contains = Some(fragment.to_string());
        self
    }

    pub fn with_status(mut self, status: ComplaintStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_occurred_from(mut self, from: NaiveDate) -> Self {
        self.occurred_from = Some(from);
        self
    }

    pub fn with_occurred_to(mut self, to: NaiveDate) -> Self {
        self.occurred_to = Some(to);
        self
    }

    /// True when no field constrains the result
    pub fn is_unconstrained(&self) -> bool {
        self.vehicle_number.is_none()
            && self.category_contains.is_none()
            && self.status.is_none()
            && self.occurred_from.is_none()
            && self.occurred_to.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconstrained() {
        assert!(ComplaintFilter::any().is_unconstrained());
        assert!(ComplaintFilter::default().is_unconstrained());
    }

    #[test]
    fn test_builder() {
        let filter = ComplaintFilter::any()
            .with_vehicle(12)
            .with_status(ComplaintStatus::Open)
            .with_category_contains("Misconduct");

        assert_eq!(filter.vehicle_number, Some(12));
        assert_eq!(filter.status, Some(ComplaintStatus::Open));
        assert_eq!(filter.category_contains.as_deref(), Some("Misconduct"));
        assert!(!filter.is_unconstrained());
    }

    #[test]
    fn test_date_bounds() {
        let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let filter = ComplaintFilter::any()
            .with_occurred_from(from)
            .with_occurred_to(to);

        assert_eq!(filter.occurred_from, Some(from));
        assert_eq!(filter.occurred_to, Some(to));
    }
}
