//! # Vantrack Reports
//!
//! Analytics over complaint sets. Everything here is a pure function of a
//! complaint slice: filtering happens upstream through the repository's
//! `list`, and no additional filtering is applied by this crate.
//!
//! ## Metrics
//!
//! - [`counts`] - total and open counts
//! - [`resolved_today`] - resolutions whose date portion is today
//! - [`average_resolution_hours`] - mean time-to-resolution, absent when
//!   nothing has been resolved (never a false zero)
//! - [`status_breakdown`] - per-status tallies for charting
//! - [`MetricsSnapshot`] - all of the above in one pass
//!
//! ## Projection
//!
//! - [`ComplaintTableRow`] / [`project`] - the tabular shape handed to
//!   rendering surfaces
//!
//! ## Export
//!
//! - [`ComplaintReport`] with [`CsvExporter`] / [`JsonExporter`] - filtered
//!   sets plus their metrics, serialized for downstream tooling

pub mod export;
pub mod metrics;
pub mod table;

pub use export::{ComplaintReport, CsvExporter, JsonExporter, ReportData, ReportExporter};
pub use metrics::{
    average_resolution_hours, counts, resolved_today, status_breakdown, ComplaintCounts,
    MetricsSnapshot,
};
pub use table::{project, ComplaintTableRow};
