//! Report exporters - CSV and JSON
//!
//! Export formats for a filtered complaint set. The exporters work on the
//! [`ReportData`] trait so new report shapes pick up every format for free.

use chrono::{DateTime, NaiveDate, Utc};
use vantrack_core::Complaint;

use crate::metrics::MetricsSnapshot;
use crate::table::{project, ComplaintTableRow};

/// Trait for exporting reports to different formats
pub trait ReportExporter {
    /// Export to the target format
    fn export(&self, report: &dyn ReportData) -> String;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;

    /// Get the MIME type for this format
    fn mime_type(&self) -> &'static str;
}

/// Trait for data that can be exported
pub trait ReportData {
    /// Get the report title
    fn title(&self) -> &str;

    /// Get column headers
    fn headers(&self) -> Vec<String>;

    /// Get data rows
    fn rows(&self) -> Vec<Vec<String>>;

    /// Get summary statistics as key-value pairs
    fn summary(&self) -> Vec<(String, String)>;
}

// ============================================================================
// CSV Exporter
// ============================================================================

/// CSV format exporter
pub struct CsvExporter {
    delimiter: char,
    include_header: bool,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.include_header = false;
        self
    }

    fn escape_field(&self, field: &str) -> String {
        if field.contains(self.delimiter) || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

impl ReportExporter for CsvExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let mut output = String::new();

        if self.include_header {
            let headers: Vec<String> = report
                .headers()
                .iter()
                .map(|h| self.escape_field(h))
                .collect();
            output.push_str(&headers.join(&self.delimiter.to_string()));
            output.push('\n');
        }

        for row in report.rows() {
            let escaped: Vec<String> = row
                .iter()
                .map(|field| self.escape_field(field))
                .collect();
            output.push_str(&escaped.join(&self.delimiter.to_string()));
            output.push('\n');
        }

        output
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn mime_type(&self) -> &'static str {
        "text/csv"
    }
}

// ============================================================================
// JSON Exporter
// ============================================================================

/// JSON format exporter
pub struct JsonExporter {
    pretty: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

impl ReportExporter for JsonExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let headers = report.headers();

        let json_rows: Vec<serde_json::Value> = report
            .rows()
            .iter()
            .map(|row| {
                let mut obj = serde_json::Map::new();
                for (i, header) in headers.iter().enumerate() {
                    let value = row.get(i).cloned().unwrap_or_default();
                    obj.insert(header.clone(), serde_json::Value::String(value));
                }
                serde_json::Value::Object(obj)
            })
            .collect();

        let summary_obj: serde_json::Map<String, serde_json::Value> = report
            .summary()
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();

        let output = serde_json::json!({
            "title": report.title(),
            "summary": summary_obj,
            "data": json_rows,
        });

        if self.pretty {
            serde_json::to_string_pretty(&output).unwrap_or_default()
        } else {
            serde_json::to_string(&output).unwrap_or_default()
        }
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }
}

// ============================================================================
// Complaint Report Data
// ============================================================================

/// A filtered complaint set plus its metrics, ready for export
#[derive(Debug, Clone)]
pub struct ComplaintReport {
    pub title: String,
    pub rows: Vec<ComplaintTableRow>,
    pub snapshot: MetricsSnapshot,
    pub generated_at: DateTime<Utc>,
}

impl ComplaintReport {
    /// Build a report over a complaint set; `today` anchors the
    /// resolved-today metric
    pub fn from_complaints(title: &str, complaints: &[Complaint], today: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            rows: project(complaints),
            snapshot: MetricsSnapshot::generate(complaints, today),
            generated_at: Utc::now(),
        }
    }
}

impl ReportData for ComplaintReport {
    fn title(&self) -> &str {
        &self.title
    }

    fn headers(&self) -> Vec<String> {
        vec![
            "ID".to_string(),
            "Vehicle".to_string(),
            "Occurred At".to_string(),
            "Category".to_string(),
            "Status".to_string(),
            "Response".to_string(),
            "Attachments".to_string(),
            "Reaction".to_string(),
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.vehicle.to_string(),
                    r.occurred_at.to_rfc3339(),
                    r.category.clone(),
                    r.status.clone(),
                    r.response.clone(),
                    r.attachment_count.to_string(),
                    r.reaction.clone(),
                ]
            })
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Total".to_string(), self.snapshot.total.to_string()),
            ("Open".to_string(), self.snapshot.open_count.to_string()),
            (
                "Resolved Today".to_string(),
                self.snapshot.resolved_today.to_string(),
            ),
            (
                "Avg Resolution Hours".to_string(),
                self.snapshot
                    .average_resolution_hours
                    .map(|h| format!("{:.1}", h))
                    .unwrap_or_else(|| "n/a".to_string()),
            ),
            ("Generated At".to_string(), self.generated_at.to_rfc3339()),
        ]
    }
}
