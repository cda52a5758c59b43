//! Export command - filtered complaint sets as CSV or JSON

use anyhow::{Context, Result};
use chrono::Utc;
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use vantrack_persistence::ComplaintRepo;
use vantrack_reports::{ComplaintReport, CsvExporter, JsonExporter, ReportExporter};

use crate::commands::complaint::build_filter;
use crate::db;
use crate::StatusArg;

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}

/// Export complaints matching a filter.
///
/// Writes to `out` when given, otherwise to stdout.
#[allow(clippy::too_many_arguments)]
pub async fn run(
    db_path: &Path,
    format: FormatArg,
    out: Option<PathBuf>,
    vehicle: Option<i64>,
    category_contains: Option<String>,
    status: Option<StatusArg>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let db = db::connect(db_path).await?;
    let filter = build_filter(vehicle, category_contains, status, from, to)?;

    let complaints = ComplaintRepo::list(db.pool(), &filter).await?;
    let report =
        ComplaintReport::from_complaints("Complaint Export", &complaints, Utc::now().date_naive());

    let exporter: Box<dyn ReportExporter> = match format {
        FormatArg::Csv => Box::new(CsvExporter::new()),
        FormatArg::Json => Box::new(JsonExporter::new()),
    };
    let rendered = exporter.export(&report);

    match out {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write export to {:?}", path))?;
            println!(
                "✅ Exported {} complaints to {:?} ({})",
                complaints.len(),
                path,
                exporter.extension()
            );
        }
        None => print!("{}", rendered),
    }

    db.close().await;
    Ok(())
}
