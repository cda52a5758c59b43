//! Oversight dashboard - metrics snapshot over a filtered complaint set

use anyhow::Result;
use chrono::Utc;
use std::path::Path;
use vantrack_core::ComplaintStatus;
use vantrack_persistence::ComplaintRepo;
use vantrack_reports::{project, status_breakdown, MetricsSnapshot};

use crate::commands::complaint::{build_filter, print_table};
use crate::db;
use crate::StatusArg;

/// Render metrics, per-status tallies, and the matching complaint table
pub async fn run(
    db_path: &Path,
    vehicle: Option<i64>,
    status: Option<StatusArg>,
    from: Option<String>,
    to: Option<String>,
    json: bool,
) -> Result<()> {
    let db = db::connect(db_path).await?;
    let filter = build_filter(vehicle, None, status, from, to)?;

    let complaints = ComplaintRepo::list(db.pool(), &filter).await?;
    let snapshot = MetricsSnapshot::generate(&complaints, Utc::now().date_naive());

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        db.close().await;
        return Ok(());
    }

    println!("📊 Complaint Dashboard");
    println!();
    println!("   Total:          {}", snapshot.total);
    println!("   Open:           {}", snapshot.open_count);
    println!("   Resolved today: {}", snapshot.resolved_today);
    match snapshot.average_resolution_hours {
        Some(hours) => println!("   Avg resolution: {:.1}h", hours),
        None => println!("   Avg resolution: n/a"),
    }

    let breakdown = status_breakdown(&complaints);
    println!();
    println!("   By status:");
    for status in [
        ComplaintStatus::Open,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
    ] {
        let count = breakdown.get(&status).copied().unwrap_or(0);
        println!("     {:<12} {}", status.as_str(), count);
    }

    println!();
    print_table(&project(&complaints));

    db.close().await;
    Ok(())
}
