//! Complaint commands - submit, list, status updates, reactions

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::path::Path;
use vantrack_core::{ComplaintDraft, ComplaintFilter, Identity};
use vantrack_business::{
    CredentialService, OperatorService, ReporterService, ReviewerService, ServiceContext,
};
use vantrack_persistence::ComplaintRepo;
use vantrack_reports::{project, ComplaintTableRow};

use crate::db;
use crate::{CategoryArg, ReactionArg, StatusArg};

/// Authenticate the acting user before a workflow-mutating operation
async fn authenticate(ctx: &ServiceContext, user: &str, secret: &str) -> Result<Identity> {
    CredentialService::new(ctx).verify(user, secret).await
}

/// Parse "YYYY-MM-DD HH:MM" into a UTC timestamp
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .with_context(|| format!("Invalid datetime '{}', expected YYYY-MM-DD HH:MM", s))?;
    Ok(naive.and_utc())
}

/// Parse "YYYY-MM-DD" into a date
fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Build a filter from the optional CLI arguments
pub(crate) fn build_filter(
    vehicle: Option<i64>,
    category_contains: Option<String>,
    status: Option<StatusArg>,
    from: Option<String>,
    to: Option<String>,
) -> Result<ComplaintFilter> {
    let mut filter = ComplaintFilter::any();
    if let Some(vehicle) = vehicle {
        filter = filter.with_vehicle(vehicle);
    }
    if let Some(fragment) = category_contains {
        filter = filter.with_category_contains(&fragment);
    }
    if let Some(status) = status {
        filter = filter.with_status(status.to_core_type());
    }
    if let Some(from) = from {
        filter = filter.with_occurred_from(parse_date(&from)?);
    }
    if let Some(to) = to {
        filter = filter.with_occurred_to(parse_date(&to)?);
    }
    Ok(filter)
}

/// Print complaint rows as an aligned table
pub(crate) fn print_table(rows: &[ComplaintTableRow]) {
    if rows.is_empty() {
        println!("   (no complaints match)");
        return;
    }
    println!(
        "   {:>4}  {:>7}  {:<16}  {:<17}  {:<11}  {:>5}  {:<14}  {}",
        "ID", "Vehicle", "Date/Time", "Category", "Status", "Files", "Reaction", "Response"
    );
    for row in rows {
        println!(
            "   {:>4}  {:>7}  {:<16}  {:<17}  {:<11}  {:>5}  {:<14}  {}",
            row.id,
            row.vehicle,
            row.occurred_at.format("%d %b %Y %H:%M"),
            row.category,
            row.status,
            row.attachment_count,
            row.reaction,
            row.response,
        );
    }
}

/// File a new complaint
#[allow(clippy::too_many_arguments)]
pub async fn submit(
    db_path: &Path,
    user: &str,
    secret: &str,
    vehicle: i64,
    category: CategoryArg,
    description: &str,
    occurred_at: Option<&str>,
    attachments: Vec<String>,
) -> Result<()> {
    let db = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&db);

    let actor = authenticate(&ctx, user, secret).await?;
    let occurred = match occurred_at {
        Some(s) => parse_datetime(s)?,
        None => Utc::now(),
    };

    let draft = ComplaintDraft::new(
        vehicle,
        occurred,
        category.to_core_type(),
        description,
        attachments,
    )?;

    let complaint = ReporterService::new(&ctx).submit(&actor, draft).await?;

    println!("✅ Complaint filed:");
    println!("   ID:       {}", complaint.id);
    println!("   Vehicle:  {}", complaint.vehicle_number);
    println!("   Category: {}", complaint.category);
    println!("   Status:   {}", complaint.status);
    if complaint.attachment_count() > 0 {
        println!("   Files:    {}", complaint.attachment_count());
    }

    db.close().await;
    Ok(())
}

/// List complaints matching a filter, newest incident first
pub async fn list(
    db_path: &Path,
    vehicle: Option<i64>,
    category_contains: Option<String>,
    status: Option<StatusArg>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let db = db::connect(db_path).await?;
    let filter = build_filter(vehicle, category_contains, status, from, to)?;

    let complaints = ComplaintRepo::list(db.pool(), &filter).await?;

    println!("📋 Complaints ({})", complaints.len());
    print_table(&project(&complaints));

    db.close().await;
    Ok(())
}

/// Update the workflow status of a complaint
pub async fn set_status(
    db_path: &Path,
    user: &str,
    secret: &str,
    id: i64,
    status: StatusArg,
    response: Option<String>,
) -> Result<()> {
    let db = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&db);

    let actor = authenticate(&ctx, user, secret).await?;
    let complaint = OperatorService::new(&ctx)
        .set_status(&actor, id, status.to_core_type(), response)
        .await?;

    println!("✅ Complaint {} updated:", complaint.id);
    println!("   Status:   {}", complaint.status);
    if let Some(response) = &complaint.response {
        println!("   Response: {}", response);
    }
    if let Some(resolved_at) = complaint.resolved_at {
        println!("   Resolved: {}", resolved_at.format("%d %b %Y %H:%M"));
    }

    db.close().await;
    Ok(())
}

/// Record a reviewer reaction on a complaint
pub async fn react(
    db_path: &Path,
    user: &str,
    secret: &str,
    id: i64,
    reaction: ReactionArg,
) -> Result<()> {
    let db = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&db);

    let actor = authenticate(&ctx, user, secret).await?;
    let complaint = ReviewerService::new(&ctx)
        .set_reaction(&actor, id, reaction.to_core_type())
        .await?;

    println!(
        "✅ Reaction recorded on complaint {}: {}",
        complaint.id,
        complaint
            .reaction
            .map(|r| r.to_string())
            .unwrap_or_default()
    );

    db.close().await;
    Ok(())
}
