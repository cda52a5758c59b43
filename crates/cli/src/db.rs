//! Database initialization and status

use anyhow::{Context, Result};
use std::path::Path;
use vantrack_persistence::{ComplaintRepo, Database, IdentityRepo};

/// Initialize the database with the schema
pub async fn init_database(db_path: &Path, force: bool) -> Result<()> {
    if force && db_path.exists() {
        std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        println!("🗑️  Removed existing database");
    }

    let db_url = format!("sqlite:{}", db_path.display());
    let db = Database::init(&db_url)
        .await
        .context("Failed to initialize database")?;

    db.close().await;
    Ok(())
}

/// Show database status
pub async fn show_status(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        println!("❌ Database not found at {:?}", db_path);
        println!("   Run 'vantrack init' to create the database");
        return Ok(());
    }

    let db = connect(db_path).await?;

    println!("📊 Database Status");
    println!("   Path: {:?}", db_path);
    println!();

    let identity_count = IdentityRepo::count(db.pool()).await.unwrap_or(0);
    let complaint_count = ComplaintRepo::count(db.pool()).await.unwrap_or(0);

    println!("   Identities: {}", identity_count);
    println!("   Complaints: {}", complaint_count);

    db.close().await;
    Ok(())
}

/// Open the database through the facade
pub async fn connect(db_path: &Path) -> Result<Database> {
    let db_url = format!("sqlite:{}", db_path.display());
    tracing::debug!(%db_url, "opening database");
    Database::new(&db_url)
        .await
        .context("Failed to connect to database. Run 'vantrack init' first.")
}
