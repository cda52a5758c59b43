//! Identity registration and login commands

use anyhow::Result;
use std::path::Path;
use vantrack_business::{CredentialService, ServiceContext};

use crate::db;
use crate::RoleArg;

/// Register a new identity
pub async fn register(db_path: &Path, username: &str, secret: &str, role: RoleArg) -> Result<()> {
    let db = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&db);

    let identity = CredentialService::new(&ctx)
        .register(username, secret, role.to_core_type())
        .await?;

    println!("✅ Registered identity:");
    println!("   Username: {}", identity.username);
    println!("   Role:     {}", identity.role);

    db.close().await;
    Ok(())
}

/// Verify a credential and show the assigned role
pub async fn login(db_path: &Path, username: &str, secret: &str) -> Result<()> {
    let db = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&db);

    let identity = CredentialService::new(&ctx).verify(username, secret).await?;

    println!("✅ Welcome {}!", identity.username);
    println!("   Role: {}", identity.role);

    db.close().await;
    Ok(())
}
