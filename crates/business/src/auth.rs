//! Credential store - registration and verification
//!
//! Secrets are digested with SHA-256 at the boundary; only digests are
//! persisted and compared (digest against digest, byte for byte). Raw
//! secrets never reach the persistence layer, the logs, or a return value.

use sha2::{Digest, Sha256};
use vantrack_core::{Identity, Role};
use vantrack_persistence::IdentityRepo;

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;

/// Credential Service - identity registration and verification
pub struct CredentialService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CredentialService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One-way digest of a presented secret, hex-encoded
    fn digest(secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Register a new identity.
    ///
    /// Fails with DuplicateIdentity when the username is already taken;
    /// the existing identity is left unchanged.
    pub async fn register(
        &self,
        username: &str,
        secret: &str,
        role: Role,
    ) -> BusinessResult<Identity> {
        let username = username.trim();
        if username.is_empty() {
            return Err(BusinessError::Validation("username must not be empty".to_string()).into());
        }
        if secret.is_empty() {
            return Err(BusinessError::Validation("secret must not be empty".to_string()).into());
        }

        if IdentityRepo::get_by_username(self.ctx.pool(), username)
            .await
            .map_err(BusinessError::Persistence)?
            .is_some()
        {
            return Err(BusinessError::DuplicateIdentity(username.to_string()).into());
        }

        let row = IdentityRepo::insert(self.ctx.pool(), username, &Self::digest(secret), role)
            .await
            .map_err(BusinessError::Persistence)?;

        tracing::info!(username, role = %role, "identity registered");
        Ok(Identity::try_from(row).map_err(BusinessError::Persistence)?)
    }

    /// Verify a presented credential.
    ///
    /// Exact username lookup, then digest comparison. Returns the identity
    /// (including role) on match; AuthenticationFailed otherwise. A missing
    /// user and a wrong secret are indistinguishable to the caller.
    pub async fn verify(&self, username: &str, secret: &str) -> BusinessResult<Identity> {
        let username = username.trim();

        let row = IdentityRepo::get_by_username(self.ctx.pool(), username)
            .await
            .map_err(BusinessError::Persistence)?;

        match row {
            Some(row) if row.credential_hash == Self::digest(secret) => {
                tracing::info!(username, "authentication succeeded");
                Ok(Identity::try_from(row).map_err(BusinessError::Persistence)?)
            }
            _ => {
                tracing::warn!(username, "authentication failed");
                Err(BusinessError::AuthenticationFailed(username.to_string()).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantrack_persistence::{create_pool, create_schema};

    async fn test_ctx() -> ServiceContext {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        create_schema(&pool).await.unwrap();
        ServiceContext::from_pool(pool)
    }

    #[tokio::test]
    async fn test_register_then_verify() {
        let ctx = test_ctx().await;
        let auth = CredentialService::new(&ctx);

        let ann = auth.register("ann", "pw123", Role::Operator).await.unwrap();
        assert_eq!(ann.username, "ann");
        assert_eq!(ann.role, Role::Operator);

        let verified = auth.verify("ann", "pw123").await.unwrap();
        assert_eq!(verified.role, Role::Operator);

        let err = auth.verify("ann", "wrong").await.unwrap_err();
        let err = err.downcast_ref::<BusinessError>().unwrap();
        assert!(matches!(err, BusinessError::AuthenticationFailed(_)));
    }

    #[tokio::test]
    async fn test_verify_unknown_user() {
        let ctx = test_ctx().await;
        let auth = CredentialService::new(&ctx);

        let err = auth.verify("ghost", "pw").await.unwrap_err();
        let err = err.downcast_ref::<BusinessError>().unwrap();
        assert!(matches!(err, BusinessError::AuthenticationFailed(_)));
    }

    #[tokio::test]
    async fn test_duplicate_register_leaves_first_unchanged() {
        let ctx = test_ctx().await;
        let auth = CredentialService::new(&ctx);

        auth.register("ann", "pw123", Role::Operator).await.unwrap();

        let err = auth
            .register("ann", "other", Role::Reviewer)
            .await
            .unwrap_err();
        let err = err.downcast_ref::<BusinessError>().unwrap();
        assert!(matches!(err, BusinessError::DuplicateIdentity(_)));

        // Original credential and role still hold
        let verified = auth.verify("ann", "pw123").await.unwrap();
        assert_eq!(verified.role, Role::Operator);
    }

    #[tokio::test]
    async fn test_register_trims_username() {
        let ctx = test_ctx().await;
        let auth = CredentialService::new(&ctx);

        auth.register("  bea  ", "pw", Role::Reporter).await.unwrap();
        let verified = auth.verify("bea", "pw").await.unwrap();
        assert_eq!(verified.username, "bea");
    }

    #[tokio::test]
    async fn test_register_rejects_empty_fields() {
        let ctx = test_ctx().await;
        let auth = CredentialService::new(&ctx);

        assert!(auth.register("   ", "pw", Role::Reporter).await.is_err());
        assert!(auth.register("cam", "", Role::Reporter).await.is_err());
    }
}
