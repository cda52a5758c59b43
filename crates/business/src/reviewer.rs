//! Reviewer operations - sentiment reactions
//!
//! A reaction is independent of workflow status: it may be recorded on an
//! open, in-progress, or resolved complaint alike, and only touches the
//! `reaction` field (plus `updated_at`).

use vantrack_core::{Complaint, Identity, Reaction};
use vantrack_persistence::{ComplaintMutation, ComplaintRepo};

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;

/// Reviewer Service - records reactions
pub struct ReviewerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewerService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a reaction on a complaint
    pub async fn set_reaction(
        &self,
        actor: &Identity,
        complaint_id: i64,
        reaction: Reaction,
    ) -> BusinessResult<Complaint> {
        if !actor.role.can_react() {
            return Err(BusinessError::not_permitted(actor.role, "set_reaction").into());
        }

        let updated = ComplaintRepo::apply_update(
            self.ctx.pool(),
            complaint_id,
            ComplaintMutation::Reaction(reaction),
        )
        .await
        .map_err(|e| {
            if e.is_not_found() {
                anyhow::Error::from(BusinessError::ComplaintNotFound(complaint_id))
            } else {
                anyhow::Error::from(BusinessError::Persistence(e))
            }
        })?;

        tracing::info!(
            complaint_id,
            reaction = %reaction,
            reviewer = %actor.username,
            "reaction recorded"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vantrack_core::{Category, ComplaintDraft, ComplaintStatus, Role};
    use vantrack_persistence::{create_pool, create_schema};

    async fn test_ctx() -> ServiceContext {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        create_schema(&pool).await.unwrap();
        ServiceContext::from_pool(pool)
    }

    async fn file_complaint(ctx: &ServiceContext) -> Complaint {
        let draft =
            ComplaintDraft::new(3, Utc::now(), Category::Breakdown, "engine stalled", vec![])
                .unwrap();
        ComplaintRepo::insert(ctx.pool(), &draft).await.unwrap()
    }

    #[tokio::test]
    async fn test_reaction_is_status_independent() {
        let ctx = test_ctx().await;
        let service = ReviewerService::new(&ctx);
        let kim = Identity::new("kim", Role::Reviewer);
        let complaint = file_complaint(&ctx).await;

        // Complaint is still Open; the reaction is accepted anyway
        let updated = service
            .set_reaction(&kim, complaint.id, Reaction::NeedsFollowup)
            .await
            .unwrap();
        assert_eq!(updated.reaction, Some(Reaction::NeedsFollowup));
        assert_eq!(updated.status, ComplaintStatus::Open);
        assert!(updated.resolved_at.is_none());
    }

    #[tokio::test]
    async fn test_reaction_can_be_replaced() {
        let ctx = test_ctx().await;
        let service = ReviewerService::new(&ctx);
        let kim = Identity::new("kim", Role::Reviewer);
        let complaint = file_complaint(&ctx).await;

        service
            .set_reaction(&kim, complaint.id, Reaction::Positive)
            .await
            .unwrap();
        let updated = service
            .set_reaction(&kim, complaint.id, Reaction::Exemplary)
            .await
            .unwrap();
        assert_eq!(updated.reaction, Some(Reaction::Exemplary));
    }

    #[tokio::test]
    async fn test_set_reaction_requires_reviewer_role() {
        let ctx = test_ctx().await;
        let service = ReviewerService::new(&ctx);
        let ann = Identity::new("ann", Role::Operator);
        let complaint = file_complaint(&ctx).await;

        let err = service
            .set_reaction(&ann, complaint.id, Reaction::Positive)
            .await
            .unwrap_err();
        let err = err.downcast_ref::<BusinessError>().unwrap();
        assert!(matches!(err, BusinessError::OperationNotPermitted { .. }));
    }

    #[tokio::test]
    async fn test_set_reaction_unknown_complaint() {
        let ctx = test_ctx().await;
        let service = ReviewerService::new(&ctx);
        let kim = Identity::new("kim", Role::Reviewer);

        let err = service
            .set_reaction(&kim, 404, Reaction::Positive)
            .await
            .unwrap_err();
        let err = err.downcast_ref::<BusinessError>().unwrap();
        assert!(matches!(err, BusinessError::ComplaintNotFound(404)));
    }
}
