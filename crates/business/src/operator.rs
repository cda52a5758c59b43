//! Operator operations - the workflow engine
//!
//! Status transitions over {Open, InProgress, Resolved}. No state is
//! terminal: any status may move to any other, including back out of
//! Resolved (reopening is a real requirement, not an oversight) and
//! self-transitions. Entering Resolved stamps `resolved_at`; leaving it
//! never clears the stamp, so the record always carries the most recent
//! resolution time.
//!
//! The transition rule itself is role-blind; this service is the
//! collaborator that maps the actor's role to the permitted operation.

use chrono::Utc;
use vantrack_core::{Complaint, ComplaintStatus, Identity};
use vantrack_persistence::{ComplaintMutation, ComplaintRepo};

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;

/// Operator Service - advances complaint status and records responses
pub struct OperatorService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> OperatorService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Set the workflow status of a complaint.
    ///
    /// Replaces the stored response when `response` is provided, leaves it
    /// otherwise. `resolved_at` is stamped with the current time only when
    /// this call actually transitions into Resolved (a Resolved→Resolved
    /// no-op does not re-stamp). Persistence goes through the repository's
    /// single atomic update.
    pub async fn set_status(
        &self,
        actor: &Identity,
        complaint_id: i64,
        new_status: ComplaintStatus,
        response: Option<String>,
    ) -> BusinessResult<Complaint> {
        if !actor.role.can_manage_status() {
            return Err(BusinessError::not_permitted(actor.role, "set_status").into());
        }

        let current = self.fetch(complaint_id).await?;

        let resolved_at = (new_status == ComplaintStatus::Resolved
            && current.status != ComplaintStatus::Resolved)
            .then(Utc::now);

        let updated = ComplaintRepo::apply_update(
            self.ctx.pool(),
            complaint_id,
            ComplaintMutation::Status {
                status: new_status,
                response,
                resolved_at,
            },
        )
        .await
        .map_err(BusinessError::Persistence)?;

        tracing::info!(
            complaint_id,
            from = %current.status,
            to = %new_status,
            operator = %actor.username,
            "status updated"
        );
        Ok(updated)
    }

    async fn fetch(&self, complaint_id: i64) -> BusinessResult<Complaint> {
        ComplaintRepo::get_by_id(self.ctx.pool(), complaint_id)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    BusinessError::ComplaintNotFound(complaint_id).into()
                } else {
                    anyhow::Error::from(BusinessError::Persistence(e))
                }
            })
    }
}
