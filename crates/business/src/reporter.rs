//! Reporter operations - complaint intake
//!
//! ReporterService files new complaints. The draft is validated at
//! construction; this service only checks the actor's role and hands the
//! draft to the repository.

use vantrack_core::{Complaint, ComplaintDraft, Identity};
use vantrack_persistence::ComplaintRepo;

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;

/// Reporter Service - files complaints
pub struct ReporterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReporterService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a new complaint.
    ///
    /// The returned record has status Open, store-assigned id, and
    /// `created_at == updated_at`.
    pub async fn submit(
        &self,
        actor: &Identity,
        draft: ComplaintDraft,
    ) -> BusinessResult<Complaint> {
        if !actor.role.can_submit() {
            return Err(BusinessError::not_permitted(actor.role, "submit").into());
        }

        let complaint = ComplaintRepo::insert(self.ctx.pool(), &draft)
            .await
            .map_err(BusinessError::Persistence)?;

        tracing::info!(
            complaint_id = complaint.id,
            vehicle = complaint.vehicle_number,
            category = %complaint.category,
            reporter = %actor.username,
            "complaint filed"
        );
        Ok(complaint)
    }
}
