use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::internal::AccessError;
use crate::errors::InternalError;
use crate::providers::access_policy;
use crate::stores::SubmissionStore;
use crate::types::internal::context::RequestContext;
use crate::types::internal::submission::{Submission, SubmissionKind};

/// Create, list, fetch and delete accountability or feedback records
///
/// One coordinator type serves both kinds; the store decides the table.
pub struct SubmissionCoordinator {
    store: Arc<dyn SubmissionStore>,
}

impl SubmissionCoordinator {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store }
    }

    pub fn accountability(app_data: Arc<AppData>) -> Self {
        Self::new(app_data.accountability_store.clone())
    }

    pub fn feedback(app_data: Arc<AppData>) -> Self {
        Self::new(app_data.feedback_store.clone())
    }

    pub fn kind(&self) -> SubmissionKind {
        self.store.kind()
    }

    /// Record an entry authored by the caller
    pub async fn create(
        &self,
        ctx: &RequestContext,
        content: String,
    ) -> Result<Submission, InternalError> {
        let requester = ctx.requester()?;
        if content.trim().is_empty() {
            return Err(InternalError::validation("content", "Content is required"));
        }

        let created = self.store.insert(requester.id, content).await?;
        tracing::info!(
            request_id = %ctx.request_id,
            "User {} submitted {} {}",
            requester.id,
            self.kind(),
            created.id
        );
        Ok(created)
    }

    /// Every record the caller may see, newest first
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Submission>, InternalError> {
        let requester = ctx.requester()?;
        let scope = access_policy::submission_scope(requester);
        self.store.list(&scope).await
    }

    /// Missing and hidden records are both reported as not found
    pub async fn get(&self, ctx: &RequestContext, id: i32) -> Result<Submission, InternalError> {
        let requester = ctx.requester()?;
        let found = self.store.find_with_owner(id).await?;

        access_policy::authorize_submission_view(
            requester,
            self.kind(),
            found.as_ref().map(|(_, owner)| owner),
        )?;

        found
            .map(|(submission, _)| submission)
            .ok_or(InternalError::Access(AccessError::SubmissionNotVisible { kind: self.kind() }))
    }

    /// Delete a record, returning it
    pub async fn delete(&self, ctx: &RequestContext, id: i32) -> Result<Submission, InternalError> {
        let requester = ctx.requester()?;
        let found = self.store.find_with_owner(id).await?;

        if let Err(denied) = access_policy::authorize_submission_delete(
            requester,
            self.kind(),
            found.as_ref().map(|(_, owner)| owner),
        ) {
            tracing::debug!(
                request_id = %ctx.request_id,
                "User {} denied deleting {} {}",
                requester.id,
                self.kind(),
                id
            );
            return Err(denied.into());
        }

        let (submission, _) = found.ok_or(InternalError::Access(
            AccessError::SubmissionDeleteDenied { kind: self.kind() },
        ))?;
        self.store.delete(id).await?;
        tracing::info!(request_id = %ctx.request_id, "User {} deleted {} {}", requester.id, self.kind(), id);

        Ok(submission)
    }
}
