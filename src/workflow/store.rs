//! Workflow store abstraction over the approval backend.
//!
//! All workflow state lives backend-side. The store performs no caching and
//! no optimistic local mutation: every `load` reflects what the backend
//! holds right now, which is why callers reload after every mutation instead
//! of computing the next state themselves.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::api::{ApprovalApi, StoreError};
use crate::types::{DocumentWorkflow, PendingApproval, Principal};

/// Backend operations the workflow engine depends on
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Fetch the current approval chain for a document
    async fn load(&self, document_id: &str) -> Result<DocumentWorkflow, StoreError>;

    /// Approve a step. Fails with `InvalidStep` unless the step is
    /// pending/in_progress.
    async fn approve_step(
        &self,
        document_id: &str,
        step_id: &str,
        comments: &str,
    ) -> Result<(), StoreError>;

    /// Reject a step; the backend records the comments as the reason
    async fn reject_step(
        &self,
        document_id: &str,
        step_id: &str,
        comments: &str,
    ) -> Result<(), StoreError>;

    /// Reset the chain to its first approval step (restart-from-beginning
    /// semantics, see the dispatcher docs)
    async fn request_changes(&self, document_id: &str, comments: &str) -> Result<(), StoreError>;

    /// The backend's pending assignments for a principal
    async fn list_pending_for(
        &self,
        principal: &Principal,
    ) -> Result<Vec<PendingApproval>, StoreError>;
}

/// HTTP-backed store delegating to [`ApprovalApi`]
pub struct HttpWorkflowStore {
    api: ApprovalApi,
}

impl HttpWorkflowStore {
    pub fn new(api: ApprovalApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl WorkflowStore for HttpWorkflowStore {
    #[instrument(skip(self))]
    async fn load(&self, document_id: &str) -> Result<DocumentWorkflow, StoreError> {
        let workflow = self.api.get_workflow(document_id).await?;
        debug!(
            steps = workflow.steps.len(),
            status = %workflow.status,
            "Loaded workflow"
        );
        Ok(workflow)
    }

    #[instrument(skip(self, comments))]
    async fn approve_step(
        &self,
        document_id: &str,
        step_id: &str,
        comments: &str,
    ) -> Result<(), StoreError> {
        self.api.post_approve(document_id, step_id, comments).await
    }

    #[instrument(skip(self, comments))]
    async fn reject_step(
        &self,
        document_id: &str,
        step_id: &str,
        comments: &str,
    ) -> Result<(), StoreError> {
        self.api.post_reject(document_id, step_id, comments).await
    }

    #[instrument(skip(self, comments))]
    async fn request_changes(&self, document_id: &str, comments: &str) -> Result<(), StoreError> {
        self.api.post_request_changes(document_id, comments).await
    }

    #[instrument(skip(self))]
    async fn list_pending_for(
        &self,
        principal: &Principal,
    ) -> Result<Vec<PendingApproval>, StoreError> {
        self.api.get_pending_approvals(principal).await
    }
}
