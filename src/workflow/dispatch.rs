//! Action dispatch for approval workflow steps.
//!
//! The dispatcher reloads before acting, resolves authorization, applies
//! exactly one step mutation through the store, then reloads again and
//! returns the fresh chain. It never mutates a local copy: the backend is
//! the sole source of truth and the only serializer of racing callers.

use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::api::StoreError;
use crate::types::{DocumentWorkflow, Principal};
use crate::workflow::authorize::{self, AuthDecision};
use crate::workflow::store::WorkflowStore;

/// A decision recorded on a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Approve,
    Reject,
}

impl StepAction {
    pub fn as_str(self) -> &'static str {
        match self {
            StepAction::Approve => "approve",
            StepAction::Reject => "reject",
        }
    }
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orchestrates approve/reject actions against the workflow store
pub struct ActionDispatcher {
    store: Arc<dyn WorkflowStore>,
}

impl ActionDispatcher {
    pub fn new(store: Arc<dyn WorkflowStore>) -> Self {
        Self { store }
    }

    /// Apply one approve/reject action for a principal.
    ///
    /// Administrators may supply `explicit_step_index` (0-based over the
    /// full step list) to target any step awaiting action, bypassing
    /// assignment matching. Everyone else is resolved through the
    /// authorization rules and the backend's pending-approval records; a
    /// denial surfaces as [`StoreError::NoPendingApproval`].
    ///
    /// Exactly one step mutation per call; the returned workflow is
    /// reloaded from the backend after the mutation.
    #[instrument(skip(self, principal, comments), fields(principal = %principal.name, request_id = %Uuid::new_v4()))]
    pub async fn perform(
        &self,
        principal: &Principal,
        document_id: &str,
        action: StepAction,
        comments: &str,
        explicit_step_index: Option<usize>,
    ) -> Result<DocumentWorkflow, StoreError> {
        // Stale chains mis-resolve; always act on a fresh load
        let workflow = self.store.load(document_id).await?;

        let step_id = match explicit_step_index {
            Some(index) if principal.is_admin => {
                let step = workflow.steps.get(index).ok_or_else(|| {
                    StoreError::invalid_step(
                        format!("#{index}"),
                        format!("workflow has {} steps", workflow.steps.len()),
                    )
                })?;
                if !step.status.is_actionable() {
                    return Err(StoreError::invalid_step(
                        step.id.as_str(),
                        format!("step is {}", step.status),
                    ));
                }
                step.id.clone()
            }
            _ => {
                let pending = self.store.list_pending_for(principal).await?;
                match authorize::resolve(principal, &workflow, &pending) {
                    AuthDecision::Allowed { step_id } => step_id,
                    AuthDecision::Denied(reason) => {
                        warn!(reason = reason.message(), "Denied {action} action");
                        return Err(StoreError::no_pending_approval(document_id));
                    }
                }
            }
        };

        match action {
            StepAction::Approve => {
                self.store
                    .approve_step(document_id, &step_id, comments)
                    .await?;
            }
            StepAction::Reject => {
                self.store
                    .reject_step(document_id, &step_id, comments)
                    .await?;
            }
        }

        info!(step_id = %step_id, "Applied {action} action");
        self.store.load(document_id).await
    }

    /// The explicit "request changes" transition.
    ///
    /// Resets the *first* approval step back to in_progress and
    /// `current_step` to 1, restarting the chain from the beginning
    /// regardless of which step raised the request. Allowed for
    /// administrators and for principals the backend lists as assigned on
    /// this document.
    #[instrument(skip(self, principal, comments), fields(principal = %principal.name))]
    pub async fn request_changes(
        &self,
        principal: &Principal,
        document_id: &str,
        comments: &str,
    ) -> Result<DocumentWorkflow, StoreError> {
        if !principal.is_admin {
            let pending = self.store.list_pending_for(principal).await?;
            let assigned = pending.iter().any(|p| p.document_id == document_id);
            if !assigned {
                warn!("Denied request-changes: principal has no assignment here");
                return Err(StoreError::no_pending_approval(document_id));
            }
        }

        self.store.request_changes(document_id, comments).await?;
        info!("Workflow reset to first approval step");
        self.store.load(document_id).await
    }
}
