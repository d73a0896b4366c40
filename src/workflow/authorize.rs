//! Authorization rules for acting on workflow steps.
//!
//! One resolver replaces the admin/regular-user branches the UI handlers
//! used to carry: callers branch on the returned decision, never on role
//! checks of their own. The principal is an explicit parameter throughout.

use crate::types::{DocumentWorkflow, PendingApproval, Principal, StepStatus, WorkflowStep};

/// Outcome of resolving a principal against a workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    /// The principal may act on exactly this step
    Allowed { step_id: String },
    /// The principal may not act, and why
    Denied(DenyReason),
}

/// Why a principal may not act on any step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The current step is missing or not awaiting a decision
    NoActionableStep,
    /// The backend's assignment records do not name this principal for the
    /// current step
    NotAssigned,
}

impl DenyReason {
    pub fn message(self) -> &'static str {
        match self {
            DenyReason::NoActionableStep => "no step is awaiting action",
            DenyReason::NotAssigned => "principal is not assigned to the current step",
        }
    }
}

/// All steps the principal may act on.
///
/// Administrators may act on any `pending`/`in_progress` step regardless of
/// chain position (the operational-unblocking override). Everyone else gets
/// at most the current step, and only when the backend's own assignment
/// records confirm it.
pub fn actionable_steps<'a>(
    principal: &Principal,
    workflow: &'a DocumentWorkflow,
    pending: &[PendingApproval],
) -> Vec<&'a WorkflowStep> {
    if principal.is_admin {
        return workflow
            .steps
            .iter()
            .filter(|s| s.status.is_actionable())
            .collect();
    }

    match resolve(principal, workflow, pending) {
        AuthDecision::Allowed { step_id } => workflow
            .step_by_id(&step_id)
            .map(|s| vec![s])
            .unwrap_or_default(),
        AuthDecision::Denied(_) => Vec::new(),
    }
}

/// Resolve the single step a principal may act on next.
///
/// Non-admin rules: the step at index `current_step - 1` must be
/// `in_progress`, and `pending` (the backend's assignment records) must name
/// that exact `(document_id, step_id)` pair. Position alone never
/// authorizes. Administrators resolve to the current step when actionable,
/// otherwise to the earliest actionable step.
pub fn resolve(
    principal: &Principal,
    workflow: &DocumentWorkflow,
    pending: &[PendingApproval],
) -> AuthDecision {
    if principal.is_admin {
        let step = workflow
            .current_step_entry()
            .filter(|s| s.status.is_actionable())
            .or_else(|| workflow.steps.iter().find(|s| s.status.is_actionable()));
        return match step {
            Some(step) => AuthDecision::Allowed {
                step_id: step.id.clone(),
            },
            None => AuthDecision::Denied(DenyReason::NoActionableStep),
        };
    }

    let step = match workflow.current_step_entry() {
        Some(step) if step.status == StepStatus::InProgress => step,
        _ => return AuthDecision::Denied(DenyReason::NoActionableStep),
    };

    let assigned = pending
        .iter()
        .any(|p| p.document_id == workflow.document_id && p.step_id == step.id);

    if assigned {
        AuthDecision::Allowed {
            step_id: step.id.clone(),
        }
    } else {
        AuthDecision::Denied(DenyReason::NotAssigned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkflowStatus;
    use chrono::Utc;

    fn make_step(id: &str, order: u32, status: StepStatus) -> WorkflowStep {
        WorkflowStep {
            id: id.to_string(),
            order,
            status,
            assigned_to: "reviewer".to_string(),
            assigned_at: None,
            completed_at: None,
            comments: None,
        }
    }

    fn make_workflow(steps: Vec<WorkflowStep>, current_step: u32) -> DocumentWorkflow {
        DocumentWorkflow {
            id: "wf-1".to_string(),
            document_id: "doc-7".to_string(),
            current_step,
            status: WorkflowStatus::UnderReview,
            steps,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_acts_on_any_actionable_step() {
        let workflow = make_workflow(
            vec![
                make_step("s0", 0, StepStatus::Completed),
                make_step("s1", 1, StepStatus::Completed),
                make_step("s2", 2, StepStatus::InProgress),
                make_step("s3", 3, StepStatus::Pending),
            ],
            3,
        );

        let steps = actionable_steps(&Principal::admin("qm"), &workflow, &[]);
        let ids: Vec<&str> = steps.iter().map(|s| s.id.as_str()).collect();
        // Any pending/in_progress step, independent of current_step
        assert_eq!(ids, vec!["s2", "s3"]);
    }

    #[test]
    fn test_admin_resolves_to_current_step() {
        let workflow = make_workflow(
            vec![
                make_step("s0", 0, StepStatus::Completed),
                make_step("s1", 1, StepStatus::InProgress),
                make_step("s2", 2, StepStatus::Pending),
            ],
            2,
        );

        assert_eq!(
            resolve(&Principal::admin("qm"), &workflow, &[]),
            AuthDecision::Allowed {
                step_id: "s1".to_string()
            }
        );
    }

    #[test]
    fn test_admin_denied_on_terminal_chain() {
        let workflow = make_workflow(
            vec![
                make_step("s0", 0, StepStatus::Completed),
                make_step("s1", 1, StepStatus::Completed),
            ],
            2,
        );

        assert_eq!(
            resolve(&Principal::admin("qm"), &workflow, &[]),
            AuthDecision::Denied(DenyReason::NoActionableStep)
        );
    }

    #[test]
    fn test_non_admin_needs_backend_assignment() {
        let workflow = make_workflow(
            vec![
                make_step("s0", 0, StepStatus::Completed),
                make_step("s2", 1, StepStatus::InProgress),
            ],
            2,
        );

        // Assignment names a different step on the same document
        let pending = vec![PendingApproval::new("doc-7", "s3")];
        assert_eq!(
            resolve(&Principal::user("alice"), &workflow, &pending),
            AuthDecision::Denied(DenyReason::NotAssigned)
        );

        // Matching assignment authorizes exactly the current step
        let pending = vec![PendingApproval::new("doc-7", "s2")];
        assert_eq!(
            resolve(&Principal::user("alice"), &workflow, &pending),
            AuthDecision::Allowed {
                step_id: "s2".to_string()
            }
        );
    }

    #[test]
    fn test_non_admin_position_alone_is_not_enough() {
        let workflow = make_workflow(
            vec![
                make_step("s0", 0, StepStatus::Completed),
                make_step("s1", 1, StepStatus::InProgress),
            ],
            2,
        );

        // Right position, no assignment record at all
        assert_eq!(
            resolve(&Principal::user("alice"), &workflow, &[]),
            AuthDecision::Denied(DenyReason::NotAssigned)
        );
    }

    #[test]
    fn test_non_admin_denied_when_step_not_in_progress() {
        let workflow = make_workflow(
            vec![
                make_step("s0", 0, StepStatus::Completed),
                make_step("s1", 1, StepStatus::Pending),
            ],
            2,
        );

        let pending = vec![PendingApproval::new("doc-7", "s1")];
        assert_eq!(
            resolve(&Principal::user("alice"), &workflow, &pending),
            AuthDecision::Denied(DenyReason::NoActionableStep)
        );
    }

    #[test]
    fn test_non_admin_gets_at_most_one_step() {
        let workflow = make_workflow(
            vec![
                make_step("s0", 0, StepStatus::Completed),
                make_step("s1", 1, StepStatus::InProgress),
                make_step("s2", 2, StepStatus::Pending),
            ],
            2,
        );

        let pending = vec![
            PendingApproval::new("doc-7", "s1"),
            PendingApproval::new("doc-7", "s2"),
        ];
        let steps = actionable_steps(&Principal::user("alice"), &workflow, &pending);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].id, "s1");
    }

    #[test]
    fn test_assignment_for_other_document_ignored() {
        let workflow = make_workflow(
            vec![
                make_step("s0", 0, StepStatus::Completed),
                make_step("s1", 1, StepStatus::InProgress),
            ],
            2,
        );

        let pending = vec![PendingApproval::new("doc-8", "s1")];
        assert_eq!(
            resolve(&Principal::user("alice"), &workflow, &pending),
            AuthDecision::Denied(DenyReason::NotAssigned)
        );
    }
}
