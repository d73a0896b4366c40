//! Stage projection: ordered approval steps -> three-stage summary.
//!
//! Pure functions, no backend access, so the projection unit-tests on its
//! own. Only the first and last approval steps plus the overall status feed
//! the computation; intermediate steps never carry stage meaning of their
//! own.

use crate::types::{
    DocumentMeta, DocumentWorkflow, StageEntry, StageSummary, StepStatus, WorkflowStatus,
};

/// Project a workflow chain into the Draft / Reviewed / Approved summary.
///
/// The creation marker (`order == 0`) is excluded before any stage math.
pub fn project(workflow: &DocumentWorkflow, meta: &DocumentMeta) -> StageSummary {
    let approval_steps: Vec<_> = workflow.approval_steps().collect();
    let first = approval_steps.first().copied();
    let last = approval_steps.last().copied();

    let review_completed = first
        .map(|s| s.status == StepStatus::Completed || s.completed_at.is_some())
        .unwrap_or(false);

    let approved_completed = workflow.status == WorkflowStatus::Approved
        || last.map(|s| s.status == StepStatus::Completed).unwrap_or(false);

    let active_index = if approved_completed {
        2
    } else if review_completed {
        1
    } else {
        0
    };

    // Draft is always completed: the document exists
    let draft = StageEntry::completed(
        Some(meta.created_by.clone()),
        Some(meta.created_at),
    );

    let reviewed = match first {
        Some(first) if review_completed => {
            StageEntry::completed(Some(first.assigned_to.clone()), first.completed_at)
        }
        _ if workflow.current_step == 1 => StageEntry::in_progress(),
        _ => StageEntry::pending(),
    };

    let approved = if approved_completed {
        match last {
            Some(last) => StageEntry::completed(
                Some(last.assigned_to.clone()),
                last.completed_at.or(Some(workflow.updated_at)),
            ),
            None => StageEntry::completed(None, Some(workflow.updated_at)),
        }
    } else if approval_steps.iter().any(|s| s.status.is_actionable()) {
        StageEntry::in_progress()
    } else {
        StageEntry::pending()
    };

    StageSummary {
        draft,
        reviewed,
        approved,
        active_index,
    }
}

/// Format the summary for logs and audit text.
/// Returns something like: "Draft > [Reviewed] > Approved"
pub fn format_progress(summary: &StageSummary) -> String {
    StageSummary::STAGE_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i == summary.active_index {
                format!("[{name}]")
            } else {
                (*name).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}
