//! Approval chain types for controlled documents.
//!
//! A document entering review gets one linear chain of [`WorkflowStep`]s,
//! ordered by `order` ascending. The chain length is backend-defined; nothing
//! here assumes a fixed number of steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a single approval step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Waiting for earlier steps in the chain
    Pending,
    /// Currently awaiting a decision from the assigned principal
    InProgress,
    /// Approved
    Completed,
    /// Rejected (terminal for the whole chain)
    Rejected,
}

impl StepStatus {
    /// Check if a decision can still be recorded on this step
    pub fn is_actionable(self) -> bool {
        matches!(self, StepStatus::Pending | StepStatus::InProgress)
    }

    /// Check if this step has reached a terminal state
    pub fn is_terminal(self) -> bool {
        matches!(self, StepStatus::Completed | StepStatus::Rejected)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Pending => write!(f, "pending"),
            StepStatus::InProgress => write!(f, "in_progress"),
            StepStatus::Completed => write!(f, "completed"),
            StepStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Overall workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// Document authored, review not started
    Draft,
    /// Approval chain in progress
    UnderReview,
    /// Last approval step completed
    Approved,
    /// Some step was rejected
    Rejected,
}

impl WorkflowStatus {
    /// Check if the workflow has reached a terminal state
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkflowStatus::Approved | WorkflowStatus::Rejected)
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowStatus::Draft => write!(f, "draft"),
            WorkflowStatus::UnderReview => write!(f, "under_review"),
            WorkflowStatus::Approved => write!(f, "approved"),
            WorkflowStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// One unit of the approval chain requiring a decision from an assigned
/// principal.
///
/// `order == 0` marks the synthetic "document created" step: always
/// `completed`, excluded from all approval-stage computations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Opaque identifier, stable across reloads
    pub id: String,
    /// Position in the chain; 0 is the creation marker
    pub order: u32,
    /// Current step status
    pub status: StepStatus,
    /// Principal responsible for the step
    pub assigned_to: String,
    /// When the step was assigned
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
    /// When the step was acted on
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Free text recorded when the step was acted on
    #[serde(default)]
    pub comments: Option<String>,
}

impl WorkflowStep {
    /// Check if this is the synthetic "document created" marker
    pub fn is_creation_marker(&self) -> bool {
        self.order == 0
    }
}

/// The full approval chain for one document.
///
/// The backend owns this state; clients reload it rather than mutating a
/// local copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentWorkflow {
    /// Workflow identity
    pub id: String,
    /// Owning document
    pub document_id: String,
    /// 1-based index over the full step list (creation step included) of the
    /// step currently awaiting action. When the workflow is terminal this
    /// indexes the last step.
    pub current_step: u32,
    /// Overall workflow status
    pub status: WorkflowStatus,
    /// Steps ordered by `order` ascending
    pub steps: Vec<WorkflowStep>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentWorkflow {
    /// Iterate the approval steps, excluding the creation marker
    pub fn approval_steps(&self) -> impl Iterator<Item = &WorkflowStep> {
        self.steps.iter().filter(|s| s.order > 0)
    }

    /// Look up a step by id
    pub fn step_by_id(&self, step_id: &str) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    /// The step `current_step` points at, if the index is in range
    pub fn current_step_entry(&self) -> Option<&WorkflowStep> {
        if self.current_step == 0 {
            return None;
        }
        self.steps.get(self.current_step as usize - 1)
    }
}
