//! Core domain types for the approval workflow engine.

pub mod document;
pub mod principal;
pub mod stage;
pub mod workflow;

pub use document::DocumentMeta;
pub use principal::{PendingApproval, Principal};
pub use stage::{StageEntry, StageState, StageSummary};
pub use workflow::{DocumentWorkflow, StepStatus, WorkflowStatus, WorkflowStep};
