//! Docflow - document approval workflow engine
//!
//! Loads a controlled document's approval chain from the approval backend,
//! projects it into a three-stage progress summary, resolves which steps a
//! principal may act on, and dispatches approve/reject actions.
//!
//! Document storage, versioning, templates, and the rest of the
//! quality-management suite are external collaborators reached only through
//! the backend interfaces in [`api`].

pub mod api;
pub mod config;
pub mod logging;
pub mod types;
pub mod workflow;

pub use config::Config;
pub use types::{
    DocumentMeta, DocumentWorkflow, PendingApproval, Principal, StageState, StageSummary,
    StepStatus, WorkflowStatus, WorkflowStep,
};
pub use workflow::dispatch::{ActionDispatcher, StepAction};
pub use workflow::store::{HttpWorkflowStore, WorkflowStore};
