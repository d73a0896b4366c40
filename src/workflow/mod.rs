//! Approval workflow engine.
//!
//! `store` talks to the backend, `stages` projects the chain into the
//! three-stage summary, `authorize` decides who may act, and `dispatch`
//! ties them together for approve/reject actions.

pub mod authorize;
pub mod dispatch;
pub mod stages;
pub mod store;

pub use authorize::{AuthDecision, DenyReason};
pub use dispatch::{ActionDispatcher, StepAction};
pub use store::{HttpWorkflowStore, WorkflowStore};
