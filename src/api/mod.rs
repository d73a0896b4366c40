//! Client modules for the approval backend integration.
//!
//! The backend owns all workflow state; this module provides the typed HTTP
//! client and the error taxonomy callers branch on. No caching, no retries -
//! every read reflects backend state and retry policy belongs to the caller.

pub mod client;
pub mod error;

pub use client::ApprovalApi;
pub use error::StoreError;
