//! Error taxonomy for approval backend operations.
//!
//! Every failure reaches the caller with its kind and message intact; a
//! failed mutation is never swallowed and never partially applied (the
//! backend applies step transitions atomically).

use thiserror::Error;

/// Errors returned by workflow store operations
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No workflow exists for the document
    #[error("workflow not available for document '{document_id}'")]
    NotFound { document_id: String },

    /// Action attempted on a step that is not pending/in_progress.
    /// The caller must reload before retrying.
    #[error("invalid step '{step_id}': {message}")]
    InvalidStep { step_id: String, message: String },

    /// No pending approval step found for this document and principal.
    /// An authorization state, not a transient fault; retrying won't help.
    #[error("no pending approval step found for document '{document_id}'")]
    NoPendingApproval { document_id: String },

    /// Network or backend unavailability. The caller decides whether to
    /// retry; this crate never retries on its own.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// Unexpected HTTP status, carried unmodified
    #[error("backend returned HTTP {status}: {message}")]
    Backend { status: u16, message: String },
}

impl StoreError {
    pub fn not_found(document_id: impl Into<String>) -> Self {
        StoreError::NotFound {
            document_id: document_id.into(),
        }
    }

    pub fn invalid_step(step_id: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::InvalidStep {
            step_id: step_id.into(),
            message: message.into(),
        }
    }

    pub fn no_pending_approval(document_id: impl Into<String>) -> Self {
        StoreError::NoPendingApproval {
            document_id: document_id.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        StoreError::Transport {
            message: message.into(),
        }
    }

    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        StoreError::Backend {
            status,
            message: message.into(),
        }
    }

    /// Check if retrying could succeed (transient transport/backend faults)
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Transport { .. } => true,
            StoreError::Backend { status, .. } => {
                matches!(*status, 502 | 503 | 504)
            }
            _ => false,
        }
    }

    /// Check if this is an authorization state rather than a fault
    pub fn is_authorization(&self) -> bool {
        matches!(self, StoreError::NoPendingApproval { .. })
    }

    /// Check if the caller must reload workflow state before retrying
    pub fn requires_reload(&self) -> bool {
        matches!(self, StoreError::InvalidStep { .. })
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            StoreError::backend(status.as_u16(), err.to_string())
        } else {
            // Connect, timeout, and body errors have no status
            StoreError::transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        assert!(StoreError::transport("connection refused").is_retryable());
        assert!(StoreError::backend(503, "unavailable").is_retryable());
        assert!(!StoreError::backend(500, "boom").is_retryable());
        assert!(!StoreError::not_found("doc-1").is_retryable());
        assert!(!StoreError::invalid_step("s1", "completed").is_retryable());
        assert!(!StoreError::no_pending_approval("doc-1").is_retryable());
    }

    #[test]
    fn test_is_authorization() {
        assert!(StoreError::no_pending_approval("doc-1").is_authorization());
        assert!(!StoreError::not_found("doc-1").is_authorization());
    }

    #[test]
    fn test_requires_reload() {
        assert!(StoreError::invalid_step("s1", "already completed").requires_reload());
        assert!(!StoreError::transport("timeout").requires_reload());
    }

    #[test]
    fn test_display() {
        let err = StoreError::no_pending_approval("doc-7");
        assert_eq!(
            err.to_string(),
            "no pending approval step found for document 'doc-7'"
        );

        let err = StoreError::invalid_step("s2", "step is completed");
        assert_eq!(err.to_string(), "invalid step 's2': step is completed");
    }
}
