//! Acting identities and backend assignment records.
//!
//! The principal is always an explicit parameter. Nothing in this crate reads
//! ambient session state; callers supply whoever is acting.

use serde::{Deserialize, Serialize};

/// The acting identity for authorization decisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Principal name, matching the backend's assignment records
    pub name: String,
    /// Administrator capability: may act on any actionable step
    #[serde(default)]
    pub is_admin: bool,
}

impl Principal {
    /// A regular (non-administrator) principal
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_admin: false,
        }
    }

    /// An administrator principal
    pub fn admin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_admin: true,
        }
    }
}

/// One pending assignment from the backend's own records.
///
/// The backend is authoritative for who may act where; chain position alone
/// never authorizes a non-administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingApproval {
    pub document_id: String,
    pub step_id: String,
}

impl PendingApproval {
    pub fn new(document_id: impl Into<String>, step_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            step_id: step_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_constructors() {
        let user = Principal::user("alice");
        assert_eq!(user.name, "alice");
        assert!(!user.is_admin);

        let admin = Principal::admin("quality-manager");
        assert!(admin.is_admin);
    }

    #[test]
    fn test_is_admin_defaults_false_on_wire() {
        let principal: Principal = serde_json::from_str("{\"name\":\"bob\"}").unwrap();
        assert!(!principal.is_admin);
    }
}
