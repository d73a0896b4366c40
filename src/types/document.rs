//! Document metadata supplied by the document-management collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The slice of document metadata the Draft stage label needs.
///
/// Owned by the document-management side; this crate only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub title: String,
    /// Document author, shown as the Draft stage actor
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl DocumentMeta {
    pub fn new(
        title: impl Into<String>,
        created_by: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            created_by: created_by.into(),
            created_at,
        }
    }
}
