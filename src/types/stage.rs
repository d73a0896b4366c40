//! Derived three-stage progress summary.
//!
//! The raw chain may carry any number of named approval steps (review,
//! technical review, final approval, ...). The UI and audit trail want a
//! stable three-point view - Draft / Reviewed / Approved - independent of
//! chain length. Computed by [`crate::workflow::stages`]; never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of one summary stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageState {
    Completed,
    InProgress,
    Pending,
}

/// One entry of the three-stage summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEntry {
    pub state: StageState,
    /// Who completed the stage, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// When the stage completed, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl StageEntry {
    pub fn completed(actor: Option<String>, timestamp: Option<DateTime<Utc>>) -> Self {
        Self {
            state: StageState::Completed,
            actor,
            timestamp,
        }
    }

    pub fn in_progress() -> Self {
        Self {
            state: StageState::InProgress,
            actor: None,
            timestamp: None,
        }
    }

    pub fn pending() -> Self {
        Self {
            state: StageState::Pending,
            actor: None,
            timestamp: None,
        }
    }
}

/// The three-stage summary plus the active stage index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSummary {
    pub draft: StageEntry,
    pub reviewed: StageEntry,
    pub approved: StageEntry,
    /// 0 = Draft, 1 = Reviewed, 2 = Approved
    pub active_index: usize,
}

impl StageSummary {
    /// Display names, indexed by `active_index`
    pub const STAGE_NAMES: [&'static str; 3] = ["Draft", "Reviewed", "Approved"];

    /// The entries in stage order
    pub fn entries(&self) -> [&StageEntry; 3] {
        [&self.draft, &self.reviewed, &self.approved]
    }
}
