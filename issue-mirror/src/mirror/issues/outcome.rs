//! Per-issue migration outcome.

use super::MigrationStage;
use serde::Serialize;

/// What happened to one source issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueOutcome {
    /// Source issue number.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Destination login that opened the mirrored issue.
    pub opened_by: String,
    /// Number assigned on the mirror. `None` in dry-run mode.
    pub mirror_number: Option<u64>,
    /// Whether the source issue was a pull request.
    pub pull_request: bool,
    /// Number of comments replicated.
    pub comments: usize,
    /// Last stage reached.
    pub stage: MigrationStage,
}

impl IssueOutcome {
    /// Returns true if the mirrored issue was closed.
    #[must_use]
    pub fn closed(&self) -> bool {
        self.stage == MigrationStage::Closed
    }
}
