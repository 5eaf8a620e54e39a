//! Run summary types.

use crate::mirror::IssueOutcome;
use serde::Serialize;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Collaborators whose mirror notifications are now ignored.
    pub notifications_suppressed: usize,

    /// Real milestones created.
    pub milestones_created: usize,

    /// Placeholder milestones created and deleted to fill numbering gaps.
    pub placeholders_materialized: usize,

    /// Why milestone synchronization stopped, if it did.
    pub milestone_failure: Option<String>,

    /// Labels created.
    pub labels_created: usize,

    /// Labels the mirror refused (e.g., already present).
    pub labels_rejected: usize,

    /// Issues migrated through every applicable stage.
    pub issues_migrated: usize,

    /// Of those, issues that were pull requests on the source.
    pub pull_requests_migrated: usize,

    /// Comments replicated across all issues.
    pub comments_replicated: usize,

    /// Mirrored issues closed.
    pub issues_closed: usize,

    /// Pacing waits performed.
    pub pacing_waits: usize,

    /// Per-issue outcomes in migration order.
    pub issues: Vec<IssueOutcome>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a migrated issue.
    pub fn record_issue(&mut self, outcome: &IssueOutcome) {
        self.issues_migrated += 1;
        if outcome.pull_request {
            self.pull_requests_migrated += 1;
        }
        self.comments_replicated += outcome.comments;
        if outcome.closed() {
            self.issues_closed += 1;
        }
        self.issues.push(outcome.clone());
    }

    /// Returns true if any synchronizer reported a failure it recovered from.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.milestone_failure.is_some() || self.labels_rejected > 0
    }
}
