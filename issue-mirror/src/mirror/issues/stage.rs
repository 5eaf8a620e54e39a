//! Migration stages of a single issue.

use serde::Serialize;
use std::fmt;

/// How far an issue got through migration.
///
/// Stages are ordered: a later stage implies every earlier mandatory one
/// completed. `PullRequestTagged` and `Closed` are only reached by pull
/// requests and closed issues respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStage {
    /// Read from the source and provenance appended.
    Fetched,
    /// Created on the mirror.
    Opened,
    /// Tagged with the pull request label.
    PullRequestTagged,
    /// Tagged with the mirror label.
    MirrorTagged,
    /// Every source comment replicated.
    CommentsReplicated,
    /// Closed on the mirror.
    Closed,
}

impl MigrationStage {
    /// Returns the stage as a string for status lines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fetched => "fetched",
            Self::Opened => "opened",
            Self::PullRequestTagged => "pull_request_tagged",
            Self::MirrorTagged => "mirror_tagged",
            Self::CommentsReplicated => "comments_replicated",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for MigrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
