//! Typed records for the entities mirrored between repositories.
//!
//! Everything here is validated at the source boundary (see
//! [`crate::github`]), so the synchronizers never deal with missing keys.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;

/// Username the source service reports for accounts that no longer exist.
pub const GHOST_USERNAME: &str = "ghost";

/// Label added to every mirrored issue.
pub const MIRROR_LABEL: &str = "mirror";

/// Label added to mirrored issues that were pull requests on the source.
pub const PULL_REQUEST_LABEL: &str = "pull-request";

/// An `owner/name` repository identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    /// Parses `owner/name`. Both parts must be non-empty and there must be
    /// exactly one slash.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (owner, name) = value.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Open/closed state shared by milestones and issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    Open,
    Closed,
}

impl ItemState {
    /// Returns the state as used in API routes and payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Parses an API state string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A milestone read from the source repository.
#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    /// Source-assigned number. Stable, unique, possibly sparse.
    pub number: u64,
    pub title: String,
    pub description: Option<String>,
    pub due_on: Option<DateTime<Utc>>,
    pub state: ItemState,
    /// Login of the creator, or [`GHOST_USERNAME`] if the account is gone.
    pub creator: String,
}

/// Optional fields sent when creating a milestone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MilestoneOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ItemState>,
}

impl From<&Milestone> for MilestoneOptions {
    fn from(milestone: &Milestone) -> Self {
        Self {
            description: milestone.description.clone(),
            due_on: milestone.due_on,
            state: Some(milestone.state),
        }
    }
}

/// A label read from the source repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    /// Hex color without the leading `#`.
    pub color: String,
}

/// An issue (or pull request) read from the source repository.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    /// Issue body. Provenance text is appended locally before mirroring.
    pub body: String,
    /// Label names in source order.
    pub labels: Vec<String>,
    pub assignee: Option<String>,
    /// Milestone number, if the issue belongs to one.
    pub milestone: Option<u64>,
    pub author: String,
    pub state: ItemState,
    pub closed_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    /// Whether the issue also exists as a pull request.
    pub pull_request: bool,
}

impl Issue {
    /// Returns true if the issue doubles as a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request
    }

    /// Returns true if the issue is closed on the source.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == ItemState::Closed
    }

    /// Builds the creation metadata for the mirrored issue.
    #[must_use]
    pub fn meta(&self) -> IssueMeta {
        IssueMeta {
            labels: self.labels.clone(),
            assignee: self.assignee.clone(),
            milestone: self.milestone,
        }
    }
}

/// Metadata sent alongside a new issue's title and body.
///
/// Empty or absent fields are omitted from the request entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueMeta {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
}

impl IssueMeta {
    /// Label names joined with commas, or `None` when there are no labels.
    #[must_use]
    pub fn joined_labels(&self) -> Option<String> {
        (!self.labels.is_empty()).then(|| self.labels.join(","))
    }
}

/// A comment on a source issue.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A commit belonging to a source pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub committer: Option<String>,
}

/// Formats a timestamp the way provenance text shows it.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}
