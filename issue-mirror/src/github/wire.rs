//! Raw REST payloads as the service returns them.
//!
//! Fields the service may omit or null out are `Option`s here and get
//! resolved in [`super::convert`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireUser {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireMilestone {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_on: Option<DateTime<Utc>>,
    pub state: String,
    #[serde(default)]
    pub creator: Option<WireUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireLabel {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireMilestoneRef {
    pub number: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WirePullRequestRef {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireIssue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<WireLabel>,
    #[serde(default)]
    pub assignee: Option<WireUser>,
    #[serde(default)]
    pub milestone: Option<WireMilestoneRef>,
    #[serde(default)]
    pub user: Option<WireUser>,
    pub state: String,
    #[serde(default)]
    pub closed_by: Option<WireUser>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pull_request: Option<WirePullRequestRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireComment {
    #[serde(default)]
    pub user: Option<WireUser>,
    #[serde(default)]
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireCommitDetail {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireCommit {
    pub sha: String,
    pub commit: WireCommitDetail,
    #[serde(default)]
    pub committer: Option<WireUser>,
}

/// The part of a created issue or milestone we need back.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireCreated {
    pub number: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireSubscription {
    #[serde(default)]
    pub ignored: bool,
}

/// Query parameters for paginated list routes.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ListParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'a str>,
    pub per_page: u8,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewMilestone<'a> {
    pub title: &'a str,
    #[serde(flatten)]
    pub options: &'a crate::model::MilestoneOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewLabel<'a> {
    pub name: &'a str,
    pub color: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewIssue<'a> {
    pub title: &'a str,
    pub body: &'a str,
    #[serde(flatten)]
    pub meta: &'a crate::model::IssueMeta,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewComment<'a> {
    pub body: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LabelsPayload<'a> {
    pub labels: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct StatePayload {
    pub state: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubscriptionPayload {
    pub ignored: bool,
}
