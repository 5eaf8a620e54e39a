//! Source repository reader backed by octocrab.

use super::convert::{to_comment, to_commit, to_issue, to_label, to_milestone};
use super::wire::{ListParams, WireComment, WireCommit, WireIssue, WireLabel, WireMilestone};
use crate::client::{ApiError, SourceReader};
use crate::model::{Comment, Commit, Issue, ItemState, Label, Milestone, RepoId};
use crate::rate_limit::ensure_core_rate_limit;
use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Results per page for list routes.
const RESULTS_PER_PAGE: u8 = 100;

/// Reads milestones, labels, issues and comments from the source repository.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    octocrab: Octocrab,
    repo: RepoId,
    rate_limit_guard: bool,
}

impl GitHubSource {
    /// Creates a reader for `repo` using an authenticated session.
    ///
    /// With `rate_limit_guard` set, every read first checks the core rate
    /// limit and waits for the reset when it is nearly exhausted.
    pub fn new(octocrab: Octocrab, repo: RepoId, rate_limit_guard: bool) -> Self {
        Self {
            octocrab,
            repo,
            rate_limit_guard,
        }
    }

    fn route(&self, path: &str) -> String {
        format!("/repos/{}/{}/{}", self.repo.owner, self.repo.name, path)
    }

    async fn guard(&self) -> Result<(), ApiError> {
        if self.rate_limit_guard {
            ensure_core_rate_limit(&self.octocrab).await?;
        }
        Ok(())
    }

    /// Fetches every page of a list route.
    async fn list_all<T: DeserializeOwned>(
        &self,
        path: &str,
        state: Option<&str>,
    ) -> Result<Vec<T>, ApiError> {
        self.guard().await?;
        let route = self.route(path);
        debug!(route = %route, state, "Listing source records");

        let params = ListParams {
            state,
            per_page: RESULTS_PER_PAGE,
        };
        let first: Page<T> = self.octocrab.get(&route, Some(&params)).await?;
        Ok(self.octocrab.all_pages(first).await?)
    }
}

#[async_trait]
impl SourceReader for GitHubSource {
    async fn list_milestones(&self, state: ItemState) -> Result<Vec<Milestone>, ApiError> {
        self.list_all::<WireMilestone>("milestones", Some(state.as_str()))
            .await?
            .into_iter()
            .map(to_milestone)
            .collect()
    }

    async fn list_labels(&self) -> Result<Vec<Label>, ApiError> {
        let labels = self.list_all::<WireLabel>("labels", None).await?;
        Ok(labels.into_iter().map(to_label).collect())
    }

    async fn get_issue(&self, number: u64) -> Result<Issue, ApiError> {
        self.guard().await?;
        let route = self.route(&format!("issues/{number}"));
        let wire: WireIssue = self.octocrab.get(&route, None::<&()>).await?;
        to_issue(wire)
    }

    async fn list_issue_comments(&self, number: u64) -> Result<Vec<Comment>, ApiError> {
        let comments = self
            .list_all::<WireComment>(&format!("issues/{number}/comments"), None)
            .await?;
        Ok(comments.into_iter().map(to_comment).collect())
    }

    async fn list_pull_request_commits(&self, number: u64) -> Result<Vec<Commit>, ApiError> {
        let commits = self
            .list_all::<WireCommit>(&format!("pulls/{number}/commits"), None)
            .await?;
        Ok(commits.into_iter().map(to_commit).collect())
    }
}
