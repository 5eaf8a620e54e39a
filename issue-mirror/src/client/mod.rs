//! Source and destination client seams.
//!
//! The engine only talks to these traits. [`crate::github`] provides the
//! octocrab-backed implementations; tests drive the engine with fakes.

mod error;

pub use error::ApiError;

use crate::model::{Comment, Commit, Issue, IssueMeta, ItemState, Label, Milestone, MilestoneOptions};
use async_trait::async_trait;

/// Read-only access to the source repository.
///
/// Implementations return fully materialised lists; pagination is their
/// concern.
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Lists milestones in the given state.
    async fn list_milestones(&self, state: ItemState) -> Result<Vec<Milestone>, ApiError>;

    /// Lists every label of the repository.
    async fn list_labels(&self) -> Result<Vec<Label>, ApiError>;

    /// Fetches one issue by number.
    async fn get_issue(&self, number: u64) -> Result<Issue, ApiError>;

    /// Lists the comments of an issue in chronological order.
    async fn list_issue_comments(&self, number: u64) -> Result<Vec<Comment>, ApiError>;

    /// Lists the commits of a pull request in source order.
    async fn list_pull_request_commits(&self, number: u64) -> Result<Vec<Commit>, ApiError>;
}

/// Mutating access to the mirror repository, bound to one identity.
#[async_trait]
pub trait DestinationClient: Send + Sync {
    /// Creates a milestone and returns the number the service assigned.
    async fn create_milestone(
        &self,
        title: &str,
        options: &MilestoneOptions,
    ) -> Result<u64, ApiError>;

    /// Deletes a milestone by number.
    async fn delete_milestone(&self, number: u64) -> Result<(), ApiError>;

    /// Creates a label.
    async fn create_label(&self, name: &str, color: &str) -> Result<(), ApiError>;

    /// Creates an issue and returns the number the service assigned.
    async fn create_issue(&self, title: &str, body: &str, meta: &IssueMeta)
        -> Result<u64, ApiError>;

    /// Adds labels to an existing issue.
    async fn add_labels(&self, number: u64, labels: &[String]) -> Result<(), ApiError>;

    /// Adds a comment to an existing issue.
    async fn add_comment(&self, number: u64, body: &str) -> Result<(), ApiError>;

    /// Closes an issue.
    async fn close_issue(&self, number: u64) -> Result<(), ApiError>;

    /// Updates the identity's subscription to the repository and returns
    /// whether it is now ignored.
    async fn update_subscription(&self, ignored: bool) -> Result<bool, ApiError>;
}
