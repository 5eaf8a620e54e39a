//! Mirror repository writer backed by octocrab.

use super::wire::{
    LabelsPayload, NewComment, NewIssue, NewLabel, NewMilestone, StatePayload,
    SubscriptionPayload, WireCreated, WireSubscription,
};
use crate::client::{ApiError, DestinationClient};
use crate::model::{IssueMeta, ItemState, MilestoneOptions, RepoId};
use async_trait::async_trait;
use octocrab::Octocrab;

/// Writes to the mirror repository as one collaborator.
#[derive(Debug, Clone)]
pub struct GitHubDestination {
    octocrab: Octocrab,
    repo: RepoId,
}

impl GitHubDestination {
    /// Binds an authenticated session to the mirror repository.
    pub fn new(octocrab: Octocrab, repo: RepoId) -> Self {
        Self { octocrab, repo }
    }

    fn route(&self, path: &str) -> String {
        format!("/repos/{}/{}/{}", self.repo.owner, self.repo.name, path)
    }
}

#[async_trait]
impl DestinationClient for GitHubDestination {
    async fn create_milestone(
        &self,
        title: &str,
        options: &MilestoneOptions,
    ) -> Result<u64, ApiError> {
        let payload = NewMilestone { title, options };
        let created: WireCreated = self
            .octocrab
            .post(self.route("milestones"), Some(&payload))
            .await?;
        Ok(created.number)
    }

    async fn delete_milestone(&self, number: u64) -> Result<(), ApiError> {
        // DELETE answers 204 with no body, so skip JSON decoding.
        let response = self
            .octocrab
            ._delete(self.route(&format!("milestones/{number}")), None::<&()>)
            .await?;
        octocrab::map_github_error(response).await?;
        Ok(())
    }

    async fn create_label(&self, name: &str, color: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .octocrab
            .post(self.route("labels"), Some(&NewLabel { name, color }))
            .await?;
        Ok(())
    }

    async fn create_issue(
        &self,
        title: &str,
        body: &str,
        meta: &IssueMeta,
    ) -> Result<u64, ApiError> {
        let payload = NewIssue { title, body, meta };
        let created: WireCreated = self
            .octocrab
            .post(self.route("issues"), Some(&payload))
            .await?;
        Ok(created.number)
    }

    async fn add_labels(&self, number: u64, labels: &[String]) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .octocrab
            .post(
                self.route(&format!("issues/{number}/labels")),
                Some(&LabelsPayload { labels }),
            )
            .await?;
        Ok(())
    }

    async fn add_comment(&self, number: u64, body: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .octocrab
            .post(
                self.route(&format!("issues/{number}/comments")),
                Some(&NewComment { body }),
            )
            .await?;
        Ok(())
    }

    async fn close_issue(&self, number: u64) -> Result<(), ApiError> {
        let payload = StatePayload {
            state: ItemState::Closed.as_str(),
        };
        let _: serde_json::Value = self
            .octocrab
            .patch(self.route(&format!("issues/{number}")), Some(&payload))
            .await?;
        Ok(())
    }

    async fn update_subscription(&self, ignored: bool) -> Result<bool, ApiError> {
        let subscription: WireSubscription = self
            .octocrab
            .put(self.route("subscription"), Some(&SubscriptionPayload { ignored }))
            .await?;
        Ok(subscription.ignored)
    }
}
