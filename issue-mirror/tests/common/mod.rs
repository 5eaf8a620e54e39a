//! In-memory source and destination used by the integration tests.
//!
//! The destination numbers milestones and issues from independent
//! counters, like the real service, and every mutating call is recorded
//! with the login that made it.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use issue_mirror::model::{
    Comment, Commit, Issue, IssueMeta, ItemState, Label, Milestone, MilestoneOptions,
};
use issue_mirror::{
    ApiError, Collaborator, DestinationClient, IdentityPool, Mirror, MirrorOptions, SourceReader,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

pub const ADMIN: &str = "admin";
pub const SOURCE: &str = "acme/widgets";

/// A mutating call seen by the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateMilestone { title: String },
    DeleteMilestone { number: u64 },
    CreateLabel { name: String, color: String },
    CreateIssue { title: String, body: String, meta: IssueMeta },
    AddLabels { number: u64, labels: Vec<String> },
    AddComment { number: u64, body: String },
    CloseIssue { number: u64 },
    UpdateSubscription { ignored: bool },
}

/// One recorded destination call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub login: String,
    pub action: Action,
}

/// A milestone as it exists on the fake mirror.
#[derive(Debug, Clone, PartialEq)]
pub struct MirroredMilestone {
    pub title: String,
    pub options: MilestoneOptions,
    pub creator: String,
}

/// A mirrored issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirroredIssue {
    pub title: String,
    pub body: String,
    pub author: String,
    pub labels: Vec<String>,
    pub comments: Vec<(String, String)>,
    pub closed_by: Option<String>,
}

#[derive(Debug, Default)]
pub struct State {
    // Source side.
    pub source_milestones: Vec<Milestone>,
    pub source_labels: Vec<Label>,
    pub source_issues: BTreeMap<u64, Issue>,
    pub source_comments: BTreeMap<u64, Vec<Comment>>,
    pub source_commits: BTreeMap<u64, Vec<Commit>>,
    pub reads: Vec<String>,

    // Destination side.
    pub next_milestone: u64,
    pub next_issue: u64,
    pub milestones: BTreeMap<u64, MirroredMilestone>,
    pub labels: BTreeMap<String, String>,
    pub issues: BTreeMap<u64, MirroredIssue>,
    pub rejected_labels: BTreeSet<String>,
    pub calls: Vec<Call>,
}

/// Shared handle over the fake service.
#[derive(Debug, Clone, Default)]
pub struct FakeService {
    state: Arc<Mutex<State>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn source(&self) -> FakeSource {
        FakeSource {
            state: Arc::clone(&self.state),
        }
    }

    pub fn destination(&self, login: &str) -> FakeDestination {
        FakeDestination {
            login: login.to_string(),
            state: Arc::clone(&self.state),
        }
    }

    pub fn with_milestones(self, numbers: &[u64]) -> Self {
        self.state().source_milestones = numbers
            .iter()
            .map(|&number| milestone(number, "alice"))
            .collect();
        self
    }

    pub fn with_issue(self, issue: Issue, comments: Vec<Comment>) -> Self {
        {
            let mut state = self.state();
            state.source_comments.insert(issue.number, comments);
            state.source_issues.insert(issue.number, issue);
        }
        self
    }

    pub fn with_commits(self, number: u64, commits: Vec<Commit>) -> Self {
        self.state().source_commits.insert(number, commits);
        self
    }

    pub fn with_labels(self, labels: &[(&str, &str)]) -> Self {
        self.state().source_labels = labels
            .iter()
            .map(|(name, color)| Label {
                name: (*name).to_string(),
                color: (*color).to_string(),
            })
            .collect();
        self
    }

    pub fn rejecting_label(self, name: &str) -> Self {
        self.state().rejected_labels.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn reads(&self) -> Vec<String> {
        self.state().reads.clone()
    }

    /// Builds a mirror acting through `usernames` (plus the admin).
    pub fn mirror(
        &self,
        usernames: &[&str],
        dry_run: bool,
    ) -> Mirror<FakeSource, FakeDestination> {
        let collaborators = std::iter::once(ADMIN)
            .chain(usernames.iter().copied())
            .map(|username| Collaborator::new(username, self.destination(username)));
        let identities = IdentityPool::new(ADMIN, collaborators).unwrap();

        let options = MirrorOptions {
            source_name: SOURCE.to_string(),
            mirror_name: "mirror/widgets".to_string(),
            dry_run,
            delay: Duration::ZERO,
            ..Default::default()
        };
        Mirror::new(self.source(), identities, options).unwrap()
    }
}

pub struct FakeSource {
    state: Arc<Mutex<State>>,
}

impl FakeSource {
    fn read(&self, what: String) -> MutexGuard<'_, State> {
        let mut state = self.state.lock().unwrap();
        state.reads.push(what);
        state
    }
}

fn not_found(kind: &str, number: u64) -> ApiError {
    ApiError::Rejected {
        status: 404,
        message: format!("{kind} {number} Not Found"),
    }
}

#[async_trait]
impl SourceReader for FakeSource {
    async fn list_milestones(&self, state: ItemState) -> Result<Vec<Milestone>, ApiError> {
        let guard = self.read(format!("milestones?state={state}"));
        Ok(guard
            .source_milestones
            .iter()
            .filter(|milestone| milestone.state == state)
            .cloned()
            .collect())
    }

    async fn list_labels(&self) -> Result<Vec<Label>, ApiError> {
        Ok(self.read("labels".to_string()).source_labels.clone())
    }

    async fn get_issue(&self, number: u64) -> Result<Issue, ApiError> {
        self.read(format!("issues/{number}"))
            .source_issues
            .get(&number)
            .cloned()
            .ok_or_else(|| not_found("issue", number))
    }

    async fn list_issue_comments(&self, number: u64) -> Result<Vec<Comment>, ApiError> {
        Ok(self
            .read(format!("issues/{number}/comments"))
            .source_comments
            .get(&number)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_pull_request_commits(&self, number: u64) -> Result<Vec<Commit>, ApiError> {
        Ok(self
            .read(format!("pulls/{number}/commits"))
            .source_commits
            .get(&number)
            .cloned()
            .unwrap_or_default())
    }
}

pub struct FakeDestination {
    login: String,
    state: Arc<Mutex<State>>,
}

impl FakeDestination {
    fn record(&self, action: Action) -> MutexGuard<'_, State> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call {
            login: self.login.clone(),
            action,
        });
        state
    }
}

#[async_trait]
impl DestinationClient for FakeDestination {
    async fn create_milestone(
        &self,
        title: &str,
        options: &MilestoneOptions,
    ) -> Result<u64, ApiError> {
        let mut state = self.record(Action::CreateMilestone {
            title: title.to_string(),
        });
        state.next_milestone += 1;
        let number = state.next_milestone;
        state.milestones.insert(
            number,
            MirroredMilestone {
                title: title.to_string(),
                options: options.clone(),
                creator: self.login.clone(),
            },
        );
        Ok(number)
    }

    async fn delete_milestone(&self, number: u64) -> Result<(), ApiError> {
        let mut state = self.record(Action::DeleteMilestone { number });
        state
            .milestones
            .remove(&number)
            .map(|_| ())
            .ok_or_else(|| not_found("milestone", number))
    }

    async fn create_label(&self, name: &str, color: &str) -> Result<(), ApiError> {
        let mut state = self.record(Action::CreateLabel {
            name: name.to_string(),
            color: color.to_string(),
        });
        if state.rejected_labels.contains(name) || state.labels.contains_key(name) {
            return Err(ApiError::Rejected {
                status: 422,
                message: "Validation Failed".to_string(),
            });
        }
        state.labels.insert(name.to_string(), color.to_string());
        Ok(())
    }

    async fn create_issue(
        &self,
        title: &str,
        body: &str,
        meta: &IssueMeta,
    ) -> Result<u64, ApiError> {
        let mut state = self.record(Action::CreateIssue {
            title: title.to_string(),
            body: body.to_string(),
            meta: meta.clone(),
        });
        state.next_issue += 1;
        let number = state.next_issue;
        state.issues.insert(
            number,
            MirroredIssue {
                title: title.to_string(),
                body: body.to_string(),
                author: self.login.clone(),
                labels: meta.labels.clone(),
                comments: Vec::new(),
                closed_by: None,
            },
        );
        Ok(number)
    }

    async fn add_labels(&self, number: u64, labels: &[String]) -> Result<(), ApiError> {
        let mut state = self.record(Action::AddLabels {
            number,
            labels: labels.to_vec(),
        });
        let issue = state
            .issues
            .get_mut(&number)
            .ok_or_else(|| not_found("issue", number))?;
        issue.labels.extend(labels.iter().cloned());
        Ok(())
    }

    async fn add_comment(&self, number: u64, body: &str) -> Result<(), ApiError> {
        let mut state = self.record(Action::AddComment {
            number,
            body: body.to_string(),
        });
        let issue = state
            .issues
            .get_mut(&number)
            .ok_or_else(|| not_found("issue", number))?;
        issue.comments.push((self.login.clone(), body.to_string()));
        Ok(())
    }

    async fn close_issue(&self, number: u64) -> Result<(), ApiError> {
        let mut state = self.record(Action::CloseIssue { number });
        let issue = state
            .issues
            .get_mut(&number)
            .ok_or_else(|| not_found("issue", number))?;
        issue.closed_by = Some(self.login.clone());
        Ok(())
    }

    async fn update_subscription(&self, ignored: bool) -> Result<bool, ApiError> {
        self.record(Action::UpdateSubscription { ignored });
        Ok(ignored)
    }
}

pub fn timestamp(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 3, day, 12, 0, 0).unwrap()
}

pub fn milestone(number: u64, creator: &str) -> Milestone {
    Milestone {
        number,
        title: format!("Milestone {number}"),
        description: Some(format!("Work for milestone {number}")),
        due_on: (number % 2 == 1).then(|| timestamp(20)),
        state: if number % 2 == 0 {
            ItemState::Closed
        } else {
            ItemState::Open
        },
        creator: creator.to_string(),
    }
}

pub fn issue(number: u64, author: &str) -> Issue {
    Issue {
        number,
        title: format!("Issue {number}"),
        body: format!("Body of issue {number}"),
        labels: Vec::new(),
        assignee: None,
        milestone: None,
        author: author.to_string(),
        state: ItemState::Open,
        closed_by: None,
        created_at: timestamp(1),
        closed_at: None,
        pull_request: false,
    }
}

pub fn closed_issue(number: u64, author: &str, closed_by: Option<&str>) -> Issue {
    Issue {
        state: ItemState::Closed,
        closed_by: closed_by.map(str::to_string),
        closed_at: Some(timestamp(2)),
        ..issue(number, author)
    }
}

pub fn comment(author: &str, body: &str, day: u32) -> Comment {
    Comment {
        author: author.to_string(),
        body: body.to_string(),
        created_at: timestamp(day),
    }
}
