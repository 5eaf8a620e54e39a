//! Issue migration.
//!
//! Each selected issue goes through the same fixed sequence:
//!
//! 1. Fetch the issue and append provenance (plus the commit list for pull
//!    requests).
//! 2. Open it on the mirror as the original author.
//! 3. Tag it `pull-request` if it was one, as the admin.
//! 4. Tag it `mirror`, as the admin.
//! 5. Replicate every comment in order, each as its original author.
//! 6. Close it if it is closed on the source, as the closer or the admin.
//!
//! A step that cannot resolve its acting identity aborts the whole run. A
//! half-migrated issue is harder to repair than a run restarted with a
//! narrower selector.

mod outcome;
mod stage;

pub use outcome::IssueOutcome;
pub use stage::MigrationStage;

use super::{Mirror, MirrorError};
use crate::client::{DestinationClient, SourceReader};
use crate::model::{Issue, MIRROR_LABEL, PULL_REQUEST_LABEL};
use crate::selector::IssueSelector;
use crate::summary::RunSummary;
use tracing::{debug, info, info_span, warn, Instrument};

/// Characters of a comment shown in its status line.
const EXCERPT_CHARS: usize = 30;

/// Shortens a comment body for status lines, cutting at a word boundary.
fn excerpt(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= EXCERPT_CHARS {
        return body.to_string();
    }

    let cut: String = body.chars().take(EXCERPT_CHARS).collect();
    let cut = match cut.rfind(char::is_whitespace) {
        Some(index) if index > 0 => &cut[..index],
        _ => cut.as_str(),
    };
    format!("{}...", cut.trim_end())
}

impl<S, D> Mirror<S, D>
where
    S: SourceReader,
    D: DestinationClient,
{
    /// Migrates every issue the selector names, in selector order.
    ///
    /// # Errors
    ///
    /// Returns the first [`MirrorError`]; issues after it are not visited.
    pub async fn migrate_issues(
        &self,
        selector: &IssueSelector,
        summary: &mut RunSummary,
    ) -> Result<(), MirrorError> {
        info!(
            source = %self.source_name,
            mirror = %self.mirror_name,
            selector = %selector,
            "Mirroring issues"
        );

        for number in selector.numbers() {
            let outcome = self.migrate_issue(number).await?;
            summary.record_issue(&outcome);
        }

        info!("All selected issues mirrored");
        Ok(())
    }

    /// Migrates one issue through every stage.
    ///
    /// # Errors
    ///
    /// - [`MirrorError::UnknownIdentity`] if the author, a comment author or
    ///   the closer has no collaborator.
    /// - [`MirrorError::Api`] on any API failure.
    /// - [`MirrorError::Template`] if provenance text fails to render.
    pub async fn migrate_issue(&self, number: u64) -> Result<IssueOutcome, MirrorError> {
        let span = info_span!("migrate_issue", number, dry_run = self.dry_run);

        async {
            let issue = self.fetch_issue(number).await?;
            let mut outcome = IssueOutcome {
                number,
                title: issue.title.clone(),
                opened_by: String::new(),
                mirror_number: None,
                pull_request: issue.is_pull_request(),
                comments: 0,
                stage: MigrationStage::Fetched,
            };

            self.open_issue(&issue, &mut outcome).await?;

            if issue.is_pull_request() {
                self.tag(outcome.mirror_number, PULL_REQUEST_LABEL).await?;
                outcome.stage = MigrationStage::PullRequestTagged;
            }

            self.tag(outcome.mirror_number, MIRROR_LABEL).await?;
            outcome.stage = MigrationStage::MirrorTagged;

            outcome.comments = self.replicate_comments(number, outcome.mirror_number).await?;
            outcome.stage = MigrationStage::CommentsReplicated;

            if issue.is_closed() {
                self.close_issue(&issue, outcome.mirror_number).await?;
                outcome.stage = MigrationStage::Closed;
            }

            info!(stage = %outcome.stage, "Issue migrated");
            Ok(outcome)
        }
        .instrument(span)
        .await
    }

    /// Reads the issue and appends its provenance.
    async fn fetch_issue(&self, number: u64) -> Result<Issue, MirrorError> {
        let mut issue = self.source.get_issue(number).await?;

        let footer = self.renderer.issue_footer(&self.source_name, &issue)?;
        issue.body.push_str(&footer);

        if issue.is_pull_request() {
            let commits = self.source.list_pull_request_commits(number).await?;
            for commit in &commits {
                debug!(sha = %commit.sha, "Adding commit to issue body");
            }
            let commit_list = self.renderer.pull_request_commits(&commits)?;
            issue.body.push_str(&commit_list);
        }

        Ok(issue)
    }

    /// Creates the mirrored issue as its original author.
    async fn open_issue(&self, issue: &Issue, outcome: &mut IssueOutcome) -> Result<(), MirrorError> {
        let author = self.identities.resolve(&issue.author)?;
        let meta = issue.meta();
        info!(
            title = %issue.title,
            actor = %author.login,
            labels = %meta.joined_labels().unwrap_or_default(),
            assignee = meta.assignee.as_deref().unwrap_or_default(),
            milestone = meta.milestone,
            "Opening issue"
        );

        if !self.dry_run {
            let created = author
                .session
                .create_issue(&issue.title, &issue.body, &meta)
                .await?;
            if created != issue.number {
                warn!(
                    expected = issue.number,
                    created, "Mirror issue numbering is out of step with the source"
                );
            }
            outcome.mirror_number = Some(created);
        }
        outcome.opened_by = author.login.clone();
        outcome.stage = MigrationStage::Opened;

        self.pacer.wait().await;
        Ok(())
    }

    /// Adds one label to the mirrored issue as the admin.
    async fn tag(&self, mirror_number: Option<u64>, label: &str) -> Result<(), MirrorError> {
        let admin = self.identities.admin();
        info!(label, actor = %admin.login, "Adding label to issue");

        if let Some(number) = mirror_number {
            admin
                .session
                .add_labels(number, &[label.to_string()])
                .await?;
        }

        self.pacer.wait().await;
        Ok(())
    }

    /// Recreates the source comments in order, each as its author.
    async fn replicate_comments(
        &self,
        number: u64,
        mirror_number: Option<u64>,
    ) -> Result<usize, MirrorError> {
        let comments = self.source.list_issue_comments(number).await?;

        for comment in &comments {
            let author = self.identities.resolve(&comment.author)?;
            info!(
                actor = %author.login,
                excerpt = %excerpt(&comment.body),
                "Commenting on issue"
            );

            let body = format!("{}{}", comment.body, self.renderer.comment_footer(comment)?);
            if let Some(mirror_number) = mirror_number {
                author.session.add_comment(mirror_number, &body).await?;
            }

            self.pacer.wait().await;
        }

        Ok(comments.len())
    }

    /// Closes the mirrored issue as the original closer, or the admin.
    async fn close_issue(&self, issue: &Issue, mirror_number: Option<u64>) -> Result<(), MirrorError> {
        let closer = self.identities.resolve_or_admin(issue.closed_by.as_deref())?;
        info!(title = %issue.title, actor = %closer.login, "Closing issue");

        if let Some(mirror_number) = mirror_number {
            closer.session.close_issue(mirror_number).await?;
        }

        self.pacer.wait().await;
        Ok(())
    }
}
