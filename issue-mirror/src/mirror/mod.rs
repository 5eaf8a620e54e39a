//! The mirroring engine.
//!
//! [`Mirror`] ties together the source reader, the destination identities
//! and the pacer. Each synchronizer lives in its own submodule:
//!
//! - [`notifications`](Mirror::suppress_notifications) - mute the mirror for every collaborator
//! - [`milestones`](Mirror::sync_milestones) - number-preserving milestone copy
//! - [`labels`](Mirror::sync_labels) - verbatim label copy
//! - [`issues`](Mirror::migrate_issues) - per-issue migration state machine
//!
//! Everything runs sequentially on one task. Destination numbering is
//! assigned by the service in creation order, so milestones and issues must
//! be created strictly in ascending order.

mod error;
mod issues;
mod labels;
mod milestones;
mod notifications;

pub use error::MirrorError;
pub use issues::{IssueOutcome, MigrationStage};

use crate::client::{DestinationClient, SourceReader};
use crate::identity::IdentityPool;
use crate::pacing::Pacer;
use crate::selector::IssueSelector;
use crate::summary::RunSummary;
use crate::templates::{ProvenanceRenderer, TemplateOverrides};
use std::time::Duration;
use tracing::{error, info};

/// Which synchronizers a run invokes.
///
/// They always run in field order: notifications, milestones, labels,
/// issues. Issues may reference milestones and labels, which must exist on
/// the mirror first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operations {
    /// Ignore mirror notifications for every collaborator.
    pub notifications: bool,
    /// Mirror milestones.
    pub milestones: bool,
    /// Mirror labels.
    pub labels: bool,
    /// Migrate the selected issues.
    pub issues: Option<IssueSelector>,
}

impl Operations {
    /// Returns true if no synchronizer is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.notifications && !self.milestones && !self.labels && self.issues.is_none()
    }
}

/// Settings fixed for the lifetime of a [`Mirror`].
#[derive(Debug, Clone, Default)]
pub struct MirrorOptions {
    /// Source repository name, used in status lines and provenance text.
    pub source_name: String,
    /// Mirror repository name, used in status lines.
    pub mirror_name: String,
    /// Perform reads and decisions but no destination mutations.
    pub dry_run: bool,
    /// Delay after every destination-mutating step.
    pub delay: Duration,
    /// Provenance template overrides.
    pub templates: TemplateOverrides,
}

/// Mirrors one source repository into one destination repository.
#[derive(Debug)]
pub struct Mirror<S, D> {
    source: S,
    identities: IdentityPool<D>,
    pacer: Pacer,
    renderer: ProvenanceRenderer,
    source_name: String,
    mirror_name: String,
    dry_run: bool,
}

impl<S, D> Mirror<S, D>
where
    S: SourceReader,
    D: DestinationClient,
{
    /// Creates a mirror over a source reader and the destination identities.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Template`] if a provenance override does not
    /// parse.
    pub fn new(
        source: S,
        identities: IdentityPool<D>,
        options: MirrorOptions,
    ) -> Result<Self, MirrorError> {
        Ok(Self {
            source,
            identities,
            pacer: Pacer::new(options.delay),
            renderer: ProvenanceRenderer::new(&options.templates)?,
            source_name: options.source_name,
            mirror_name: options.mirror_name,
            dry_run: options.dry_run,
        })
    }

    /// Returns the pacer, mostly to inspect how often it waited.
    #[must_use]
    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    /// Runs the requested synchronizers in their fixed order.
    ///
    /// A source without milestones is recorded in the summary and the run
    /// moves on; any other error aborts the run where it happened.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`MirrorError`].
    pub async fn run(&self, operations: &Operations) -> Result<RunSummary, MirrorError> {
        let mut summary = RunSummary::new(self.dry_run);

        if operations.notifications {
            self.suppress_notifications(&mut summary).await?;
        }

        if operations.milestones {
            match self.sync_milestones(&mut summary).await {
                Ok(()) => {}
                Err(MirrorError::NoMilestones) => {
                    error!(source = %self.source_name, "No milestones to mirror");
                    summary.milestone_failure = Some(MirrorError::NoMilestones.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        if operations.labels {
            self.sync_labels(&mut summary).await?;
        }

        if let Some(selector) = &operations.issues {
            self.migrate_issues(selector, &mut summary).await?;
        }

        summary.pacing_waits = self.pacer.waits();
        info!(
            source = %self.source_name,
            mirror = %self.mirror_name,
            dry_run = self.dry_run,
            "Run complete"
        );
        Ok(summary)
    }
}
