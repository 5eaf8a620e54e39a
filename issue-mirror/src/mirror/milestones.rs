//! Milestone synchronization.
//!
//! The destination numbers milestones itself, one after another, and offers
//! no way to pick a number. To keep source and mirror numbers aligned every
//! number from 1 to the highest source number is created in order; numbers
//! that were deleted on the source become placeholders that are created and
//! immediately deleted again, which still advances the counter.

use super::{Mirror, MirrorError};
use crate::client::{DestinationClient, SourceReader};
use crate::model::{ItemState, Milestone, MilestoneOptions};
use crate::summary::RunSummary;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Collects open and closed milestones keyed by number.
fn index_by_number(milestones: Vec<Milestone>) -> BTreeMap<u64, Milestone> {
    milestones
        .into_iter()
        .map(|milestone| (milestone.number, milestone))
        .collect()
}

impl<S, D> Mirror<S, D>
where
    S: SourceReader,
    D: DestinationClient,
{
    /// Recreates the source milestone sequence on the mirror.
    ///
    /// # Errors
    ///
    /// - [`MirrorError::NoMilestones`] if the source has no milestones.
    /// - [`MirrorError::UnknownIdentity`] if a creator has no collaborator.
    /// - [`MirrorError::Api`] on any API failure.
    pub async fn sync_milestones(&self, summary: &mut RunSummary) -> Result<(), MirrorError> {
        info!(source = %self.source_name, mirror = %self.mirror_name, "Mirroring milestones");

        let mut milestones = self.source.list_milestones(ItemState::Open).await?;
        milestones.extend(self.source.list_milestones(ItemState::Closed).await?);
        let milestones = index_by_number(milestones);

        let last = milestones
            .last_key_value()
            .map(|(number, _)| *number)
            .ok_or(MirrorError::NoMilestones)?;

        for number in 1..=last {
            match milestones.get(&number) {
                Some(milestone) => {
                    self.create_milestone(milestone).await?;
                    summary.milestones_created += 1;
                }
                None => {
                    self.materialize_placeholder(number).await?;
                    summary.placeholders_materialized += 1;
                }
            }
            self.pacer.wait().await;
        }

        info!(last, "All milestones mirrored");
        Ok(())
    }

    /// Creates one real milestone as its original creator.
    async fn create_milestone(&self, milestone: &Milestone) -> Result<(), MirrorError> {
        let creator = self.identities.resolve(&milestone.creator)?;
        info!(
            number = milestone.number,
            title = %milestone.title,
            actor = %creator.login,
            dry_run = self.dry_run,
            "Creating milestone"
        );

        if self.dry_run {
            return Ok(());
        }

        let created = creator
            .session
            .create_milestone(&milestone.title, &MilestoneOptions::from(milestone))
            .await?;
        warn_on_drift(milestone.number, created);
        Ok(())
    }

    /// Advances the destination milestone counter past `number`.
    ///
    /// Creates a milestone titled with the number and deletes it straight
    /// away, as the admin.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Api`] if either call fails.
    pub async fn materialize_placeholder(&self, number: u64) -> Result<(), MirrorError> {
        let admin = self.identities.admin();
        info!(
            number,
            actor = %admin.login,
            dry_run = self.dry_run,
            "Creating and deleting placeholder milestone"
        );

        if self.dry_run {
            return Ok(());
        }

        let created = admin
            .session
            .create_milestone(&number.to_string(), &MilestoneOptions::default())
            .await?;
        warn_on_drift(number, created);
        // Delete what was actually created, never a milestone that happens
        // to hold the expected number.
        admin.session.delete_milestone(created).await?;
        Ok(())
    }
}

fn warn_on_drift(expected: u64, created: u64) {
    if expected != created {
        warn!(
            expected,
            created, "Mirror milestone numbering is out of step with the source"
        );
    }
}
