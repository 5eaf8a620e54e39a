//! Notification suppression.
//!
//! Mirroring creates a burst of issues and comments that would otherwise
//! email every watcher of the mirror repository.

use super::{Mirror, MirrorError};
use crate::client::{DestinationClient, SourceReader};
use crate::summary::RunSummary;
use tracing::{info, warn};

impl<S, D> Mirror<S, D>
where
    S: SourceReader,
    D: DestinationClient,
{
    /// Marks the mirror repository as ignored for every collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Api`] if a subscription update fails.
    pub async fn suppress_notifications(&self, summary: &mut RunSummary) -> Result<(), MirrorError> {
        info!(mirror = %self.mirror_name, "Suppressing notifications");

        for collaborator in self.identities.iter() {
            if self.dry_run {
                info!(login = %collaborator.login, "Would ignore mirror notifications");
                summary.notifications_suppressed += 1;
            } else if collaborator.session.update_subscription(true).await? {
                info!(login = %collaborator.login, "Ignored mirror notifications");
                summary.notifications_suppressed += 1;
            } else {
                warn!(
                    login = %collaborator.login,
                    "Subscription update did not ignore the mirror"
                );
            }
            self.pacer.wait().await;
        }

        Ok(())
    }
}
