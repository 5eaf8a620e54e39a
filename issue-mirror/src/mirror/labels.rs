//! Label synchronization.

use super::{Mirror, MirrorError};
use crate::client::{DestinationClient, SourceReader};
use crate::summary::RunSummary;
use tracing::{info, warn};

impl<S, D> Mirror<S, D>
where
    S: SourceReader,
    D: DestinationClient,
{
    /// Copies every source label to the mirror by name and color.
    ///
    /// Labels carry no author, so the admin creates them all. A label the
    /// destination refuses (typically because it already exists) is logged
    /// and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Api`] if the source cannot be read or a
    /// request fails without a response.
    pub async fn sync_labels(&self, summary: &mut RunSummary) -> Result<(), MirrorError> {
        info!(source = %self.source_name, mirror = %self.mirror_name, "Mirroring labels");

        let labels = self.source.list_labels().await?;
        let admin = self.identities.admin();

        for label in &labels {
            info!(
                name = %label.name,
                color = %label.color,
                actor = %admin.login,
                dry_run = self.dry_run,
                "Creating label"
            );

            if self.dry_run {
                summary.labels_created += 1;
            } else {
                match admin.session.create_label(&label.name, &label.color).await {
                    Ok(()) => summary.labels_created += 1,
                    Err(e) if e.is_rejection() => {
                        warn!(name = %label.name, error = %e, "Label rejected, continuing");
                        summary.labels_rejected += 1;
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            self.pacer.wait().await;
        }

        info!(count = labels.len(), "All labels mirrored");
        Ok(())
    }
}
