//! Mirroring error types.

use crate::client::ApiError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that stop a synchronizer.
///
/// Every variant is fatal for the run except [`MirrorError::NoMilestones`],
/// which only ends milestone synchronization.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// An author, committer or closer has no configured collaborator.
    #[error("No collaborator configured for '{username}'")]
    UnknownIdentity { username: String },

    /// Milestone synchronization was requested but the source has none.
    #[error("Source repository has no milestones")]
    NoMilestones,

    /// Source or destination API failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Provenance text could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
}
