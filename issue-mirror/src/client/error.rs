//! API client error types.

use thiserror::Error;

/// Errors raised by the source and destination clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with an error status.
    #[error("GitHub API rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Any other transport or decoding failure.
    #[error("GitHub API error: {0}")]
    Transport(#[source] octocrab::Error),

    /// A fetched record could not be turned into a typed entity.
    #[error("Malformed {kind} record: {message}")]
    MalformedRecord { kind: &'static str, message: String },
}

impl From<octocrab::Error> for ApiError {
    fn from(error: octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => Self::Rejected {
                status: source.status_code.as_u16(),
                message: source.message,
            },
            other => Self::Transport(other),
        }
    }
}

impl ApiError {
    /// Returns true if the service refused the request, as opposed to the
    /// request never completing.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
