//! Runner error types.

/// Errors that can occur while running the mirror.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A credential or repository identifier needed to start is absent.
    #[error("Missing required setting '{field}'")]
    MissingCredentials { field: &'static str },

    /// Settings loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Mirroring errors.
    #[error(transparent)]
    Mirror(#[from] crate::mirror::MirrorError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),
}
