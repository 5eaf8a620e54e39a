//! Settings loading.
//!
//! Settings live in a TOML file (by default `mirror.toml`):
//!
//! ```toml
//! username = "octocat"
//! password = "ghp_..."            # or SOURCE_GITHUB_TOKEN
//! enterprise = "git.example.com"
//! source = "acme/widgets"
//! mirror = "acme/widgets"
//! admin = "octocat"
//!
//! [collaborators.octocat]
//! token = "..."
//!
//! [collaborators.ghost]
//! token = "..."
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{CollaboratorSettings, MirrorSettings, SOURCE_PASSWORD_ENV};

/// Default settings file name.
pub const DEFAULT_SETTINGS_FILE: &str = "mirror.toml";
