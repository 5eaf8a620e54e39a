//! Mirror settings deserialization and validation.

use crate::config::ConfigError;
use crate::github::{enterprise_endpoint, DEFAULT_SOURCE_ENDPOINT};
use crate::identity::DEFAULT_GHOST_LOGIN;
use crate::model::{RepoId, GHOST_USERNAME};
use crate::templates::TemplateOverrides;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Environment variable consulted when the settings carry no password or a
/// blank one.
pub const SOURCE_PASSWORD_ENV: &str = "SOURCE_GITHUB_TOKEN";

/// Credentials of one destination collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CollaboratorSettings {
    /// Personal access token on the destination.
    pub token: String,
}

/// Parsed contents of the settings file.
///
/// Credentials and repository identifiers are optional here; the runner
/// reports which of them are missing before it starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MirrorSettings {
    /// Source login.
    pub username: Option<String>,

    /// Source password or personal access token.
    pub password: Option<String>,

    /// Source API base URL.
    #[serde(default = "default_source_endpoint")]
    pub source_endpoint: String,

    /// Destination enterprise host name (assumed to be HTTPS).
    pub enterprise: Option<String>,

    /// Source repository, `owner/name`.
    pub source: Option<String>,

    /// Mirror repository, `owner/name`.
    pub mirror: Option<String>,

    /// Collaborator who acts when no original author applies.
    pub admin: String,

    /// Destination account behind the ghost identity.
    #[serde(default = "default_ghost_login")]
    pub ghost_login: String,

    /// Destination identities keyed by source username.
    #[serde(default)]
    pub collaborators: BTreeMap<String, CollaboratorSettings>,

    /// Provenance text overrides.
    #[serde(default)]
    pub templates: TemplateOverrides,

    /// Wait for the source rate limit to reset when it runs low.
    #[serde(default = "default_rate_limit_guard")]
    pub rate_limit_guard: bool,
}

pub(crate) fn default_source_endpoint() -> String {
    DEFAULT_SOURCE_ENDPOINT.to_string()
}

pub(crate) fn default_ghost_login() -> String {
    DEFAULT_GHOST_LOGIN.to_string()
}

fn default_rate_limit_guard() -> bool {
    true
}

impl MirrorSettings {
    /// Loads and validates settings from a TOML file.
    ///
    /// A missing or blank `password` falls back to [`SOURCE_PASSWORD_ENV`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, not valid
    /// TOML, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parses and validates settings from TOML text.
    ///
    /// `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the content is not valid TOML or fails
    /// validation.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut settings: Self = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        if settings.password.as_deref().is_none_or(|value| value.trim().is_empty()) {
            settings.password = std::env::var(SOURCE_PASSWORD_ENV)
                .ok()
                .filter(|value| !value.is_empty());
        }

        settings.validate(path)?;
        Ok(settings)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if validation fails.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        if self.admin.trim().is_empty() {
            return Err(invalid("admin must not be empty".to_string()));
        }

        if !self.collaborators.contains_key(&self.admin) {
            return Err(invalid(format!(
                "admin '{}' must be listed under [collaborators]",
                self.admin
            )));
        }

        if !self.collaborators.contains_key(GHOST_USERNAME) {
            return Err(invalid(format!(
                "[collaborators.{GHOST_USERNAME}] is required for content by deleted accounts"
            )));
        }

        if let Some((username, _)) = self
            .collaborators
            .iter()
            .find(|(_, collaborator)| collaborator.token.trim().is_empty())
        {
            return Err(invalid(format!("collaborator '{username}' has an empty token")));
        }

        for (key, value) in [("source", &self.source), ("mirror", &self.mirror)] {
            if let Some(value) = value {
                if RepoId::parse(value).is_none() {
                    return Err(invalid(format!("{key} must be 'owner/name', got '{value}'")));
                }
            }
        }

        Url::parse(&self.source_endpoint)
            .map_err(|e| invalid(format!("source-endpoint is not a valid URL: {e}")))?;

        if let Some(host) = &self.enterprise {
            let endpoint = enterprise_endpoint(host);
            let url = Url::parse(&endpoint)
                .map_err(|e| invalid(format!("enterprise host '{host}' is not valid: {e}")))?;
            if url.path() != "/api/v3" {
                return Err(invalid(format!(
                    "enterprise must be a host name without a path, got '{host}'"
                )));
            }
        }

        if self.ghost_login.trim().is_empty() {
            return Err(invalid("ghost-login must not be empty".to_string()));
        }

        Ok(())
    }
}
