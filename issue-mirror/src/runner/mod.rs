//! Wires settings to the GitHub clients and runs the mirror.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::config::{ConfigError, MirrorSettings};
use crate::github::{build_session, enterprise_endpoint, GitHubDestination, GitHubSource};
use crate::identity::{Collaborator, IdentityPool};
use crate::mirror::{Mirror, MirrorOptions};
use crate::model::{RepoId, GHOST_USERNAME};
use crate::summary::RunSummary;
use tracing::{info, warn};

/// Settings that must be present before anything runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Source login.
    pub username: String,
    /// Source password or token.
    pub password: String,
    /// Destination host.
    pub enterprise: String,
    /// Source repository.
    pub source: RepoId,
    /// Mirror repository.
    pub mirror: RepoId,
}

impl Credentials {
    /// Extracts the mandatory settings.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::MissingCredentials`] naming the first absent
    /// or blank field, or [`RunnerError::Config`] if a repository identifier
    /// is malformed.
    pub fn from_settings(settings: &MirrorSettings) -> Result<Self, RunnerError> {
        fn required(value: &Option<String>, field: &'static str) -> Result<String, RunnerError> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .ok_or(RunnerError::MissingCredentials { field })
        }

        fn repository(value: String, field: &str) -> Result<RepoId, RunnerError> {
            RepoId::parse(&value).ok_or_else(|| {
                RunnerError::Config(ConfigError::ValidationError {
                    path: field.to_string(),
                    message: format!("'{value}' is not 'owner/name'"),
                })
            })
        }

        let username = required(&settings.username, "username")?;
        let password = required(&settings.password, "password")?;
        let source = repository(required(&settings.source, "source")?, "source")?;
        let mirror = repository(required(&settings.mirror, "mirror")?, "mirror")?;
        let enterprise = required(&settings.enterprise, "enterprise")?;

        Ok(Self {
            username,
            password,
            enterprise,
            source,
            mirror,
        })
    }
}

/// A fully wired mirror over GitHub clients.
pub struct Runner {
    config: RunnerConfig,
    credentials: Credentials,
    mirror: Mirror<GitHubSource, GitHubDestination>,
}

impl Runner {
    /// Builds the source session and one destination session per
    /// collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::MissingCredentials`] before any client is
    /// built if a mandatory setting is absent, or an error if a session or
    /// the identity pool cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let settings = config.settings();
        let credentials = Credentials::from_settings(settings)?;

        let source_session = build_session(
            &settings.source_endpoint,
            &credentials.username,
            &credentials.password,
        )?;
        let source = GitHubSource::new(
            source_session,
            credentials.source.clone(),
            settings.rate_limit_guard,
        );

        let endpoint = enterprise_endpoint(&credentials.enterprise);
        let mut collaborators = Vec::with_capacity(settings.collaborators.len());
        for (username, collaborator) in &settings.collaborators {
            let login = if username == GHOST_USERNAME {
                settings.ghost_login.as_str()
            } else {
                username.as_str()
            };
            let session = build_session(&endpoint, login, &collaborator.token)?;
            let destination = GitHubDestination::new(session, credentials.mirror.clone());

            collaborators.push(if username == GHOST_USERNAME {
                Collaborator::ghost(login, destination)
            } else {
                Collaborator::new(username.as_str(), destination)
            });
        }
        let identities = IdentityPool::new(settings.admin.as_str(), collaborators)?;

        let options = MirrorOptions {
            source_name: credentials.source.to_string(),
            mirror_name: credentials.mirror.to_string(),
            dry_run: config.dry_run(),
            delay: config.delay(),
            templates: settings.templates.clone(),
        };
        let mirror = Mirror::new(source, identities, options)?;

        Ok(Self {
            config,
            credentials,
            mirror,
        })
    }

    /// Returns the source repository.
    pub fn source(&self) -> &RepoId {
        &self.credentials.source
    }

    /// Returns the mirror repository.
    pub fn mirror(&self) -> &RepoId {
        &self.credentials.mirror
    }

    /// Executes the requested synchronizers.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Mirror`] on the first fatal mirroring error.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let operations = self.config.operations();
        if operations.is_empty() {
            warn!("Nothing to do; pass --notifications, --milestones, --labels or --issues");
            return Ok(RunSummary::new(self.config.dry_run()));
        }

        info!(
            source = %self.credentials.source,
            mirror = %self.credentials.mirror,
            dry_run = self.config.dry_run(),
            delay_secs = self.config.delay().as_secs(),
            "Starting mirror"
        );
        Ok(self.mirror.run(operations).await?)
    }
}
