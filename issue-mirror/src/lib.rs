#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod client;
pub mod config;
pub mod github;
pub mod identity;
pub mod mirror;
pub mod model;
pub mod pacing;
pub mod rate_limit;
pub mod runner;
pub mod selector;
pub mod summary;
pub mod templates;

pub use client::{ApiError, DestinationClient, SourceReader};
pub use config::{ConfigError, MirrorSettings, DEFAULT_SETTINGS_FILE, SOURCE_PASSWORD_ENV};
pub use github::{GitHubDestination, GitHubSource};
pub use identity::{Collaborator, IdentityPool};
pub use mirror::{IssueOutcome, MigrationStage, Mirror, MirrorError, MirrorOptions, Operations};
pub use pacing::Pacer;
pub use rate_limit::{check_core_rate_limit, ensure_core_rate_limit, RateLimitInfo};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use selector::{IssueSelector, SelectorError};
pub use summary::RunSummary;
pub use templates::{create_handlebars_registry, ProvenanceRenderer, TemplateError, TemplateOverrides};
