//! Runner configuration.

use crate::config::MirrorSettings;
use crate::mirror::Operations;
use std::time::Duration;

/// Everything a run needs, fixed before any synchronizer starts.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Parsed settings file.
    settings: MirrorSettings,
    /// Synchronizers to invoke.
    operations: Operations,
    /// Whether to preview without mutating the mirror.
    dry_run: bool,
    /// Delay after each destination-mutating step.
    delay: Duration,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(
        settings: MirrorSettings,
        operations: Operations,
        dry_run: bool,
        delay_secs: u64,
    ) -> Self {
        Self {
            settings,
            operations,
            dry_run,
            delay: Duration::from_secs(delay_secs),
        }
    }

    /// Overrides the source password, e.g. from the command line.
    pub fn with_password(mut self, password: String) -> Self {
        self.settings.password = Some(password);
        self
    }

    /// Returns the settings.
    pub fn settings(&self) -> &MirrorSettings {
        &self.settings
    }

    /// Returns the requested synchronizers.
    pub fn operations(&self) -> &Operations {
        &self.operations
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the pacing delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
