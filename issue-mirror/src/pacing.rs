//! Fixed inter-call delay.
//!
//! Every destination-mutating step is followed by exactly one [`Pacer::wait`],
//! in dry-run mode too, so the destination's abuse thresholds are never
//! approached and dry-run timing matches a live run.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::trace;

/// Sleeps a configured duration between calls.
#[derive(Debug, Default)]
pub struct Pacer {
    delay: Duration,
    waits: AtomicUsize,
}

impl Pacer {
    /// Creates a pacer with the given delay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            waits: AtomicUsize::new(0),
        }
    }

    /// Returns how many times [`Pacer::wait`] has been called.
    #[must_use]
    pub fn waits(&self) -> usize {
        self.waits.load(Ordering::Relaxed)
    }

    /// Blocks the current task for the configured delay.
    pub async fn wait(&self) {
        self.waits.fetch_add(1, Ordering::Relaxed);
        if self.delay.is_zero() {
            return;
        }
        trace!(delay_secs = self.delay.as_secs(), "Pacing");
        tokio::time::sleep(self.delay).await;
    }
}
