//! Source-side rate limit guard.
//!
//! The public service allows a fixed number of core requests per hour. A
//! long mirror run reads every issue, comment and commit list, so before
//! each read we check what is left and sleep until the window resets once
//! it runs low.

use chrono::{DateTime, TimeZone, Utc};
use octocrab::Octocrab;
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for a rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Core rate limit snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Unix timestamp when the window resets.
    pub reset: u64,
    /// Requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Returns the reset time, if it is representable.
    #[must_use]
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.reset)
            .ok()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    }
}

/// Fetches the core rate limit of the authenticated session.
///
/// # Errors
///
/// Returns an error if the rate limit route fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: core.remaining as u32,
        reset: core.reset,
        limit: core.limit as u32,
    })
}

/// Computes how long to wait before the next request, if at all.
///
/// `now` is a Unix timestamp in seconds. Waits are capped at one hour.
#[must_use]
pub fn wait_duration(info: &RateLimitInfo, now: u64) -> Option<Duration> {
    if info.remaining >= MIN_REMAINING_THRESHOLD || info.reset <= now {
        return None;
    }

    let wait_secs = info.reset - now;
    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    Some(Duration::from_secs(wait_secs.min(MAX_WAIT_SECS)))
}

/// Checks the core rate limit and sleeps until the reset when it is low.
///
/// # Errors
///
/// Returns an error if the rate limit check fails.
pub async fn ensure_core_rate_limit(octocrab: &Octocrab) -> Result<(), octocrab::Error> {
    let info = check_core_rate_limit(octocrab).await?;
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();

    if let Some(wait) = wait_duration(&info, now) {
        let reset_at = info
            .reset_at()
            .map(|reset| reset.to_rfc3339())
            .unwrap_or_default();
        info!(
            remaining = info.remaining,
            limit = info.limit,
            wait_secs = wait.as_secs(),
            reset_at = %reset_at,
            "Source rate limit low, waiting for reset"
        );
        tokio::time::sleep(wait).await;
    }
    Ok(())
}
