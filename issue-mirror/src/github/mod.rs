//! GitHub and GitHub Enterprise clients built on octocrab.
//!
//! The source side uses one session with the operator's credentials; the
//! destination side gets one session per collaborator, all pointed at the
//! enterprise instance.

mod convert;
mod destination;
mod source;
mod wire;

pub use destination::GitHubDestination;
pub use source::GitHubSource;

use octocrab::Octocrab;

/// Default API endpoint of the public service.
pub const DEFAULT_SOURCE_ENDPOINT: &str = "https://api.github.com";

/// Returns the REST API base URL of an enterprise host.
#[must_use]
pub fn enterprise_endpoint(host: &str) -> String {
    format!("https://{}/api/v3", host.trim_end_matches('/'))
}

/// Builds a session authenticated with a login and password or token.
///
/// # Errors
///
/// Returns an error if the endpoint is not a valid URI or the client cannot
/// be constructed.
pub fn build_session(endpoint: &str, login: &str, secret: &str) -> Result<Octocrab, octocrab::Error> {
    Octocrab::builder()
        .base_uri(endpoint.to_string())?
        .basic_auth(login.to_string(), secret.to_string())
        .build()
}

/// Installs a process-wide TLS crypto provider for tests that build
/// sessions.
#[cfg(test)]
pub(crate) fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}
