//! A single destination identity.

use crate::model::GHOST_USERNAME;

/// A configured identity with its own destination session.
#[derive(Debug, Clone)]
pub struct Collaborator<D> {
    /// Username as it appears on the source.
    pub username: String,
    /// Account name on the destination.
    pub login: String,
    /// Authenticated destination session.
    pub session: D,
}

impl<D> Collaborator<D> {
    /// Creates a collaborator whose destination login matches the source
    /// username.
    pub fn new(username: impl Into<String>, session: D) -> Self {
        let username = username.into();
        Self {
            login: username.clone(),
            username,
            session,
        }
    }

    /// Creates the ghost collaborator, logging in as `login` on the
    /// destination.
    pub fn ghost(login: impl Into<String>, session: D) -> Self {
        Self {
            username: GHOST_USERNAME.to_string(),
            login: login.into(),
            session,
        }
    }
}
