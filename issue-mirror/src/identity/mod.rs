//! Destination identities.
//!
//! Content on the mirror is created by the same person who wrote it on the
//! source, so every collaborator gets their own authenticated session. Two
//! usernames are special: the admin, who acts whenever there is no natural
//! author, and `ghost`, which stands in for deleted source accounts.

mod collaborator;

pub use collaborator::Collaborator;

use crate::mirror::MirrorError;
use std::collections::BTreeMap;

/// Destination account the ghost identity logs in as by default.
pub const DEFAULT_GHOST_LOGIN: &str = "deleted-user";

/// One session per collaborator, keyed by source username.
#[derive(Debug)]
pub struct IdentityPool<D> {
    admin: String,
    collaborators: BTreeMap<String, Collaborator<D>>,
}

impl<D> IdentityPool<D> {
    /// Creates a pool from the configured collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::UnknownIdentity`] if `admin` is not one of the
    /// collaborators.
    pub fn new(
        admin: impl Into<String>,
        collaborators: impl IntoIterator<Item = Collaborator<D>>,
    ) -> Result<Self, MirrorError> {
        let admin = admin.into();
        let collaborators: BTreeMap<_, _> = collaborators
            .into_iter()
            .map(|collaborator| (collaborator.username.clone(), collaborator))
            .collect();

        if !collaborators.contains_key(&admin) {
            return Err(MirrorError::UnknownIdentity { username: admin });
        }

        Ok(Self {
            admin,
            collaborators,
        })
    }

    /// Returns the session acting for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::UnknownIdentity`] if no collaborator is
    /// configured under that name.
    pub fn resolve(&self, username: &str) -> Result<&Collaborator<D>, MirrorError> {
        self.collaborators
            .get(username)
            .ok_or_else(|| MirrorError::UnknownIdentity {
                username: username.to_string(),
            })
    }

    /// Resolves `username` if given, otherwise falls back to the admin.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::UnknownIdentity`] if `username` is given but
    /// not configured.
    pub fn resolve_or_admin(&self, username: Option<&str>) -> Result<&Collaborator<D>, MirrorError> {
        match username {
            Some(username) => self.resolve(username),
            None => Ok(self.admin()),
        }
    }

    /// Returns the admin collaborator.
    #[must_use]
    pub fn admin(&self) -> &Collaborator<D> {
        // `new` guarantees the admin entry exists and the map is never mutated.
        &self.collaborators[&self.admin]
    }

    /// Iterates collaborators ordered by username.
    pub fn iter(&self) -> impl Iterator<Item = &Collaborator<D>> {
        self.collaborators.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GHOST_USERNAME;

    fn pool() -> IdentityPool<&'static str> {
        IdentityPool::new(
            "admin",
            [
                Collaborator::new("admin", "session-admin"),
                Collaborator::new("alice", "session-alice"),
                Collaborator::ghost(DEFAULT_GHOST_LOGIN, "session-ghost"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn resolves_configured_collaborators() {
        let pool = pool();
        let alice = pool.resolve("alice").unwrap();
        assert_eq!(alice.login, "alice");
        assert_eq!(alice.session, "session-alice");
    }

    #[test]
    fn ghost_logs_in_as_placeholder_account() {
        let pool = pool();
        let ghost = pool.resolve(GHOST_USERNAME).unwrap();
        assert_eq!(ghost.username, GHOST_USERNAME);
        assert_eq!(ghost.login, DEFAULT_GHOST_LOGIN);
    }

    #[test]
    fn unknown_username_fails() {
        let pool = pool();
        assert!(matches!(
            pool.resolve("mallory"),
            Err(MirrorError::UnknownIdentity { username }) if username == "mallory"
        ));
    }

    #[test]
    fn falls_back_to_admin() {
        let pool = pool();
        assert_eq!(pool.resolve_or_admin(None).unwrap().login, "admin");
        assert_eq!(pool.resolve_or_admin(Some("alice")).unwrap().login, "alice");
        assert!(pool.resolve_or_admin(Some("mallory")).is_err());
    }

    #[test]
    fn requires_admin_collaborator() {
        let result = IdentityPool::new("root", [Collaborator::new("alice", ())]);
        assert!(matches!(
            result,
            Err(MirrorError::UnknownIdentity { username }) if username == "root"
        ));
    }

    #[test]
    fn iterates_in_username_order() {
        let pool = pool();
        let names: Vec<_> = pool.iter().map(|c| c.username.as_str()).collect();
        assert_eq!(names, vec!["admin", "alice", "ghost"]);
    }
}
