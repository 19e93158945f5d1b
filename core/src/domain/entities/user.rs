//! User entity representing an administrative account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Version counter assigned to newly created users
pub const INITIAL_USER_VERSION: i64 = 1;

/// Password credential held for a user
///
/// `Disabled` marks accounts that may only sign in through an external
/// identity provider; it never verifies against any password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "digest", rename_all = "snake_case")]
pub enum PasswordCredential {
    /// Opaque digest produced by the password hasher
    Hashed(String),
    /// Password login disabled
    Disabled,
}

impl PasswordCredential {
    /// Returns the digest when password login is enabled
    pub fn digest(&self) -> Option<&str> {
        match self {
            PasswordCredential::Hashed(digest) => Some(digest),
            PasswordCredential::Disabled => None,
        }
    }

    /// Whether this credential can ever satisfy a password check
    pub fn allows_password_login(&self) -> bool {
        matches!(self, PasswordCredential::Hashed(_))
    }
}

/// User entity representing a registered administrative user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store
    pub id: Uuid,

    /// Unique, case-sensitive login
    pub login: String,

    /// Password credential (never returned to transport callers)
    pub password: PasswordCredential,

    /// Monotonic version counter, bumped once per password change
    pub user_ver: i64,

    /// Group memberships
    pub groups: BTreeSet<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance at version 1
    pub fn new(login: impl Into<String>, password: PasswordCredential) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            login: login.into(),
            password,
            user_ver: INITIAL_USER_VERSION,
            groups: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the password digest and bumps the version counter
    ///
    /// Every access token minted at the previous version becomes stale.
    pub fn change_password(&mut self, digest: String) {
        self.password = PasswordCredential::Hashed(digest);
        self.user_ver += 1;
        self.updated_at = Utc::now();
    }

    /// Adds a group membership, returning false if already a member
    pub fn join_group(&mut self, group: impl Into<String>) -> bool {
        let added = self.groups.insert(group.into());
        if added {
            self.updated_at = Utc::now();
        }
        added
    }

    /// Group memberships as a list, for token claims
    pub fn group_list(&self) -> Vec<String> {
        self.groups.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_starts_at_version_one() {
        let user = User::new("alice", PasswordCredential::Hashed("digest".to_string()));

        assert_eq!(user.login, "alice");
        assert_eq!(user.user_ver, INITIAL_USER_VERSION);
        assert!(user.groups.is_empty());
        assert!(user.password.allows_password_login());
    }

    #[test]
    fn test_change_password_bumps_version_once() {
        let mut user = User::new("alice", PasswordCredential::Hashed("old".to_string()));
        let before = user.updated_at;

        user.change_password("new".to_string());

        assert_eq!(user.user_ver, 2);
        assert_eq!(user.password.digest(), Some("new"));
        assert!(user.updated_at >= before);
    }

    #[test]
    fn test_disabled_credential_has_no_digest() {
        let user = User::new("bob@example.com", PasswordCredential::Disabled);
        assert_eq!(user.password.digest(), None);
        assert!(!user.password.allows_password_login());
    }

    #[test]
    fn test_enabling_password_on_disabled_account() {
        let mut user = User::new("bob@example.com", PasswordCredential::Disabled);
        user.change_password("digest".to_string());
        assert!(user.password.allows_password_login());
    }

    #[test]
    fn test_group_membership_is_unique() {
        let mut user = User::new("alice", PasswordCredential::Disabled);
        assert!(user.join_group("admins"));
        assert!(!user.join_group("admins"));
        assert!(user.join_group("auditors"));
        assert_eq!(user.group_list(), vec!["admins".to_string(), "auditors".to_string()]);
    }
}
