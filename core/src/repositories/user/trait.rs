//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{PasswordCredential, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations must be safe for concurrent use and must return
/// independent copies from every read.
///
/// # Atomicity
/// - `create_user` must never let two users share a login
/// - `update_password` must bump the version exactly once per call
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user at version 1
    ///
    /// # Arguments
    /// * `login` - Unique, case-sensitive login
    /// * `password` - Initial password credential
    ///
    /// # Returns
    /// * `Ok(User)` - The created user with store-assigned ID and timestamps
    /// * `Err(DomainError::Store(StoreError::LoginTaken))` - Login already present
    ///
    /// # Example
    /// ```no_run
    /// # use aa_core::repositories::UserRepository;
    /// # use aa_core::domain::entities::user::PasswordCredential;
    /// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let user = repo
    ///     .create_user("alice", PasswordCredential::Hashed("digest".to_string()))
    ///     .await?;
    /// assert_eq!(user.user_ver, 1);
    /// # Ok(())
    /// # }
    /// ```
    async fn create_user(&self, login: &str, password: PasswordCredential) -> Result<User, DomainError>;

    /// Find a user by login
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that login
    /// * `Err(DomainError)` - Store failure
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by ID
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that ID
    /// * `Err(DomainError)` - Store failure
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Replace the mutable fields of an existing user
    ///
    /// Copies password credential, version and group memberships and stamps
    /// the update time. The record is matched by login, falling back to ID.
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user after the update
    /// * `Err(DomainError::Store(StoreError::UserNotFound))` - No matching record
    async fn update_user(&self, user: &User) -> Result<User, DomainError>;

    /// Atomically set a new password digest and increment the version
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user at its new version
    /// * `Err(DomainError::Store(StoreError::UserNotFound))` - No such login
    async fn update_password(&self, login: &str, digest: String) -> Result<User, DomainError>;
}
