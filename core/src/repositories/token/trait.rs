//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken persistence operations
///
/// Records are keyed by the hash of the bearer secret, with a secondary
/// index on the owning user.
///
/// # Security Considerations
/// - Only token hashes are stored
/// - A hash is unique among every token ever issued, revoked ones included
/// - Revocation is one-way
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token
    ///
    /// A nil `id` is replaced with a fresh one.
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The stored token
    /// * `Err(DomainError::Store(StoreError::DuplicateToken))` - Hash already issued
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found (possibly revoked or expired)
    /// * `Ok(None)` - No token with that hash
    /// * `Err(DomainError)` - Store failure
    ///
    /// # Example
    /// ```no_run
    /// # use aa_core::repositories::TokenRepository;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_refresh_token("sha256_hash_of_token").await? {
    ///     Some(token) if token.is_valid() => println!("usable for {}", token.user_id),
    ///     Some(_) => println!("revoked or expired"),
    ///     None => println!("unknown token"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Find every refresh token issued to a user, revoked ones included
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError>;

    /// Revoke a refresh token by ID
    ///
    /// # Returns
    /// * `Ok(true)` - Token was revoked
    /// * `Ok(false)` - No such token (not an error)
    async fn revoke_refresh_token(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Revoke all refresh tokens owned by a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens newly revoked
    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Atomically revoke a presented token and store its replacement
    ///
    /// Either both happen or neither does. Of several concurrent calls with
    /// the same `token_hash`, at most one succeeds.
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The presented token, now revoked
    /// * `Err(StoreError::RefreshTokenNotFound)` - Unknown hash
    /// * `Err(StoreError::RefreshTokenRevoked)` - Already revoked (reuse or lost race)
    /// * `Err(StoreError::RefreshTokenExpired)` - Past its expiry
    /// * `Err(StoreError::DuplicateToken)` - Replacement hash already issued
    async fn rotate_refresh_token(
        &self,
        token_hash: &str,
        replacement: RefreshToken,
    ) -> Result<RefreshToken, DomainError>;
}
