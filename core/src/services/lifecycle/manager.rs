//! Credential lifecycle manager implementation

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::domain::entities::user::{PasswordCredential, User};
use crate::domain::value_objects::{PasswordChange, RevocationStatus};
use crate::errors::{AuthError, DomainError, DomainResult, IdentityError, StoreError};
use crate::repositories::CredentialStore;
use crate::services::signer::{generate_refresh_secret, hash_refresh_token, TokenSigner};
use crate::services::traits::{IdentityVerifier, PasswordHasher};

use super::config::LifecycleConfig;

/// Orchestrates every credential operation against one shared store
///
/// Credential rejections surface as `DomainError::Auth`; anything else is a
/// service malfunction.
pub struct CredentialLifecycleManager<S, H, V>
where
    S: CredentialStore,
    H: PasswordHasher,
    V: IdentityVerifier,
{
    /// Shared credential store
    store: Arc<S>,
    /// Password hashing capability
    hasher: Arc<H>,
    /// External identity capability
    verifier: Arc<V>,
    /// Access token signer
    signer: Arc<TokenSigner>,
    config: LifecycleConfig,
}

impl<S, H, V> Clone for CredentialLifecycleManager<S, H, V>
where
    S: CredentialStore,
    H: PasswordHasher,
    V: IdentityVerifier,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            hasher: self.hasher.clone(),
            verifier: self.verifier.clone(),
            signer: self.signer.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S, H, V> CredentialLifecycleManager<S, H, V>
where
    S: CredentialStore,
    H: PasswordHasher,
    V: IdentityVerifier,
{
    /// Create a new lifecycle manager
    ///
    /// # Arguments
    ///
    /// * `store` - Credential store shared by all requests
    /// * `hasher` - Password hashing capability
    /// * `verifier` - External identity verifier
    /// * `signer` - Access token signer
    /// * `config` - Lifecycle configuration
    pub fn new(
        store: Arc<S>,
        hasher: Arc<H>,
        verifier: Arc<V>,
        signer: Arc<TokenSigner>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            store,
            hasher,
            verifier,
            signer,
            config,
        }
    }

    /// The store this manager operates on
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Liveness check
    pub async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }

    /// Register a new user and sign them in
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Tokens for the new user
    /// * `Err(AuthError::InvalidLogin)` - Login or password empty
    /// * `Err(AuthError::LoginAlreadyInUse)` - Login taken
    pub async fn register(&self, login: &str, password: &str) -> DomainResult<TokenPair> {
        if login.is_empty() || password.is_empty() {
            tracing::warn!(event = "registration_rejected", "Empty login or password");
            return Err(AuthError::InvalidLogin.into());
        }

        let digest = self.hash_password(password).await?;
        let user = self
            .store
            .create_user(login, PasswordCredential::Hashed(digest))
            .await
            .map_err(|e| match e {
                DomainError::Store(StoreError::LoginTaken { .. }) => {
                    tracing::info!(
                        login = login,
                        event = "registration_rejected",
                        "Login already in use"
                    );
                    DomainError::Auth(AuthError::LoginAlreadyInUse)
                }
                other => other,
            })?;

        tracing::info!(
            user_id = %user.id,
            login = %user.login,
            event = "user_registered",
            "Registered new user"
        );

        self.issue_token_pair(&user).await
    }

    /// Sign in with login and password
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Fresh tokens
    /// * `Err(AuthError::UserNotFound)` - Unknown login
    /// * `Err(AuthError::InvalidPassword)` - Wrong password or password login disabled
    pub async fn authenticate(&self, login: &str, password: &str) -> DomainResult<TokenPair> {
        let user = self.require_user_by_login(login).await?;

        let digest = match user.password.digest() {
            Some(digest) => digest,
            None => {
                tracing::warn!(
                    user_id = %user.id,
                    event = "authentication_failed",
                    reason = "password_login_disabled",
                    "Password login attempted on federated account"
                );
                return Err(AuthError::InvalidPassword.into());
            }
        };

        let matches = self
            .hasher
            .verify(digest, password)
            .await
            .map_err(|e| hasher_failure("verify", e))?;
        if !matches {
            tracing::warn!(
                user_id = %user.id,
                event = "authentication_failed",
                reason = "invalid_password",
                "Invalid password"
            );
            return Err(AuthError::InvalidPassword.into());
        }

        tracing::info!(user_id = %user.id, event = "user_authenticated", "User authenticated");
        self.issue_token_pair(&user).await
    }

    /// Change a user's password
    ///
    /// Bumps the version counter, which makes every earlier access token
    /// stale, then revokes all refresh tokens and issues a new pair. A failed
    /// revoke is reported through [`RevocationStatus::Failed`] instead of
    /// failing the call.
    ///
    /// # Returns
    ///
    /// * `Ok(PasswordChange)` - New tokens and the revocation outcome
    /// * `Err(AuthError::UserNotFound)` - Unknown login
    pub async fn update_password(&self, login: &str, new_password: &str) -> DomainResult<PasswordChange> {
        self.require_user_by_login(login).await?;

        let digest = self.hash_password(new_password).await?;
        let user = self
            .store
            .update_password(login, digest)
            .await
            .map_err(|e| match e {
                DomainError::Store(StoreError::UserNotFound) => DomainError::Auth(AuthError::UserNotFound),
                other => other,
            })?;

        tracing::info!(
            user_id = %user.id,
            user_ver = user.user_ver,
            event = "password_changed",
            "Password changed"
        );

        let revocation = match self.store.revoke_all_user_tokens(user.id).await {
            Ok(count) => {
                tracing::info!(
                    user_id = %user.id,
                    revoked = count,
                    event = "refresh_tokens_revoked",
                    "Revoked refresh tokens after password change"
                );
                RevocationStatus::Revoked { count }
            }
            Err(e) => {
                tracing::error!(
                    user_id = %user.id,
                    error = %e,
                    event = "refresh_token_revocation_failed",
                    "Failed to revoke refresh tokens after password change"
                );
                RevocationStatus::Failed { reason: e.to_string() }
            }
        };

        let tokens = self.issue_token_pair(&user).await?;
        Ok(PasswordChange { tokens, revocation })
    }

    /// Exchange a refresh token for a new pair
    ///
    /// The presented token is revoked and replaced in one store step, so it
    /// can succeed at most once.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Rotated tokens
    /// * `Err(AuthError::InvalidToken)` - Unknown, revoked, expired or pre-dates a password change
    /// * `Err(AuthError::UserNotFound)` - Owner no longer exists
    pub async fn refresh_access_token(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let token_hash = hash_refresh_token(refresh_token);

        let current = self
            .store
            .find_refresh_token(&token_hash)
            .await?
            .ok_or(AuthError::InvalidToken)?;
        if !current.is_valid() {
            tracing::warn!(
                token_id = %current.id,
                user_id = %current.user_id,
                revoked = current.is_revoked,
                event = "refresh_rejected",
                "Refresh token no longer usable"
            );
            return Err(AuthError::InvalidToken.into());
        }

        let user = self
            .store
            .find_by_id(current.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if current.user_ver != user.user_ver {
            tracing::warn!(
                token_id = %current.id,
                user_id = %user.id,
                token_ver = current.user_ver,
                user_ver = user.user_ver,
                event = "refresh_rejected",
                "Refresh token issued before a password change"
            );
            return Err(AuthError::InvalidToken.into());
        }

        let access_token = self.signer.issue(user.id, &user.login, user.user_ver, user.group_list())?;
        let secret = generate_refresh_secret();
        let replacement = RefreshToken::new(
            user.id,
            hash_refresh_token(&secret),
            user.user_ver,
            self.config.refresh_token_ttl,
        );

        self.store
            .rotate_refresh_token(&token_hash, replacement)
            .await
            .map_err(|e| match e {
                DomainError::Store(
                    StoreError::RefreshTokenNotFound
                    | StoreError::RefreshTokenRevoked
                    | StoreError::RefreshTokenExpired,
                ) => {
                    tracing::warn!(
                        token_id = %current.id,
                        user_id = %user.id,
                        event = "refresh_rejected",
                        "Refresh token rotated concurrently"
                    );
                    DomainError::Auth(AuthError::InvalidToken)
                }
                other => other,
            })?;

        tracing::info!(user_id = %user.id, event = "refresh_rotated", "Refresh token rotated");

        Ok(TokenPair::new(
            access_token,
            secret,
            self.signer.access_ttl(),
            self.config.refresh_token_ttl,
        ))
    }

    /// Validate an access token against the signer and the owner's current version
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The token is current
    /// * `Err(AuthError::InvalidToken)` - Bad signature, expired, malformed or foreign
    /// * `Err(AuthError::UserNotFound)` - No user holds the token's login, or it
    ///   belongs to a different user id
    /// * `Err(AuthError::StaleToken)` - Issued before a password change
    pub async fn validate_access_token(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.signer.parse(token).map_err(|e| {
            tracing::debug!(error = %e, event = "access_token_rejected", "Access token failed verification");
            DomainError::Auth(AuthError::InvalidToken)
        })?;
        let user_id = claims.user_id().map_err(|_| AuthError::InvalidToken)?;

        let user = self
            .store
            .find_by_login(&claims.login)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if user.id != user_id {
            tracing::warn!(
                user_id = %user.id,
                subject = %user_id,
                event = "access_token_subject_mismatch",
                "Access token login belongs to another user"
            );
            return Err(AuthError::UserNotFound.into());
        }
        if claims.user_ver != user.user_ver {
            tracing::debug!(
                user_id = %user.id,
                token_ver = claims.user_ver,
                user_ver = user.user_ver,
                event = "access_token_stale",
                "Access token pre-dates the current version"
            );
            return Err(AuthError::StaleToken.into());
        }

        Ok(claims)
    }

    /// Sign in with a third-party identity assertion
    ///
    /// The first sign-in for an email provisions an account with password
    /// login disabled. Concurrent first sign-ins resolve to the same account.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Tokens for the provisioned or existing user
    /// * `Err(AuthError::InvalidToken)` - Assertion rejected or provider failure
    pub async fn authenticate_external(&self, assertion: &str) -> DomainResult<TokenPair> {
        let identity = self.verifier.verify(assertion).await.map_err(|e| {
            match &e {
                IdentityError::NotConfigured | IdentityError::Unavailable { .. } => tracing::error!(
                    error = %e,
                    event = "external_identity_failed",
                    "Identity provider unusable"
                ),
                _ => tracing::warn!(
                    error = %e,
                    event = "external_identity_rejected",
                    "Identity assertion rejected"
                ),
            }
            DomainError::Auth(AuthError::InvalidToken)
        })?;

        let user = match self.store.find_by_login(&identity.email).await? {
            Some(user) => user,
            None => self.provision_external_user(&identity.email).await?,
        };

        tracing::info!(
            user_id = %user.id,
            event = "external_user_authenticated",
            "User authenticated through external identity"
        );
        self.issue_token_pair(&user).await
    }

    pub async fn create_group(&self, name: &str, description: &str) -> DomainResult<Uuid> {
        let id = self.store.create_group(name, description).await?;
        tracing::info!(group_id = %id, name = name, event = "group_created", "Group created");
        Ok(id)
    }

    pub async fn create_permission(&self, name: &str, description: &str) -> DomainResult<Uuid> {
        let id = self.store.create_permission(name, description).await?;
        tracing::info!(permission_id = %id, name = name, event = "permission_created", "Permission created");
        Ok(id)
    }

    pub async fn create_scope(&self, name: &str, description: &str) -> DomainResult<Uuid> {
        let id = self.store.create_scope(name, description).await?;
        tracing::info!(scope_id = %id, name = name, event = "scope_created", "Scope created");
        Ok(id)
    }

    async fn provision_external_user(&self, email: &str) -> DomainResult<User> {
        match self.store.create_user(email, PasswordCredential::Disabled).await {
            Ok(user) => {
                tracing::info!(
                    user_id = %user.id,
                    login = %user.login,
                    event = "external_user_provisioned",
                    "Provisioned user from external identity"
                );
                Ok(user)
            }
            // Lost a concurrent provisioning race
            Err(DomainError::Store(StoreError::LoginTaken { .. })) => self
                .store
                .find_by_login(email)
                .await?
                .ok_or_else(|| DomainError::Internal {
                    message: "provisioned user vanished".to_string(),
                }),
            Err(e) => Err(e),
        }
    }

    async fn require_user_by_login(&self, login: &str) -> DomainResult<User> {
        match self.store.find_by_login(login).await? {
            Some(user) => Ok(user),
            None => {
                tracing::info!(login = login, event = "user_not_found", "No user with this login");
                Err(AuthError::UserNotFound.into())
            }
        }
    }

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        self.hasher
            .hash(password)
            .await
            .map_err(|e| hasher_failure("hash", e))
    }

    /// Sign an access token from the user's current state and persist a new
    /// refresh token bound to the same version
    async fn issue_token_pair(&self, user: &User) -> DomainResult<TokenPair> {
        let access_token = self.signer.issue(user.id, &user.login, user.user_ver, user.group_list())?;

        let secret = generate_refresh_secret();
        let refresh = RefreshToken::new(
            user.id,
            hash_refresh_token(&secret),
            user.user_ver,
            self.config.refresh_token_ttl,
        );
        self.store.save_refresh_token(refresh).await?;

        Ok(TokenPair::new(
            access_token,
            secret,
            self.signer.access_ttl(),
            self.config.refresh_token_ttl,
        ))
    }
}

fn hasher_failure(operation: &str, error: String) -> DomainError {
    tracing::error!(operation = operation, error = %error, event = "password_hasher_failed", "Password hasher failed");
    DomainError::Internal {
        message: format!("password {} failed: {}", operation, error),
    }
}
