//! # Infrastructure Layer
//!
//! Concrete capabilities behind the traits defined in `aa_core`:
//!
//! - **Password**: bcrypt hashing on the blocking thread pool
//! - **Identity**: Google ID token verification over HTTPS
//!
//! [`build_lifecycle_manager`] wires them to the in-memory credential store.

use std::sync::Arc;

use aa_core::repositories::InMemoryCredentialStore;
use aa_core::services::{CredentialLifecycleManager, LifecycleConfig, TokenSigner, TokenSignerConfig};
use aa_shared::config::AuthConfig;

/// Password hashing implementations
pub mod password;

/// External identity provider implementations
pub mod identity;

pub use identity::{GoogleIdentityVerifier, TokenInfo};
pub use password::BcryptPasswordHasher;

/// Lifecycle manager wired with the production capabilities
pub type AppLifecycleManager =
    CredentialLifecycleManager<InMemoryCredentialStore, BcryptPasswordHasher, GoogleIdentityVerifier>;

/// Build the lifecycle manager from configuration
///
/// This sets up:
/// - The shared in-memory credential store
/// - The bcrypt hasher at the configured cost
/// - The Google verifier (failing every assertion when no client ID is set)
/// - The HMAC token signer
pub fn build_lifecycle_manager(config: &AuthConfig) -> Result<AppLifecycleManager, InfrastructureError> {
    tracing::info!("Initializing credential lifecycle services...");

    if config.jwt.is_using_default_key() {
        tracing::warn!(
            event = "insecure_signing_key",
            "JWT_SIGNING_KEY not set, using the development signing key"
        );
    }
    if !config.google.is_configured() {
        tracing::warn!(
            event = "google_not_configured",
            "GOOGLE_OAUTH_CLIENT_ID not set, federated login will be rejected"
        );
    }

    let signer = TokenSigner::new(TokenSignerConfig::from(&config.jwt))
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;
    let hasher = BcryptPasswordHasher::new(config.password.bcrypt_cost)?;
    let verifier = GoogleIdentityVerifier::new(config.google.clone())?;

    let manager = CredentialLifecycleManager::new(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(hasher),
        Arc::new(verifier),
        Arc::new(signer),
        LifecycleConfig::from(&config.jwt),
    );

    tracing::info!("Credential lifecycle services initialized successfully");
    Ok(manager)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Password hashing error
    #[error("Hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Blocking task failed to complete
    #[error("Background task error: {0}")]
    Task(#[from] tokio::task::JoinError),
}
