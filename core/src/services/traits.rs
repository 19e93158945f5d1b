//! Capability traits for password hashing and external identity verification

use async_trait::async_trait;

use crate::domain::value_objects::VerifiedIdentity;
use crate::errors::IdentityError;

/// Trait for password hashing integration
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into an opaque digest
    async fn hash(&self, password: &str) -> Result<String, String>;
    /// Check a plaintext password against a digest in constant time
    async fn verify(&self, digest: &str, password: &str) -> Result<bool, String>;
}

/// Trait for third-party identity providers
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify an identity assertion and extract the verified email
    async fn verify(&self, assertion: &str) -> Result<VerifiedIdentity, IdentityError>;
}
