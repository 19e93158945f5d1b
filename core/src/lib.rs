//! # Admin Auth Core
//!
//! Credential lifecycle for administrative users: domain entities, the
//! credential store interfaces and their in-memory implementation, access
//! token signing, and the error taxonomy shared by the transport layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{CatalogKind, CatalogRecord, Claims, PasswordCredential, RefreshToken, TokenPair, User};
pub use domain::value_objects::{PasswordChange, RevocationStatus, VerifiedIdentity};
pub use errors::*;
pub use repositories::{CredentialStore, InMemoryCredentialStore};
pub use services::{CredentialLifecycleManager, IdentityVerifier, PasswordHasher, TokenSigner};
