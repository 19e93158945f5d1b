//! Business services containing the credential lifecycle logic.

pub mod lifecycle;
pub mod signer;
pub mod traits;

// Re-export commonly used types
pub use lifecycle::{CredentialLifecycleManager, LifecycleConfig};
pub use signer::{generate_refresh_secret, hash_refresh_token, TokenSigner, TokenSignerConfig};
pub use traits::{IdentityVerifier, PasswordHasher};
