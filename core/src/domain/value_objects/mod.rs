//! Value objects representing immutable domain concepts.

pub mod identity;
pub mod password_change;

// Re-export commonly used types
pub use identity::VerifiedIdentity;
pub use password_change::{PasswordChange, RevocationStatus};
