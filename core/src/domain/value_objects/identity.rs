//! Identity asserted by an external provider after verification.

use serde::{Deserialize, Serialize};

/// Identity returned by an [`IdentityVerifier`](crate::services::IdentityVerifier)
/// once the assertion has been checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    /// Verified email address, used as the login
    pub email: String,
}

impl VerifiedIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }
}
