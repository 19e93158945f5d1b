//! Outcome of a password change.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;

/// What happened to the user's outstanding refresh tokens
///
/// A failed bulk revoke does not fail the password change, but it is
/// reported here so callers can act on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RevocationStatus {
    /// All outstanding refresh tokens were revoked
    Revoked { count: usize },
    /// The bulk revoke failed; pre-change tokens are still rejected on
    /// refresh by their version stamp
    Failed { reason: String },
}

impl RevocationStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, RevocationStatus::Failed { .. })
    }
}

/// Result of a successful password change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChange {
    /// Fresh token pair bound to the new version
    pub tokens: TokenPair,
    /// Outcome of revoking the previous refresh tokens
    pub revocation: RevocationStatus,
}
