//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for the access token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Login at issuance
    pub login: String,

    /// User version counter at issuance
    pub user_ver: i64,

    /// Group memberships at issuance
    #[serde(default)]
    pub groups: Vec<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token valid for `ttl` from now
    pub fn new_access_token(
        user_id: Uuid,
        login: &str,
        user_ver: i64,
        groups: Vec<String>,
        ttl: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: user_id.to_string(),
            login: login.to_string(),
            user_ver,
            groups,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh token record held by the credential store
///
/// Only the SHA-256 hash of the bearer secret is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// Hashed token value
    pub token_hash: String,

    /// Owner's version counter when the token was issued
    pub user_ver: i64,

    /// Timestamp when the token was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked
    pub is_revoked: bool,
}

impl RefreshToken {
    /// Creates a new refresh token expiring `ttl` from now
    pub fn new(user_id: Uuid, token_hash: String, user_ver: i64, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            user_ver,
            issued_at: now,
            expires_at: now + ttl,
            is_revoked: false,
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// A token is usable iff it is neither revoked nor expired
    pub fn is_valid(&self) -> bool {
        !self.is_revoked && !self.is_expired()
    }

    /// Revokes the refresh token
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: access_ttl.num_seconds(),
            refresh_expires_in: refresh_ttl.num_seconds(),
        }
    }
}
