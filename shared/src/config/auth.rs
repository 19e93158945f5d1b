//! Authentication and credential configuration

use serde::{Deserialize, Serialize};

use super::{env_i64, env_or};

/// Signing key used when `JWT_SIGNING_KEY` is not provided
pub const DEFAULT_SIGNING_KEY: &str = "dev_insecure_change_me";

/// JWT access token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC key for signing access tokens
    pub signing_key: String,

    /// Access token lifetime in seconds
    pub access_token_ttl: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_ttl: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            signing_key: String::from(DEFAULT_SIGNING_KEY),
            access_token_ttl: 900,            // 15 minutes
            refresh_token_ttl: 14 * 24 * 3600, // 14 days
            issuer: String::from("admin-auth"),
            audience: String::from("admin-auth-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with a signing key
    pub fn new(signing_key: impl Into<String>) -> Self {
        Self {
            signing_key: signing_key.into(),
            ..Default::default()
        }
    }

    /// Set access token lifetime in seconds
    pub fn with_access_ttl_seconds(mut self, seconds: i64) -> Self {
        self.access_token_ttl = seconds;
        self
    }

    /// Set refresh token lifetime in seconds
    pub fn with_refresh_ttl_seconds(mut self, seconds: i64) -> Self {
        self.refresh_token_ttl = seconds;
        self
    }

    /// Check if using the development signing key (security warning)
    pub fn is_using_default_key(&self) -> bool {
        self.signing_key == DEFAULT_SIGNING_KEY
    }
}

/// Google identity configuration for federated login
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GoogleConfig {
    /// OAuth client ID the ID tokens must be issued for
    pub client_id: String,

    /// Timeout for the verification request in seconds
    #[serde(default = "default_verify_timeout")]
    pub verify_timeout_secs: u64,
}

impl GoogleConfig {
    /// Whether a client ID has been configured
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty()
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Google federated login
    #[serde(default)]
    pub google: GoogleConfig,

    /// Password hashing
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let jwt = JwtConfig {
            signing_key: env_or("JWT_SIGNING_KEY", DEFAULT_SIGNING_KEY),
            access_token_ttl: env_i64("JWT_TTL_SECONDS", defaults.access_token_ttl),
            refresh_token_ttl: env_i64("REFRESH_TTL_SECONDS", defaults.refresh_token_ttl),
            issuer: env_or("JWT_ISSUER", &defaults.issuer),
            audience: env_or("JWT_AUDIENCE", &defaults.audience),
        };

        let google = GoogleConfig {
            client_id: env_or("GOOGLE_OAUTH_CLIENT_ID", ""),
            verify_timeout_secs: env_i64("GOOGLE_VERIFY_TIMEOUT_SECS", 10).max(1) as u64,
        };

        let password = PasswordConfig {
            bcrypt_cost: env_i64("BCRYPT_COST", 12).clamp(4, 31) as u32,
        };

        Self { jwt, google, password }
    }
}

fn default_verify_timeout() -> u64 {
    10
}
