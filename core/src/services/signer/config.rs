//! Configuration for the token signer

use aa_shared::config::JwtConfig;
use chrono::Duration;
use jsonwebtoken::Algorithm;

/// Configuration for the token signer
#[derive(Debug, Clone)]
pub struct TokenSignerConfig {
    /// HMAC signing secret
    pub signing_key: String,
    /// JWT signing algorithm; only HMAC variants are accepted
    pub algorithm: Algorithm,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Expected `iss` claim
    pub issuer: String,
    /// Expected `aud` claim
    pub audience: String,
}

impl Default for TokenSignerConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenSignerConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            signing_key: config.signing_key.clone(),
            algorithm: Algorithm::HS256,
            access_token_ttl: Duration::seconds(config.access_token_ttl),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}

impl TokenSignerConfig {
    pub fn with_signing_key(mut self, key: impl Into<String>) -> Self {
        self.signing_key = key.into();
        self
    }

    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }
}
