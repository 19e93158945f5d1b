//! Google ID token verification
//!
//! Assertions are checked against Google's `tokeninfo` endpoint, which
//! validates the signature and expiry. The returned claims are then matched
//! against the configured OAuth client.

use std::time::Duration;

use aa_core::domain::value_objects::VerifiedIdentity;
use aa_core::errors::IdentityError;
use aa_core::services::IdentityVerifier;
use aa_shared::config::GoogleConfig;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::InfrastructureError;

/// Google's ID token introspection endpoint
pub const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Claims returned by the `tokeninfo` endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub iss: String,
    #[serde(default)]
    pub aud: String,
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub email_verified: bool,
}

impl TokenInfo {
    /// Match the claims against the expected client and extract the email
    pub fn into_identity(self, client_id: &str) -> Result<VerifiedIdentity, IdentityError> {
        if !GOOGLE_ISSUERS.contains(&self.iss.as_str()) {
            return Err(IdentityError::Rejected {
                reason: format!("unexpected issuer '{}'", self.iss),
            });
        }
        if self.aud != client_id {
            return Err(IdentityError::Rejected {
                reason: "token issued for a different client".to_string(),
            });
        }

        let email = match self.email {
            Some(email) if !email.is_empty() => email,
            _ => return Err(IdentityError::MissingEmail),
        };
        if !self.email_verified {
            return Err(IdentityError::Rejected {
                reason: "email not verified".to_string(),
            });
        }

        Ok(VerifiedIdentity::new(email))
    }
}

// tokeninfo encodes booleans as strings
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    Ok(match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => b,
        BoolOrString::String(s) => s.eq_ignore_ascii_case("true"),
    })
}

/// Google ID token verifier
pub struct GoogleIdentityVerifier {
    config: GoogleConfig,
    endpoint: String,
    http_client: reqwest::Client,
}

impl GoogleIdentityVerifier {
    /// Create a verifier for the configured OAuth client
    pub fn new(config: GoogleConfig) -> Result<Self, InfrastructureError> {
        Self::with_endpoint(config, GOOGLE_TOKENINFO_URL)
    }

    /// Create a verifier against a custom `tokeninfo` endpoint
    pub fn with_endpoint(config: GoogleConfig, endpoint: impl Into<String>) -> Result<Self, InfrastructureError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.verify_timeout_secs.max(1)))
            .user_agent("admin-auth/0.1")
            .build()?;

        Ok(Self {
            config,
            endpoint: endpoint.into(),
            http_client,
        })
    }

    async fn fetch_token_info(&self, assertion: &str) -> Result<TokenInfo, IdentityError> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("id_token", assertion)])
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable { message: e.to_string() })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(IdentityError::Unavailable {
                message: format!("tokeninfo returned {}", status),
            });
        }
        if !status.is_success() {
            return Err(IdentityError::Rejected {
                reason: format!("tokeninfo returned {}", status),
            });
        }

        response
            .json::<TokenInfo>()
            .await
            .map_err(|e| IdentityError::Rejected {
                reason: format!("unreadable tokeninfo response: {}", e),
            })
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, assertion: &str) -> Result<VerifiedIdentity, IdentityError> {
        if !self.config.is_configured() {
            return Err(IdentityError::NotConfigured);
        }
        if assertion.is_empty() {
            return Err(IdentityError::Rejected {
                reason: "empty assertion".to_string(),
            });
        }

        let info = self.fetch_token_info(assertion).await?;
        tracing::debug!(sub = %info.sub, event = "google_token_checked", "Received tokeninfo claims");

        info.into_identity(&self.config.client_id)
    }
}
