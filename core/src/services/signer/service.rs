//! Access token signer implementation

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenSignerConfig;

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Signs and parses access tokens
///
/// Parsing checks signature, algorithm, expiry, issuer and audience with zero
/// leeway. It never consults the credential store, so the version check is
/// left to the caller.
pub struct TokenSigner {
    config: TokenSignerConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &self.config.algorithm)
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// Creates a new token signer
    ///
    /// # Arguments
    ///
    /// * `config` - Signer configuration
    ///
    /// # Returns
    ///
    /// The signer, or `DomainError::Internal` if the configured algorithm is
    /// not an HMAC variant
    pub fn new(config: TokenSignerConfig) -> Result<Self, DomainError> {
        if !HMAC_ALGORITHMS.contains(&config.algorithm) {
            return Err(DomainError::Internal {
                message: format!("unsupported signing algorithm {:?}", config.algorithm),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.signing_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.signing_key.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Access token lifetime
    pub fn access_ttl(&self) -> Duration {
        self.config.access_token_ttl
    }

    /// Signs a new access token for the given user state
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact JWT
    /// * `Err(TokenError::TokenGenerationFailed)` - Encoding failed
    pub fn issue(
        &self,
        user_id: Uuid,
        login: &str,
        user_ver: i64,
        groups: Vec<String>,
    ) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(
            user_id,
            login,
            user_ver,
            groups,
            self.config.access_token_ttl,
            &self.config.issuer,
            &self.config.audience,
        );
        self.encode_jwt(&claims)
    }

    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, algorithm and registered claims all check out
    /// * `Err(TokenError)` - Token is malformed, tampered, expired or foreign
    pub fn parse(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| DomainError::Token(map_jwt_error(e.kind())))?;

        // jsonwebtoken still accepts a token during its expiry second
        if claims.is_expired() {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }

        Ok(claims)
    }
}

fn map_jwt_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => TokenError::InvalidAlgorithm,
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject
        | ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
        _ => TokenError::InvalidTokenFormat,
    }
}
