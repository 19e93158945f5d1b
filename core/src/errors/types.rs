//! Error types for the credential lifecycle, token signing, storage and
//! external identity verification.

use aa_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Credential failures expected by callers
///
/// These are reported back in the response payload rather than as transport
/// failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid login")]
    InvalidLogin,

    #[error("Login already in use")]
    LoginAlreadyInUse,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Stale token")]
    StaleToken,
}

impl AuthError {
    /// Stable wire code for this failure
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidLogin => error_codes::INVALID_LOGIN,
            AuthError::LoginAlreadyInUse => error_codes::LOGIN_ALREADY_IN_USE,
            AuthError::UserNotFound => error_codes::USER_NOT_FOUND,
            AuthError::InvalidPassword => error_codes::INVALID_PASSWORD,
            AuthError::InvalidToken => error_codes::INVALID_TOKEN,
            AuthError::StaleToken => error_codes::STALE_TOKEN,
        }
    }
}

impl IntoErrorResponse for AuthError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.to_string())
    }
}

/// Token signing and parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Unexpected signing algorithm")]
    InvalidAlgorithm,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Credential store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Login already taken: {login}")]
    LoginTaken { login: String },

    #[error("User not found")]
    UserNotFound,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Refresh token already revoked")]
    RefreshTokenRevoked,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Refresh token already issued")]
    DuplicateToken,

    #[error("Store unavailable: {message}")]
    Unavailable { message: String },
}

/// External identity verification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Identity provider not configured")]
    NotConfigured,

    #[error("Identity assertion rejected: {reason}")]
    Rejected { reason: String },

    #[error("Email not present in identity assertion")]
    MissingEmail,

    #[error("Identity provider unavailable: {message}")]
    Unavailable { message: String },
}
