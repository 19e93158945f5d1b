//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, IdentityError, StoreError, TokenError};

use aa_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl DomainError {
    /// The credential failure carried by this error, if it is one
    ///
    /// `None` means the service malfunctioned rather than rejecting the
    /// caller's credentials.
    pub fn as_auth_error(&self) -> Option<AuthError> {
        match self {
            DomainError::Auth(e) => Some(*e),
            _ => None,
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Auth(e) => e.to_error_response(),
            _ => ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error"),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
