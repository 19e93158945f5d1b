//! Credential lifecycle route handlers
//!
//! Credential failures are reported with 200 and a stable `error` code in
//! the payload. Only service malfunctions produce a non-2xx status.

use aa_core::domain::entities::token::TokenPair;
use aa_core::errors::DomainResult;
use aa_core::repositories::CredentialStore;
use aa_core::services::{IdentityVerifier, PasswordHasher};
use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::{
    AuthenticateRequest, GoogleLoginRequest, RefreshTokenRequest, RegisterRequest, TokenResponse,
    UpdatePasswordRequest, ValidateRequest, ValidateResponse,
};
use crate::handlers::handle_internal_error;

fn token_response(result: DomainResult<TokenPair>) -> HttpResponse {
    match result {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => match error.as_auth_error() {
            Some(auth) => HttpResponse::Ok().json(TokenResponse::failure(auth)),
            None => handle_internal_error(error),
        },
    }
}

/// Handler for POST /auth/register
///
/// # Request Body
///
/// ```json
/// { "login": "alice", "password": "p1" }
/// ```
///
/// # Response
///
/// ```json
/// { "auth_token": "eyJ...", "refresh_token": "...", "expires_in": 900, "refresh_expires_in": 1209600 }
/// ```
///
/// or `{ "error": "LOGIN_ALREADY_IN_USE" }` / `{ "error": "INVALID_LOGIN" }`
pub async fn register<S, H, V>(
    state: web::Data<AppState<S, H, V>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    H: PasswordHasher + 'static,
    V: IdentityVerifier + 'static,
{
    token_response(state.manager.register(&request.login, &request.password).await)
}

/// Handler for POST /auth/authenticate
///
/// Errors in payload: `USER_NOT_FOUND`, `INVALID_PASSWORD`
pub async fn authenticate<S, H, V>(
    state: web::Data<AppState<S, H, V>>,
    request: web::Json<AuthenticateRequest>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    H: PasswordHasher + 'static,
    V: IdentityVerifier + 'static,
{
    token_response(state.manager.authenticate(&request.login, &request.password).await)
}

/// Handler for POST /auth/password
///
/// Returns a fresh pair plus the outcome of revoking earlier refresh tokens.
///
/// Errors in payload: `USER_NOT_FOUND`
pub async fn update_password<S, H, V>(
    state: web::Data<AppState<S, H, V>>,
    request: web::Json<UpdatePasswordRequest>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    H: PasswordHasher + 'static,
    V: IdentityVerifier + 'static,
{
    match state
        .manager
        .update_password(&request.login, &request.new_password)
        .await
    {
        Ok(change) => HttpResponse::Ok()
            .json(TokenResponse::from(change.tokens).with_revocation(change.revocation)),
        Err(error) => match error.as_auth_error() {
            Some(auth) => HttpResponse::Ok().json(TokenResponse::failure(auth)),
            None => handle_internal_error(error),
        },
    }
}

/// Handler for POST /auth/refresh
///
/// The presented refresh token is consumed.
///
/// Errors in payload: `INVALID_TOKEN`, `USER_NOT_FOUND`
pub async fn refresh<S, H, V>(
    state: web::Data<AppState<S, H, V>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    H: PasswordHasher + 'static,
    V: IdentityVerifier + 'static,
{
    token_response(state.manager.refresh_access_token(&request.refresh_token).await)
}

/// Handler for POST /auth/validate
///
/// Errors in payload: `INVALID_TOKEN`, `USER_NOT_FOUND`, `STALE_TOKEN`
pub async fn validate<S, H, V>(
    state: web::Data<AppState<S, H, V>>,
    request: web::Json<ValidateRequest>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    H: PasswordHasher + 'static,
    V: IdentityVerifier + 'static,
{
    match state.manager.validate_access_token(&request.auth_token).await {
        Ok(_) => HttpResponse::Ok().json(ValidateResponse::default()),
        Err(error) => match error.as_auth_error() {
            Some(auth) => HttpResponse::Ok().json(ValidateResponse::failure(auth)),
            None => handle_internal_error(error),
        },
    }
}

/// Handler for POST /auth/google
///
/// Errors in payload: `INVALID_TOKEN`
pub async fn google<S, H, V>(
    state: web::Data<AppState<S, H, V>>,
    request: web::Json<GoogleLoginRequest>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    H: PasswordHasher + 'static,
    V: IdentityVerifier + 'static,
{
    token_response(state.manager.authenticate_external(&request.id_token).await)
}
