use aa_core::repositories::CredentialStore;
use aa_core::services::{IdentityVerifier, PasswordHasher};
use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::handlers::handle_internal_error;

/// Handler for GET /ping
pub async fn ping<S, H, V>(state: web::Data<AppState<S, H, V>>) -> HttpResponse
where
    S: CredentialStore + 'static,
    H: PasswordHasher + 'static,
    V: IdentityVerifier + 'static,
{
    match state.manager.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({})),
        Err(error) => handle_internal_error(error),
    }
}
