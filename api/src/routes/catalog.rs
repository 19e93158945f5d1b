//! Catalog route handlers

use aa_core::repositories::CredentialStore;
use aa_core::services::{IdentityVerifier, PasswordHasher};
use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::{CatalogCreatedResponse, CreateCatalogRequest};
use crate::handlers::handle_internal_error;

/// Handler for POST /catalog/groups
pub async fn create_group<S, H, V>(
    state: web::Data<AppState<S, H, V>>,
    request: web::Json<CreateCatalogRequest>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    H: PasswordHasher + 'static,
    V: IdentityVerifier + 'static,
{
    match state.manager.create_group(&request.name, &request.description).await {
        Ok(id) => HttpResponse::Ok().json(CatalogCreatedResponse { id }),
        Err(error) => handle_internal_error(error),
    }
}

/// Handler for POST /catalog/permissions
pub async fn create_permission<S, H, V>(
    state: web::Data<AppState<S, H, V>>,
    request: web::Json<CreateCatalogRequest>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    H: PasswordHasher + 'static,
    V: IdentityVerifier + 'static,
{
    match state.manager.create_permission(&request.name, &request.description).await {
        Ok(id) => HttpResponse::Ok().json(CatalogCreatedResponse { id }),
        Err(error) => handle_internal_error(error),
    }
}

/// Handler for POST /catalog/scopes
pub async fn create_scope<S, H, V>(
    state: web::Data<AppState<S, H, V>>,
    request: web::Json<CreateCatalogRequest>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    H: PasswordHasher + 'static,
    V: IdentityVerifier + 'static,
{
    match state.manager.create_scope(&request.name, &request.description).await {
        Ok(id) => HttpResponse::Ok().json(CatalogCreatedResponse { id }),
        Err(error) => handle_internal_error(error),
    }
}
