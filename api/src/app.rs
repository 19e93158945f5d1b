//! Application state and factory
//!
//! This module holds the shared application state and provides the factory
//! for creating the Actix-web application.

use aa_core::repositories::CredentialStore;
use aa_core::services::{CredentialLifecycleManager, IdentityVerifier, PasswordHasher};
use actix_web::{web, App};
use tracing_actix_web::TracingLogger;

use crate::handlers::{json_error_handler, not_found};
use crate::routes::{auth, catalog, health};

/// State shared by every worker
pub struct AppState<S, H, V>
where
    S: CredentialStore,
    H: PasswordHasher,
    V: IdentityVerifier,
{
    pub manager: CredentialLifecycleManager<S, H, V>,
}

impl<S, H, V> AppState<S, H, V>
where
    S: CredentialStore,
    H: PasswordHasher,
    V: IdentityVerifier,
{
    pub fn new(manager: CredentialLifecycleManager<S, H, V>) -> Self {
        Self { manager }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<S, H, V>(
    app_state: web::Data<AppState<S, H, V>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: CredentialStore + 'static,
    H: PasswordHasher + 'static,
    V: IdentityVerifier + 'static,
{
    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Request spans
        .wrap(TracingLogger::default())
        // Liveness
        .route("/ping", web::get().to(health::ping::<S, H, V>))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register::<S, H, V>))
                .route("/authenticate", web::post().to(auth::authenticate::<S, H, V>))
                .route("/password", web::post().to(auth::update_password::<S, H, V>))
                .route("/refresh", web::post().to(auth::refresh::<S, H, V>))
                .route("/validate", web::post().to(auth::validate::<S, H, V>))
                .route("/google", web::post().to(auth::google::<S, H, V>)),
        )
        .service(
            web::scope("/catalog")
                .route("/groups", web::post().to(catalog::create_group::<S, H, V>))
                .route("/permissions", web::post().to(catalog::create_permission::<S, H, V>))
                .route("/scopes", web::post().to(catalog::create_scope::<S, H, V>)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}
