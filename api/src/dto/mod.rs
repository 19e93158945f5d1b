pub mod auth;
pub mod catalog;

pub use auth::{
    AuthenticateRequest, GoogleLoginRequest, RefreshTokenRequest, RegisterRequest, TokenResponse,
    UpdatePasswordRequest, ValidateRequest, ValidateResponse,
};
pub use catalog::{CatalogCreatedResponse, CreateCatalogRequest};
