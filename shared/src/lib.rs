//! Shared configuration and response types for the admin auth server
//!
//! - Configuration types loaded from the environment
//! - Error response envelope and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, Environment, GoogleConfig, JwtConfig, LoggingConfig, PasswordConfig,
    ServerConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
