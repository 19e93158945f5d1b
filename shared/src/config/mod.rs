//! Configuration module
//!
//! - `auth` - signing keys, token lifetimes, federated login, password hashing
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, GoogleConfig, JwtConfig, PasswordConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            environment,
            server: ServerConfig::from_env(),
            auth: AuthConfig::from_env(),
            logging,
        }
    }
}

/// Read a string variable, falling back to `default` when unset or empty
pub(crate) fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Read an integer variable, falling back to `default` when unset or invalid
pub(crate) fn env_i64(key: &str, default: i64) -> i64 {
    let raw = env_or(key, "");
    if raw.is_empty() {
        return default;
    }
    match raw.parse::<i64>() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key = key, error = %e, "invalid integer in environment, using default");
            default
        }
    }
}
