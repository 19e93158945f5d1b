//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{env_i64, env_or};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 50051,
            workers: 0,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = env_i64("SERVER_PORT", defaults.port as i64);
        let workers = env_i64("SERVER_WORKERS", 0);
        Self {
            host: env_or("SERVER_HOST", &defaults.host),
            port: port_or(port, defaults.port),
            workers: usize::try_from(workers).unwrap_or_else(|_| {
                tracing::warn!(key = "SERVER_WORKERS", value = workers, "negative worker count, using default");
                0
            }),
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn port_or(value: i64, default: u16) -> u16 {
    u16::try_from(value).unwrap_or_else(|_| {
        tracing::warn!(key = "SERVER_PORT", value = value, "port out of range, using default");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_out_of_range_falls_back() {
        assert_eq!(port_or(8080, 50051), 8080);
        assert_eq!(port_or(70000, 50051), 50051);
        assert_eq!(port_or(-1, 50051), 50051);
    }

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::new("0.0.0.0", 8080);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }
}
