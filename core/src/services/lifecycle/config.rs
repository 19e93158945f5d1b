//! Configuration for the credential lifecycle manager

use aa_shared::config::JwtConfig;
use chrono::Duration;

/// Configuration for the credential lifecycle manager
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for LifecycleConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            refresh_token_ttl: Duration::seconds(config.refresh_token_ttl),
        }
    }
}
