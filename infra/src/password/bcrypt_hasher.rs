//! bcrypt implementation of the password hashing capability

use aa_core::services::PasswordHasher;
use async_trait::async_trait;

use crate::InfrastructureError;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// bcrypt password hasher
///
/// Hashing is CPU bound, so both operations run on the blocking pool.
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given work factor
    pub fn new(cost: u32) -> Result<Self, InfrastructureError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(InfrastructureError::Config(format!(
                "bcrypt cost must be between {} and {}, got {}",
                MIN_COST, MAX_COST, cost
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    async fn hash_blocking(&self, password: &str) -> Result<String, InfrastructureError> {
        let password = password.to_string();
        let cost = self.cost;
        let digest = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(digest)
    }

    async fn verify_blocking(&self, digest: &str, password: &str) -> Result<bool, InfrastructureError> {
        let password = password.to_string();
        let digest = digest.to_string();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &digest)).await??;
        Ok(matches)
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, String> {
        self.hash_blocking(password).await.map_err(|e| e.to_string())
    }

    async fn verify(&self, digest: &str, password: &str) -> Result<bool, String> {
        self.verify_blocking(digest, password).await.map_err(|e| {
            tracing::error!(error = %e, event = "password_verify_failed", "Stored digest could not be checked");
            e.to_string()
        })
    }
}
