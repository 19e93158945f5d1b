//! Credential lifecycle: registration, password and federated sign-in,
//! password change, refresh rotation and access token validation.

mod config;
mod manager;

#[cfg(test)]
mod tests;

pub use config::LifecycleConfig;
pub use manager::CredentialLifecycleManager;
