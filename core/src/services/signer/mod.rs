//! Access token signing and refresh secret generation
//!
//! - HMAC-signed JWT access tokens with issuer and audience checks
//! - Opaque refresh secrets and the hashes stored in their place

mod config;
mod refresh;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenSignerConfig;
pub use refresh::{generate_refresh_secret, hash_refresh_token};
pub use service::TokenSigner;
