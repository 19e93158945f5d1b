//! Refresh token secrets

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes in a refresh secret
pub const REFRESH_SECRET_BYTES: usize = 32;

/// Generate a fresh refresh secret from the OS random source
///
/// The secret is only ever handed to the client; the store keeps its hash.
pub fn generate_refresh_secret() -> String {
    let mut bytes = [0u8; REFRESH_SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256 hex digest of a refresh secret, as held by the store
pub fn hash_refresh_token(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
