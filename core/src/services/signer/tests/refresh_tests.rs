//! Unit tests for refresh secrets

use std::collections::HashSet;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::services::signer::{generate_refresh_secret, hash_refresh_token};

#[test]
fn test_refresh_secret_is_32_random_bytes() {
    let secret = generate_refresh_secret();
    let bytes = URL_SAFE_NO_PAD.decode(&secret).unwrap();
    assert_eq!(bytes.len(), 32);
}

#[test]
fn test_refresh_secrets_are_unique() {
    let secrets: HashSet<String> = (0..100).map(|_| generate_refresh_secret()).collect();
    assert_eq!(secrets.len(), 100);
}

#[test]
fn test_hash_is_stable_sha256_hex() {
    let hash = hash_refresh_token("abc");
    assert_eq!(
        hash,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(hash, hash_refresh_token("abc"));
    assert_ne!(hash, hash_refresh_token("abd"));
}
