//! Unit tests for the credential lifecycle manager

use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::Duration;

use crate::domain::entities::catalog::CatalogKind;
use crate::domain::entities::user::PasswordCredential;
use crate::domain::value_objects::RevocationStatus;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{CatalogRepository, InMemoryCredentialStore, TokenRepository, UserRepository};
use crate::services::lifecycle::{CredentialLifecycleManager, LifecycleConfig};
use crate::services::signer::{hash_refresh_token, TokenSigner, TokenSignerConfig};

use super::mocks::{
    manager_with_store, test_manager, test_signer, FailingRevokeStore, MockIdentityVerifier,
    MockPasswordHasher, TEST_SIGNING_KEY,
};

fn auth_error<T: std::fmt::Debug>(result: DomainResult<T>) -> AuthError {
    match result {
        Err(e) => e
            .as_auth_error()
            .unwrap_or_else(|| panic!("expected credential failure, got {:?}", e)),
        Ok(value) => panic!("expected failure, got {:?}", value),
    }
}

#[tokio::test]
async fn test_ping() {
    assert!(test_manager().ping().await.is_ok());
}

#[tokio::test]
async fn test_register_issues_valid_tokens() {
    let manager = test_manager();

    let pair = manager.register("alice", "p1").await.unwrap();
    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_eq!(pair.access_expires_in, 900);
    assert_eq!(pair.refresh_expires_in, 14 * 24 * 3600);

    let claims = manager.validate_access_token(&pair.access_token).await.unwrap();
    assert_eq!(claims.login, "alice");
    assert_eq!(claims.user_ver, 1);

    let user = manager.store().find_by_login("alice").await.unwrap().unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(user.password, PasswordCredential::Hashed("hashed:p1".to_string()));

    let stored = manager
        .store()
        .find_refresh_token(&hash_refresh_token(&pair.refresh_token))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.user_id, user.id);
    assert_eq!(stored.user_ver, 1);
}

#[tokio::test]
async fn test_register_rejects_empty_fields() {
    let manager = test_manager();

    assert_eq!(auth_error(manager.register("", "p1").await), AuthError::InvalidLogin);
    assert_eq!(auth_error(manager.register("alice", "").await), AuthError::InvalidLogin);
    assert!(manager.store().find_by_login("alice").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_duplicate_login() {
    let manager = test_manager();
    manager.register("alice", "p1").await.unwrap();

    assert_eq!(
        auth_error(manager.register("alice", "other").await),
        AuthError::LoginAlreadyInUse
    );

    // original credentials untouched
    assert!(manager.authenticate("alice", "p1").await.is_ok());
}

#[tokio::test]
async fn test_authenticate() {
    let manager = test_manager();
    manager.register("alice", "p1").await.unwrap();

    let pair = manager.authenticate("alice", "p1").await.unwrap();
    assert!(manager.validate_access_token(&pair.access_token).await.is_ok());

    assert_eq!(auth_error(manager.authenticate("alice", "wrong").await), AuthError::InvalidPassword);
    assert_eq!(auth_error(manager.authenticate("bob", "p1").await), AuthError::UserNotFound);
}

#[tokio::test]
async fn test_authenticate_rejects_disabled_password() {
    let manager = test_manager();
    manager.authenticate_external("valid:bob@example.com").await.unwrap();

    assert_eq!(
        auth_error(manager.authenticate("bob@example.com", "").await),
        AuthError::InvalidPassword
    );
    assert_eq!(
        auth_error(manager.authenticate("bob@example.com", "anything").await),
        AuthError::InvalidPassword
    );
}

#[tokio::test]
async fn test_hasher_failure_is_internal() {
    let hasher = Arc::new(MockPasswordHasher::new());
    hasher.should_fail.store(true, Ordering::SeqCst);
    let manager = CredentialLifecycleManager::new(
        Arc::new(InMemoryCredentialStore::new()),
        hasher,
        Arc::new(MockIdentityVerifier::new()),
        test_signer(),
        LifecycleConfig::default(),
    );

    let result = manager.register("alice", "p1").await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_update_password_invalidates_old_credentials() {
    let manager = test_manager();
    let first = manager.register("alice", "p1").await.unwrap();

    let change = manager.update_password("alice", "p2").await.unwrap();
    assert_eq!(change.revocation, RevocationStatus::Revoked { count: 1 });

    assert_eq!(
        auth_error(manager.validate_access_token(&first.access_token).await),
        AuthError::StaleToken
    );
    assert_eq!(
        auth_error(manager.refresh_access_token(&first.refresh_token).await),
        AuthError::InvalidToken
    );

    let claims = manager.validate_access_token(&change.tokens.access_token).await.unwrap();
    assert_eq!(claims.user_ver, 2);

    assert_eq!(auth_error(manager.authenticate("alice", "p1").await), AuthError::InvalidPassword);
    assert!(manager.authenticate("alice", "p2").await.is_ok());
}

#[tokio::test]
async fn test_update_password_unknown_user() {
    let manager = test_manager();
    assert_eq!(
        auth_error(manager.update_password("ghost", "p2").await),
        AuthError::UserNotFound
    );
}

#[tokio::test]
async fn test_update_password_enables_federated_account() {
    let manager = test_manager();
    manager.authenticate_external("valid:bob@example.com").await.unwrap();

    manager.update_password("bob@example.com", "secret").await.unwrap();
    assert!(manager.authenticate("bob@example.com", "secret").await.is_ok());
}

#[tokio::test]
async fn test_failed_revoke_does_not_fail_password_change() {
    let manager = manager_with_store(FailingRevokeStore::default());
    let first = manager.register("alice", "p1").await.unwrap();

    let change = manager.update_password("alice", "p2").await.unwrap();
    assert!(change.revocation.is_failed());

    // the pre-change refresh token stays unrevoked but carries the old version
    let stored = manager
        .store()
        .find_refresh_token(&hash_refresh_token(&first.refresh_token))
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.is_revoked);
    assert_eq!(
        auth_error(manager.refresh_access_token(&first.refresh_token).await),
        AuthError::InvalidToken
    );

    assert!(manager.refresh_access_token(&change.tokens.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_refresh_rotates_once() {
    let manager = test_manager();
    let pair = manager.register("alice", "p1").await.unwrap();

    let rotated = manager.refresh_access_token(&pair.refresh_token).await.unwrap();
    assert_ne!(rotated.refresh_token, pair.refresh_token);
    assert!(manager.validate_access_token(&rotated.access_token).await.is_ok());

    assert_eq!(
        auth_error(manager.refresh_access_token(&pair.refresh_token).await),
        AuthError::InvalidToken
    );
    assert!(manager.refresh_access_token(&rotated.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_refresh_rejects_unknown_and_expired() {
    let manager = test_manager();
    assert_eq!(
        auth_error(manager.refresh_access_token("never-issued").await),
        AuthError::InvalidToken
    );

    let expired = CredentialLifecycleManager::new(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(MockPasswordHasher::new()),
        Arc::new(MockIdentityVerifier::new()),
        test_signer(),
        LifecycleConfig {
            refresh_token_ttl: Duration::seconds(-1),
        },
    );
    let pair = expired.register("alice", "p1").await.unwrap();
    assert_eq!(
        auth_error(expired.refresh_access_token(&pair.refresh_token).await),
        AuthError::InvalidToken
    );
}

#[tokio::test]
async fn test_validate_rejects_foreign_and_malformed_tokens() {
    let manager = test_manager();
    manager.register("alice", "p1").await.unwrap();

    assert_eq!(
        auth_error(manager.validate_access_token("garbage").await),
        AuthError::InvalidToken
    );

    let user = manager.store().find_by_login("alice").await.unwrap().unwrap();
    let foreign = TokenSigner::new(TokenSignerConfig::default().with_signing_key("not-the-key")).unwrap();
    let forged = foreign.issue(user.id, "alice", 1, Vec::new()).unwrap();
    assert_eq!(
        auth_error(manager.validate_access_token(&forged).await),
        AuthError::InvalidToken
    );

    let expired_signer = TokenSigner::new(
        TokenSignerConfig::default()
            .with_signing_key(TEST_SIGNING_KEY)
            .with_access_token_ttl(Duration::seconds(-30)),
    )
    .unwrap();
    let expired = expired_signer.issue(user.id, "alice", 1, Vec::new()).unwrap();
    assert_eq!(
        auth_error(manager.validate_access_token(&expired).await),
        AuthError::InvalidToken
    );
}

#[tokio::test]
async fn test_validate_unknown_subject() {
    let manager = test_manager();
    let token = test_signer()
        .issue(uuid::Uuid::new_v4(), "ghost", 1, Vec::new())
        .unwrap();

    assert_eq!(
        auth_error(manager.validate_access_token(&token).await),
        AuthError::UserNotFound
    );
}

#[tokio::test]
async fn test_validate_looks_up_by_login() {
    let manager = test_manager();
    manager.register("alice", "p1").await.unwrap();
    manager.register("bob", "p2").await.unwrap();
    let alice = manager.store().find_by_login("alice").await.unwrap().unwrap();
    let bob = manager.store().find_by_login("bob").await.unwrap().unwrap();

    // subject exists, login does not
    let renamed = test_signer().issue(alice.id, "carol", 1, Vec::new()).unwrap();
    assert_eq!(
        auth_error(manager.validate_access_token(&renamed).await),
        AuthError::UserNotFound
    );

    // login exists but belongs to someone else
    let crossed = test_signer().issue(alice.id, "bob", bob.user_ver, Vec::new()).unwrap();
    assert_eq!(
        auth_error(manager.validate_access_token(&crossed).await),
        AuthError::UserNotFound
    );
}

#[tokio::test]
async fn test_access_token_carries_groups() {
    let manager = test_manager();
    manager.register("alice", "p1").await.unwrap();

    let mut user = manager.store().find_by_login("alice").await.unwrap().unwrap();
    user.join_group("admins");
    manager.store().update_user(&user).await.unwrap();

    let pair = manager.authenticate("alice", "p1").await.unwrap();
    let claims = manager.validate_access_token(&pair.access_token).await.unwrap();
    assert_eq!(claims.groups, vec!["admins".to_string()]);
}

#[tokio::test]
async fn test_external_identity_provisions_once() {
    let manager = test_manager();

    let first = manager.authenticate_external("valid:bob@example.com").await.unwrap();
    let second = manager.authenticate_external("valid:bob@example.com").await.unwrap();

    let a = manager.validate_access_token(&first.access_token).await.unwrap();
    let b = manager.validate_access_token(&second.access_token).await.unwrap();
    assert_eq!(a.sub, b.sub);
    assert_eq!(a.login, "bob@example.com");

    let user = manager.store().find_by_login("bob@example.com").await.unwrap().unwrap();
    assert_eq!(user.password, PasswordCredential::Disabled);
}

#[tokio::test]
async fn test_external_identity_uses_existing_account() {
    let manager = test_manager();
    manager.register("carol@example.com", "pw").await.unwrap();

    let pair = manager.authenticate_external("valid:carol@example.com").await.unwrap();
    let claims = manager.validate_access_token(&pair.access_token).await.unwrap();
    let user = manager.store().find_by_login("carol@example.com").await.unwrap().unwrap();

    assert_eq!(claims.user_id().unwrap(), user.id);
    assert!(user.password.allows_password_login());
}

#[tokio::test]
async fn test_external_identity_failures_are_invalid_token() {
    let manager = test_manager();
    assert_eq!(
        auth_error(manager.authenticate_external("forged").await),
        AuthError::InvalidToken
    );
    assert_eq!(
        auth_error(manager.authenticate_external("valid:").await),
        AuthError::InvalidToken
    );

    let offline = CredentialLifecycleManager::new(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(MockPasswordHasher::new()),
        Arc::new(MockIdentityVerifier { should_fail: true }),
        test_signer(),
        LifecycleConfig::default(),
    );
    assert_eq!(
        auth_error(offline.authenticate_external("valid:bob@example.com").await),
        AuthError::InvalidToken
    );
}

#[tokio::test]
async fn test_catalog_operations() {
    let manager = test_manager();

    let group = manager.create_group("admins", "Administrators").await.unwrap();
    let permission = manager.create_permission("users.write", "Modify users").await.unwrap();
    let scope = manager.create_scope("api", "").await.unwrap();

    let store = manager.store();
    assert!(store.find_catalog_record(CatalogKind::Group, group).await.unwrap().is_some());
    assert!(store
        .find_catalog_record(CatalogKind::Permission, permission)
        .await
        .unwrap()
        .is_some());
    assert!(store.find_catalog_record(CatalogKind::Scope, scope).await.unwrap().is_some());
}

#[tokio::test]
async fn test_alice_scenario() {
    let manager = test_manager();

    let (at1, rt1) = {
        let pair = manager.register("alice", "p1").await.unwrap();
        (pair.access_token, pair.refresh_token)
    };

    manager.authenticate("alice", "p1").await.unwrap();
    assert!(manager.validate_access_token(&at1).await.is_ok());

    let change = manager.update_password("alice", "p2").await.unwrap();
    let rt3 = change.tokens.refresh_token;

    assert_eq!(auth_error(manager.validate_access_token(&at1).await), AuthError::StaleToken);
    assert_eq!(auth_error(manager.refresh_access_token(&rt1).await), AuthError::InvalidToken);

    let fourth = manager.refresh_access_token(&rt3).await.unwrap();
    assert!(manager.validate_access_token(&fourth.access_token).await.is_ok());

    assert_eq!(auth_error(manager.refresh_access_token(&rt3).await), AuthError::InvalidToken);
}
