//! In-memory credential store backed by tokio read-write locks.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::catalog::{CatalogKind, CatalogRecord};
use crate::domain::entities::token::RefreshToken;
use crate::domain::entities::user::{PasswordCredential, User};
use crate::errors::{DomainError, StoreError};
use crate::repositories::catalog::CatalogRepository;
use crate::repositories::token::TokenRepository;
use crate::repositories::user::UserRepository;

#[derive(Default)]
struct UserTable {
    by_id: HashMap<Uuid, User>,
    id_by_login: HashMap<String, Uuid>,
}

impl UserTable {
    fn resolve(&self, user: &User) -> Option<Uuid> {
        self.id_by_login
            .get(&user.login)
            .copied()
            .or_else(|| self.by_id.contains_key(&user.id).then_some(user.id))
    }
}

#[derive(Default)]
struct TokenTable {
    by_hash: HashMap<String, RefreshToken>,
    hash_by_id: HashMap<Uuid, String>,
    hashes_by_user: HashMap<Uuid, Vec<String>>,
}

impl TokenTable {
    fn insert(&mut self, mut token: RefreshToken) -> Result<RefreshToken, StoreError> {
        if self.by_hash.contains_key(&token.token_hash) {
            return Err(StoreError::DuplicateToken);
        }
        if token.id.is_nil() || self.hash_by_id.contains_key(&token.id) {
            token.id = Uuid::new_v4();
        }

        self.hash_by_id.insert(token.id, token.token_hash.clone());
        self.hashes_by_user
            .entry(token.user_id)
            .or_default()
            .push(token.token_hash.clone());
        self.by_hash.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }
}

/// Credential store holding all state in process memory
///
/// Each table family sits behind its own lock and every mutation happens
/// under a single write guard, so readers never observe a partial update.
/// Reads hand out clones.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    users: Arc<RwLock<UserTable>>,
    tokens: Arc<RwLock<TokenTable>>,
    catalog: Arc<RwLock<HashMap<Uuid, CatalogRecord>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn user_count(&self) -> usize {
        self.users.read().await.by_id.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryCredentialStore {
    async fn create_user(&self, login: &str, password: PasswordCredential) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.id_by_login.contains_key(login) {
            return Err(StoreError::LoginTaken {
                login: login.to_string(),
            }
            .into());
        }

        let mut user = User::new(login, password);
        while users.by_id.contains_key(&user.id) {
            user.id = Uuid::new_v4();
        }

        users.id_by_login.insert(user.login.clone(), user.id);
        users.by_id.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .id_by_login
            .get(login)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.by_id.get(&id).cloned())
    }

    async fn update_user(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let id = users.resolve(user).ok_or(StoreError::UserNotFound)?;
        let stored = users.by_id.get_mut(&id).ok_or(StoreError::UserNotFound)?;

        stored.password = user.password.clone();
        stored.user_ver = user.user_ver;
        stored.groups = user.groups.clone();
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn update_password(&self, login: &str, digest: String) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let id = users
            .id_by_login
            .get(login)
            .copied()
            .ok_or(StoreError::UserNotFound)?;
        let stored = users.by_id.get_mut(&id).ok_or(StoreError::UserNotFound)?;

        stored.change_password(digest);
        Ok(stored.clone())
    }
}

#[async_trait]
impl TokenRepository for InMemoryCredentialStore {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        Ok(tokens.insert(token)?)
    }

    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.by_hash.get(token_hash).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .hashes_by_user
            .get(&user_id)
            .map(|hashes| {
                hashes
                    .iter()
                    .filter_map(|hash| tokens.by_hash.get(hash))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn revoke_refresh_token(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        let Some(hash) = tokens.hash_by_id.get(&id).cloned() else {
            return Ok(false);
        };
        match tokens.by_hash.get_mut(&hash) {
            Some(token) => {
                token.revoke();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let TokenTable {
            by_hash,
            hashes_by_user,
            ..
        } = &mut *tokens;

        let mut count = 0;
        if let Some(hashes) = hashes_by_user.get(&user_id) {
            for hash in hashes {
                if let Some(token) = by_hash.get_mut(hash) {
                    if !token.is_revoked {
                        token.revoke();
                        count += 1;
                    }
                }
            }
        }

        Ok(count)
    }

    async fn rotate_refresh_token(
        &self,
        token_hash: &str,
        replacement: RefreshToken,
    ) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        let current = tokens
            .by_hash
            .get(token_hash)
            .ok_or(StoreError::RefreshTokenNotFound)?;
        if current.is_revoked {
            return Err(StoreError::RefreshTokenRevoked.into());
        }
        if current.is_expired() {
            return Err(StoreError::RefreshTokenExpired.into());
        }
        if tokens.by_hash.contains_key(&replacement.token_hash) {
            return Err(StoreError::DuplicateToken.into());
        }

        tokens.insert(replacement)?;

        let presented = tokens
            .by_hash
            .get_mut(token_hash)
            .ok_or(StoreError::RefreshTokenNotFound)?;
        presented.revoke();
        Ok(presented.clone())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCredentialStore {
    async fn create_catalog_record(
        &self,
        kind: CatalogKind,
        name: &str,
        description: &str,
    ) -> Result<Uuid, DomainError> {
        let mut catalog = self.catalog.write().await;

        let mut record = CatalogRecord::new(kind, name, description);
        while catalog.contains_key(&record.id) {
            record.id = Uuid::new_v4();
        }

        let id = record.id;
        catalog.insert(id, record);
        Ok(id)
    }

    async fn find_catalog_record(
        &self,
        kind: CatalogKind,
        id: Uuid,
    ) -> Result<Option<CatalogRecord>, DomainError> {
        let catalog = self.catalog.read().await;
        Ok(catalog.get(&id).filter(|record| record.kind == kind).cloned())
    }
}
