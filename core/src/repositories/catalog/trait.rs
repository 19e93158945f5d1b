//! Catalog repository trait for groups, permissions and scopes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::catalog::{CatalogKind, CatalogRecord};
use crate::errors::DomainError;

/// Repository trait for flat catalog records
///
/// Names carry no uniqueness constraint; every create yields a fresh ID.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Store a new record of the given kind and return its ID
    async fn create_catalog_record(
        &self,
        kind: CatalogKind,
        name: &str,
        description: &str,
    ) -> Result<Uuid, DomainError>;

    /// Find a record by kind and ID
    async fn find_catalog_record(
        &self,
        kind: CatalogKind,
        id: Uuid,
    ) -> Result<Option<CatalogRecord>, DomainError>;

    async fn create_group(&self, name: &str, description: &str) -> Result<Uuid, DomainError> {
        self.create_catalog_record(CatalogKind::Group, name, description).await
    }

    async fn create_permission(&self, name: &str, description: &str) -> Result<Uuid, DomainError> {
        self.create_catalog_record(CatalogKind::Permission, name, description).await
    }

    async fn create_scope(&self, name: &str, description: &str) -> Result<Uuid, DomainError> {
        self.create_catalog_record(CatalogKind::Scope, name, description).await
    }
}
