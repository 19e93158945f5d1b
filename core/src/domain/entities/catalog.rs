//! Catalog records: groups, permissions and scopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of catalog record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Group,
    Permission,
    Scope,
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogKind::Group => write!(f, "group"),
            CatalogKind::Permission => write!(f, "permission"),
            CatalogKind::Scope => write!(f, "scope"),
        }
    }
}

/// A flat catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: Uuid,
    pub kind: CatalogKind,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl CatalogRecord {
    pub fn new(kind: CatalogKind, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}
