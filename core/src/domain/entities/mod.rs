//! Domain entities representing core business objects.

pub mod catalog;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use catalog::{CatalogKind, CatalogRecord};
pub use token::{Claims, RefreshToken, TokenPair};
pub use user::{PasswordCredential, User, INITIAL_USER_VERSION};
