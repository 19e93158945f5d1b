//! Persistence interfaces for users, refresh tokens and catalog records,
//! plus the in-memory credential store.

pub mod catalog;
pub mod memory;
pub mod token;
pub mod user;

pub use catalog::CatalogRepository;
pub use memory::InMemoryCredentialStore;
pub use token::TokenRepository;
pub use user::UserRepository;

/// Everything the credential lifecycle needs from persistence
///
/// Implemented automatically for any type providing all three repositories.
pub trait CredentialStore: UserRepository + TokenRepository + CatalogRepository {}

impl<T> CredentialStore for T where T: UserRepository + TokenRepository + CatalogRepository {}
