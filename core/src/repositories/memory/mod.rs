mod store;

pub use store::InMemoryCredentialStore;
