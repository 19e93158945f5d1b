//! Route handlers
//!
//! - `health`: liveness
//! - `auth`: credential lifecycle
//! - `catalog`: groups, permissions and scopes

pub mod auth;
pub mod catalog;
pub mod health;
