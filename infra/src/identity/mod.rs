//! External identity providers

mod google;

pub use google::{GoogleIdentityVerifier, TokenInfo, GOOGLE_TOKENINFO_URL};
