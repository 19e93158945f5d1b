pub mod error;

pub use error::{handle_internal_error, json_error_handler, not_found};
