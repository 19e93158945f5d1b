use aa_core::errors::DomainError;
use aa_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse};

/// Map a service malfunction to a 500 response
///
/// Internal details are logged, never returned.
pub fn handle_internal_error(error: DomainError) -> HttpResponse {
    tracing::error!(error = %error, event = "request_failed", "Internal error while handling request");
    HttpResponse::InternalServerError().json(error.to_error_response())
}

/// Malformed request bodies get the shared error envelope
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %error, event = "bad_request", "Rejected request body");
    let body = ErrorResponse::new(error_codes::BAD_REQUEST, error.to_string());
    InternalError::from_response(error, HttpResponse::BadRequest().json(body)).into()
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
