//! Status and body mapping for domain errors.
//!
//! Services return [`Error`] with an [`ErrorCode`]; this module decides the
//! HTTP status, strips internal details from 500 responses and echoes the
//! trace identifier as a response header.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Largest accepted JSON body. Leaves room for a base64 image at the upload
/// size limit.
pub const JSON_BODY_LIMIT: usize = 8 * 1024 * 1024;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// Render JSON extraction failures with the standard error envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let error = match err {
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            Error::invalid_request("request body too large")
                .with_details(json!({"code": "body_too_large", "limit": limit}))
        }
        JsonPayloadError::ContentType => Error::invalid_request("expected application/json")
            .with_details(json!({"code": "unsupported_content_type"})),
        other => Error::invalid_request("malformed JSON body")
            .with_details(json!({"code": "invalid_json", "reason": other.to_string()})),
    };
    error.into()
}
