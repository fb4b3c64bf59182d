//! HTTP mapping for domain errors.
//!
//! Purpose: keep [`Error`] free of Actix types while giving every handler
//! the same JSON failure shape:
//! `{"success": false, "error": "...", "code": "...", "traceId": "..."}`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Status code for each error category.
///
/// | code | status |
/// |---|---|
/// | `invalid_request` | 400 |
/// | `not_found` | 404 |
/// | `service_unavailable` | 503 |
/// | `internal_error` | 500 |
#[must_use]
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    success: bool,
    #[serde(flatten)]
    error: &'a Error,
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

        builder.json(ErrorEnvelope {
            success: false,
            error: self,
        })
    }
}
