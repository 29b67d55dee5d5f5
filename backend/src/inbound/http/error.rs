//! Actix mapping for [`crate::domain::Error`].
//!
//! A failed detection run reaches clients as `503` with the stage details
//! intact. Anything classified as internal is reduced to a fixed message so
//! upstream URLs or payload fragments never leave the service. Both carry the
//! `trace-id` header when the error captured one.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_view(error: &Error) -> Error {
    match error.code() {
        ErrorCode::InternalError => {
            let redacted = Error::internal(REDACTED_MESSAGE);
            match error.trace_id() {
                Some(id) => redacted.with_trace_id(id),
                None => redacted,
            }
        }
        ErrorCode::ServiceUnavailable => error.clone(),
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
        builder.json(client_view(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(REDACTED_MESSAGE)
    }
}
