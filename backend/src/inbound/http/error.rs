//! HTTP adapter mapping for domain errors.
//!
//! Every failing handler returns `domain::Error`; this module picks the status
//! code, logs the full description, and writes the [`Envelope`]. Internal
//! descriptions never reach the client.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

use super::Envelope;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Description written for every internal failure.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_description(error: &Error) -> &str {
    match error.code() {
        ErrorCode::InternalError => INTERNAL_SERVER_ERROR,
        _ => error.description(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = self.trace_id().unwrap_or_default();
        if status.is_server_error() {
            error!(
                status = status.as_u16(),
                trace_id,
                error = self.description(),
                "request failed"
            );
        } else {
            warn!(
                status = status.as_u16(),
                trace_id,
                error = self.description(),
                "request rejected"
            );
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(Envelope::new(status, public_description(self)))
    }
}
