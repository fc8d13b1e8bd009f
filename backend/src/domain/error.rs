//! Domain-level error type surfaced to inbound adapters.
//!
//! The error carries a stable [`ErrorCode`] and a human-readable description.
//! It knows nothing about HTTP; `inbound::http::error` decides the status code
//! and the wire envelope, and redacts internal descriptions before they leave
//! the process.

use std::fmt;

use crate::domain::TraceId;

/// Stable machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected failure inside the service or its collaborators.
    InternalError,
}

/// Error payload handed from handlers to the transport layer.
///
/// ## Invariants
/// - `description` is non-empty once trimmed of whitespace.
/// - `trace_id` is captured from the ambient [`TraceId`] at construction time.
///
/// # Examples
/// ```
/// use product_backend::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_request("Invalid id");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.description(), "Invalid id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    description: String,
    trace_id: Option<String>,
}

/// Validation errors emitted by the fallible constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    #[error("error description must not be empty")]
    EmptyDescription,
}

impl Error {
    /// Create a new error, panicking if the description is blank.
    ///
    /// Descriptions are compile-time literals or formatted driver messages, so
    /// a blank value is a programming error.
    pub fn new(code: ErrorCode, description: impl Into<String>) -> Self {
        match Self::try_new(code, description) {
            Ok(value) => value,
            Err(err) => panic!("error descriptions must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the description.
    pub fn try_new(
        code: ErrorCode,
        description: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ErrorValidationError::EmptyDescription);
        }
        Ok(Self {
            code,
            description,
            trace_id: TraceId::current().map(|id| id.to_string()),
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Full description, including driver text for internal errors.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Trace identifier of the request that produced this error, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Override the captured trace identifier.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(description: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, description)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(description: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, description)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(description: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, description)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(description: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, description)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

impl std::error::Error for Error {}
