//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request repeats an action that has already been applied.
    Conflict,
    /// A collaborator (store, signer) is temporarily unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
/// - `trace_id`, when present, must be non-empty.
///
/// Errors created inside a [`TraceId::scope`] capture the active trace
/// identifier automatically.
///
/// # Examples
/// ```
/// use volunteer_hub::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("event not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

/// Validation errors emitted by the fallible constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    EmptyMessage,
    EmptyTraceId,
}

impl std::fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
            Self::EmptyTraceId => write!(f, "trace identifier must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Create a new error.
    ///
    /// Blank messages are replaced with a generic description of the code so
    /// a constructor call can never panic on caller-provided text.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(_) => Self {
                code,
                message: fallback_message(code).to_owned(),
                trace_id: current_trace_id(),
                details: None,
            },
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            trace_id: current_trace_id(),
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was raised.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier, ignoring blank input.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.trim().is_empty() {
            self.trace_id = Some(id);
        }
        self
    }

    /// Attach a trace identifier, rejecting blank input.
    pub fn try_with_trace_id(
        mut self,
        id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        self.trace_id = Some(id);
        Ok(self)
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use volunteer_hub::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "name" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

fn current_trace_id() -> Option<String> {
    TraceId::current().map(|id| id.to_string())
}

fn fallback_message(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest => "invalid request",
        ErrorCode::Unauthorized => "unauthorized",
        ErrorCode::Forbidden => "forbidden",
        ErrorCode::NotFound => "not found",
        ErrorCode::Conflict => "conflict",
        ErrorCode::ServiceUnavailable => "service unavailable",
        ErrorCode::InternalError => "internal error",
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        let Error {
            code,
            message,
            trace_id,
            details,
        } = value;
        Self {
            code,
            message,
            trace_id,
            details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            trace_id,
            details,
        } = value;

        let mut error = Error::try_new(code, message)?;
        // Deserialised payloads carry their own correlation id, never the
        // ambient one.
        error.trace_id = None;
        if let Some(id) = trace_id {
            error = error.try_with_trace_id(id)?;
        }
        error.details = details;
        Ok(error)
    }
}
