//! Error types for fetchlane.
//!
//! Two kinds of failure exist:
//! - [`Error`]: local misuse (unknown verb, unserializable body, strict decode).
//! - [`RestError`]: the single failure type of a fetch, built from a transport failure.
//!
//! Application-level errors are not represented here; they travel in-band on a
//! [`crate::Response`] through [`crate::Response::set_error`].

use derive_more::{Display, Error, From};

/// Opaque diagnostic payload attached to a transport failure.
///
/// Forwarded verbatim from the transport to [`RestError`]; the fetch strategy
/// never looks inside.
pub type HandlerContext = serde_json::Map<String, serde_json::Value>;

/// Status reported when a transport failure carries no response.
pub const DEFAULT_FAILURE_STATUS: u16 = 500;

// ============================================================================
// Local Error Type
// ============================================================================

/// Error type for local fetchlane operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Unsupported or malformed HTTP verb.
    #[display("unsupported HTTP method: {_0:?}")]
    #[from(skip)]
    InvalidMethod(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// Form serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Rest Error
// ============================================================================

/// Failure of a fetch.
///
/// Carries the transport's message, its diagnostic context untouched, and an
/// HTTP-like status: the failed response's status when one was received,
/// [`DEFAULT_FAILURE_STATUS`] otherwise.
#[derive(Debug, Clone, PartialEq, Display, Error)]
#[display("{message} (status {status})")]
pub struct RestError {
    message: String,
    #[error(not(source))]
    handler_context: HandlerContext,
    status: u16,
}

impl RestError {
    /// Create a rest error.
    #[must_use]
    pub fn new(message: impl Into<String>, handler_context: HandlerContext, status: u16) -> Self {
        Self {
            message: message.into(),
            handler_context,
            status,
        }
    }

    /// Create a rest error with an empty context and the default status.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message, HandlerContext::new(), DEFAULT_FAILURE_STATUS)
    }

    /// Human-readable message, as reported by the transport.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Diagnostic context forwarded from the transport.
    #[must_use]
    pub const fn handler_context(&self) -> &HandlerContext {
        &self.handler_context
    }

    /// HTTP-like status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns `true` if the status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Returns `true` if the status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Consume into (message, context, status).
    #[must_use]
    pub fn into_parts(self) -> (String, HandlerContext, u16) {
        (self.message, self.handler_context, self.status)
    }
}

impl From<Error> for RestError {
    fn from(err: Error) -> Self {
        Self::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::InvalidMethod("BREW".to_string());
        assert_eq!(err.to_string(), r#"unsupported HTTP method: "BREW""#);

        let err = Error::json_deserialization("user.address.city", "missing field `city`");
        assert_eq!(
            err.to_string(),
            "JSON deserialization error at 'user.address.city': missing field `city`"
        );
    }

    #[test]
    fn rest_error_accessors() {
        let mut context = HandlerContext::new();
        context.insert("errno".to_string(), serde_json::json!(7));

        let err = RestError::new("connection refused", context.clone(), 503);
        assert_eq!(err.message(), "connection refused");
        assert_eq!(err.handler_context(), &context);
        assert_eq!(err.status(), 503);
        assert!(err.is_server_error());
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "connection refused (status 503)");
    }

    #[test]
    fn rest_error_internal_defaults_to_500() {
        let err = RestError::internal("boom");
        assert_eq!(err.status(), DEFAULT_FAILURE_STATUS);
        assert!(err.handler_context().is_empty());
    }

    #[test]
    fn rest_error_from_local_error() {
        let err = RestError::from(Error::InvalidMethod("BREW".to_string()));
        assert_eq!(err.status(), 500);
        assert!(err.message().contains("BREW"));
    }

    #[test]
    fn rest_error_into_parts() {
        let (message, context, status) = RestError::internal("boom").into_parts();
        assert_eq!(message, "boom");
        assert!(context.is_empty());
        assert_eq!(status, 500);
    }
}
