//! Transport boundary.
//!
//! A [`Transport`] performs the actual HTTP exchange: connection management,
//! TLS, timeouts. A fetch strategy only sees the types in this module and
//! never the transport's native error type.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;

use bytes::Bytes;
use derive_more::{Display, Error};

use crate::{HandlerContext, Method};

/// Options bundle passed alongside method and URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Optional request body.
    pub body: Option<Bytes>,
    /// Query parameters, serialized as the query string.
    pub query: BTreeMap<String, String>,
}

/// Raw response as reported by a transport.
///
/// Headers keep every value in arrival order; the body is fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    status: u16,
    headers: Vec<(String, Vec<String>)>,
    body: Bytes,
}

impl TransportResponse {
    /// Creates a new transport response.
    #[must_use]
    pub fn new(status: u16, headers: Vec<(String, Vec<String>)>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Appends a header value, grouping it with earlier values of the same name.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, values)) => values.push(value),
            None => self.headers.push((name, vec![value])),
        }
        self
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Header names with all their values.
    #[must_use]
    pub fn headers(&self) -> &[(String, Vec<String>)] {
        &self.headers
    }

    /// Buffered body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, Vec<(String, Vec<String>)>, Bytes) {
        (self.status, self.headers, self.body)
    }
}

/// Failure reported by a transport.
///
/// `response` is set when the server answered but the transport still treats
/// the exchange as failed (e.g. a 4xx/5xx status).
#[derive(Debug, Clone, PartialEq, Display, Error)]
#[display("{message}")]
pub struct TransportError {
    message: String,
    #[error(not(source))]
    handler_context: HandlerContext,
    #[error(not(source))]
    response: Option<TransportResponse>,
}

impl TransportError {
    /// Failure without a response (connection refused, timeout, bad URL...).
    #[must_use]
    pub fn new(message: impl Into<String>, handler_context: HandlerContext) -> Self {
        Self {
            message: message.into(),
            handler_context,
            response: None,
        }
    }

    /// Failure that still received a response.
    #[must_use]
    pub fn with_response(
        message: impl Into<String>,
        handler_context: HandlerContext,
        response: TransportResponse,
    ) -> Self {
        Self {
            message: message.into(),
            handler_context,
            response: Some(response),
        }
    }

    /// Failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Diagnostic context.
    #[must_use]
    pub const fn handler_context(&self) -> &HandlerContext {
        &self.handler_context
    }

    /// Response received before failing, if any.
    #[must_use]
    pub const fn response(&self) -> Option<&TransportResponse> {
        self.response.as_ref()
    }

    /// Consume into (message, context, response).
    #[must_use]
    pub fn into_parts(self) -> (String, HandlerContext, Option<TransportResponse>) {
        (self.message, self.handler_context, self.response)
    }
}

/// HTTP transport capability.
///
/// Implementations are long-lived and shared across calls; they must be safe
/// to call concurrently.
pub trait Transport: Send + Sync {
    /// Perform one HTTP exchange.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for network, TLS, timeout or URL failures,
    /// and for any status the transport chooses to treat as a failure.
    fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        (**self).request(method, url, options)
    }
}
