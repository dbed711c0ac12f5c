//! Request/response logging.
//!
//! [`LoggingTransport`] wraps any [`Transport`] and logs each exchange with
//! the `tracing` crate.

use std::time::Instant;

use fetchlane_core::{Method, RequestOptions, Transport, TransportError, TransportResponse};
use tracing::{Instrument, Level, debug, info, span, warn};

/// Log level for [`LoggingTransport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (request/response details).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

/// Transport decorator that logs requests and responses.
///
/// # Example
///
/// ```ignore
/// use fetchlane::{Fetcher, HyperTransport, LoggingTransport};
///
/// let fetcher = Fetcher::with_transport(LoggingTransport::new(HyperTransport::new()));
/// ```
#[derive(Debug, Clone)]
pub struct LoggingTransport<T> {
    inner: T,
    level: LogLevel,
}

impl<T> LoggingTransport<T> {
    /// Wrap `inner`, logging a summary at info level.
    #[must_use]
    pub const fn new(inner: T) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
        }
    }

    /// Wrap `inner`, logging headers and sizes at debug level.
    #[must_use]
    pub const fn debug(inner: T) -> Self {
        Self {
            inner,
            level: LogLevel::Debug,
        }
    }

    /// Configured log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Get a reference to the wrapped transport.
    #[must_use]
    pub const fn inner(&self) -> &T {
        &self.inner
    }

    /// Consume the wrapper and return the wrapped transport.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Transport> Transport for LoggingTransport<T> {
    async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<TransportResponse, TransportError> {
        let span = span!(Level::INFO, "http_request", %method, %url);

        async move {
            let start = Instant::now();

            match self.level {
                LogLevel::Debug => {
                    debug!(
                        headers = ?options.headers,
                        query = ?options.query,
                        body_len = options.body.as_ref().map_or(0, bytes::Bytes::len),
                        "sending request"
                    );
                }
                LogLevel::Info => {
                    info!("sending request");
                }
            }

            let result = self.inner.request(method, url, options).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(response) => match self.level {
                    LogLevel::Debug => {
                        debug!(
                            status = response.status(),
                            headers = ?response.headers(),
                            body_len = response.body().len(),
                            elapsed_ms = elapsed.as_millis(),
                            "received response"
                        );
                    }
                    LogLevel::Info => {
                        info!(
                            status = response.status(),
                            elapsed_ms = elapsed.as_millis(),
                            "received response"
                        );
                    }
                },
                Err(err) => {
                    warn!(
                        error = %err,
                        status = err.response().map(TransportResponse::status),
                        elapsed_ms = elapsed.as_millis(),
                        "request failed"
                    );
                }
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use fetchlane_core::HandlerContext;

    use super::*;

    struct Fixed(Result<TransportResponse, TransportError>);

    impl Transport for Fixed {
        async fn request(
            &self,
            _method: Method,
            _url: &str,
            _options: RequestOptions,
        ) -> Result<TransportResponse, TransportError> {
            self.0.clone()
        }
    }

    #[test]
    fn constructors_pick_the_level() {
        const QUIET: LoggingTransport<()> = LoggingTransport::new(());
        const VERBOSE: LoggingTransport<()> = LoggingTransport::debug(());

        assert_eq!(QUIET.level(), LogLevel::Info);
        assert_eq!(VERBOSE.level(), LogLevel::Debug);
    }

    #[tokio::test]
    async fn passes_responses_through() {
        let expected = TransportResponse::new(200, Vec::new(), "ok");
        let transport = LoggingTransport::debug(Fixed(Ok(expected.clone())));
        assert_eq!(transport.level(), LogLevel::Debug);

        let response = transport
            .request(Method::Get, "https://api.example.com", RequestOptions::default())
            .await
            .expect("response");
        assert_eq!(response, expected);
    }

    #[tokio::test]
    async fn passes_failures_through() {
        let failure = TransportError::new("connection refused", HandlerContext::new());
        let transport = LoggingTransport::new(Fixed(Err(failure.clone())));

        let err = transport
            .request(Method::Post, "https://api.example.com", RequestOptions::default())
            .await
            .expect_err("failure");
        assert_eq!(err, failure);
        assert!(transport.into_inner().0.is_err());
    }
}
