//! The fetch strategy: payload in, normalized response out.

use bytes::Bytes;
use fetchlane_core::{
    DEFAULT_FAILURE_STATUS, FetchPayload, FetchStrategy, RequestOptions, Response, RestError,
    Transport, TransportError, TransportResponse,
};

use crate::{HyperTransport, TransportConfig};

/// Separator for flattening multi-valued headers.
pub const HEADER_VALUE_SEPARATOR: &str = ", ";

/// [`FetchStrategy`] delegating to a [`Transport`].
///
/// Holds no per-call state; one instance can serve any number of calls.
///
/// # Example
///
/// ```ignore
/// use fetchlane::prelude::*;
///
/// let fetcher = Fetcher::new();
/// let payload = FetchPayload::builder(Method::Get, "https://api.example.com/x")
///     .param("q", "1")
///     .build();
///
/// match fetcher.fetch(&payload).await {
///     Ok(response) => println!("{}", response.body()),
///     Err(err) => eprintln!("{} failed with {}", err.message(), err.status()),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Fetcher<T = HyperTransport> {
    transport: T,
}

impl Fetcher {
    /// Create a fetcher over a default [`HyperTransport`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fetcher over a [`HyperTransport`] with custom configuration.
    #[must_use]
    pub fn with_config(config: TransportConfig) -> Self {
        Self::with_transport(HyperTransport::with_config(config))
    }
}

impl<T> Fetcher<T> {
    /// Create a fetcher over any transport.
    #[must_use]
    pub const fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Get a reference to the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> FetchStrategy for Fetcher<T> {
    async fn fetch(&self, payload: &FetchPayload) -> Result<Response, RestError> {
        let options = RequestOptions {
            headers: payload.headers().clone(),
            body: payload.body().map(|body| Bytes::copy_from_slice(body.as_bytes())),
            query: payload.params().clone(),
        };

        let transport_response = self
            .transport
            .request(payload.method(), payload.url(), options)
            .await
            .map_err(into_rest_error)?;

        Ok(normalize(transport_response))
    }
}

/// Build a [`Response`] from what the transport reported.
fn normalize(transport_response: TransportResponse) -> Response {
    let (status, headers, body) = transport_response.into_parts();

    let mut response = Response::new(status);
    response.set_body(String::from_utf8_lossy(&body));
    for (name, values) in headers {
        response.set_header(name, values.join(HEADER_VALUE_SEPARATOR));
    }
    response
}

fn into_rest_error(err: TransportError) -> RestError {
    let (message, handler_context, response) = err.into_parts();
    let status = response.map_or(DEFAULT_FAILURE_STATUS, |r| r.status());
    RestError::new(message, handler_context, status)
}
