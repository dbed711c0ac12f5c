//! HTTP fetch adapter for Rust.
//!
//! Hand a [`FetchPayload`] to a [`Fetcher`] and get back a normalized
//! [`Response`], or a [`RestError`] when the transport fails. The transport
//! underneath ([`HyperTransport`] by default) is swappable through the
//! [`Transport`] trait.
//!
//! # Example
//!
//! ```ignore
//! use fetchlane::prelude::*;
//!
//! let fetcher = Fetcher::new();
//! let payload = FetchPayload::builder(Method::Get, "https://api.example.com/x")
//!     .param("q", "1")
//!     .build();
//!
//! let response = fetcher.fetch(&payload).await?;
//! let data = response.json();
//! ```

mod config;
mod connector;
mod fetcher;
mod logging;
pub mod prelude;
mod transport;

pub use config::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_POOL_IDLE_PER_HOST, DEFAULT_POOL_IDLE_TIMEOUT, DEFAULT_TIMEOUT,
    TransportConfig, TransportConfigBuilder,
};
pub use connector::https_connector;
pub use fetcher::{Fetcher, HEADER_VALUE_SEPARATOR};
pub use logging::{LogLevel, LoggingTransport};
pub use transport::HyperTransport;

// Re-export core types
pub use fetchlane_core::{
    ContentType, DEFAULT_ERROR_STATUS, DEFAULT_FAILURE_STATUS, Error, FetchPayload,
    FetchPayloadBuilder, FetchStrategy, FetchStrategyExt, HandlerContext, Method, RequestOptions,
    Response, ResponseSnapshot, RestError, Result, Transport, TransportError, TransportResponse,
    from_json, to_form, to_json, to_query_string,
};
