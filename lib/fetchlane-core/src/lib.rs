//! Core types and traits for the fetchlane HTTP fetch adapter.
//!
//! This crate provides the transport-independent pieces:
//! - [`FetchPayload`] and [`FetchPayloadBuilder`] - request descriptors
//! - [`Response`] and [`ResponseSnapshot`] - the normalized response model
//! - [`RestError`] - the single failure type of a fetch
//! - [`FetchStrategy`] - payload in, response out
//! - [`Transport`] - the HTTP capability a strategy delegates to
//! - [`Method`] - HTTP method enum
//! - [`Error`] and [`Result`] - local errors

mod body;
mod error;
mod method;
mod payload;
pub mod prelude;
mod response;
mod strategy;
mod transport;

pub use body::{ContentType, from_json, to_form, to_json, to_query_string};
pub use error::{DEFAULT_FAILURE_STATUS, Error, HandlerContext, RestError, Result};
pub use method::Method;
pub use payload::{FetchPayload, FetchPayloadBuilder};
pub use response::{DEFAULT_ERROR_STATUS, Response, ResponseSnapshot};
pub use strategy::{FetchStrategy, FetchStrategyExt};
pub use transport::{RequestOptions, Transport, TransportError, TransportResponse};
