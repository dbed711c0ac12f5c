//! Prelude module for convenient imports.
//!
//! ```ignore
//! use fetchlane::prelude::*;
//! ```

pub use crate::{
    FetchPayload, FetchStrategy, FetchStrategyExt, Fetcher, HyperTransport, LoggingTransport,
    Method, Response, RestError, Transport, TransportConfig,
};
