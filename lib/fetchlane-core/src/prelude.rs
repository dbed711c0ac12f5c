//! Prelude module for convenient imports.
//!
//! ```ignore
//! use fetchlane_core::prelude::*;
//! ```

pub use crate::{
    ContentType, Error, FetchPayload, FetchStrategy, FetchStrategyExt, HandlerContext, Method,
    Response, RestError, Result, Transport,
};
