//! Fetch strategy traits.
//!
//! - [`FetchStrategy`] - turn a [`FetchPayload`] into a normalized [`Response`]
//! - [`FetchStrategyExt`] - one-call helpers for common requests
//!
//! Code that needs to issue HTTP calls should depend on `impl FetchStrategy`
//! rather than on a concrete transport.

use std::future::Future;

use crate::{FetchPayload, Method, Response, RestError};

/// Performs exactly one HTTP request per call and normalizes the outcome.
pub trait FetchStrategy: Send + Sync {
    /// Fetch the payload.
    ///
    /// # Errors
    ///
    /// Every transport failure is reported as a [`RestError`]; logical errors
    /// set by a server are returned as an ordinary [`Response`].
    fn fetch(
        &self,
        payload: &FetchPayload,
    ) -> impl Future<Output = Result<Response, RestError>> + Send;
}

/// Extension trait for [`FetchStrategy`] with convenience methods.
pub trait FetchStrategyExt: FetchStrategy {
    /// Execute a GET request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get(&self, url: &str) -> impl Future<Output = Result<Response, RestError>> + Send {
        async move {
            let payload = FetchPayload::builder(Method::Get, url).build();
            self.fetch(&payload).await
        }
    }

    /// Execute a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the request fails.
    fn post_json<T: serde::Serialize + Sync + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> impl Future<Output = Result<Response, RestError>> + Send {
        async move {
            let payload = FetchPayload::builder(Method::Post, url).json(body)?.build();
            self.fetch(&payload).await
        }
    }

    /// Execute a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the request fails.
    fn put_json<T: serde::Serialize + Sync + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> impl Future<Output = Result<Response, RestError>> + Send {
        async move {
            let payload = FetchPayload::builder(Method::Put, url).json(body)?.build();
            self.fetch(&payload).await
        }
    }

    /// Execute a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn delete(&self, url: &str) -> impl Future<Output = Result<Response, RestError>> + Send {
        async move {
            let payload = FetchPayload::builder(Method::Delete, url).build();
            self.fetch(&payload).await
        }
    }
}

// Blanket implementation for all FetchStrategy implementors
impl<T: FetchStrategy> FetchStrategyExt for T {}
