//! Fetch payload: the request descriptor handed to a fetch strategy.
//!
//! Use [`FetchPayload::builder`] to construct payloads with headers, query
//! parameters, and bodies.
//!
//! # Example
//!
//! ```
//! use fetchlane_core::{FetchPayload, Method};
//!
//! let payload = FetchPayload::builder(Method::Get, "https://api.example.com/search")
//!     .header("Accept", "application/json")
//!     .param("q", "rust")
//!     .build();
//!
//! assert_eq!(payload.param("q"), Some("rust"));
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::{ContentType, Method};

/// An immutable request descriptor: method, URL, headers, body and query parameters.
///
/// Query parameters are kept apart from the URL; the transport serializes them
/// as the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPayload {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<String>,
    params: BTreeMap<String, String>,
}

impl FetchPayload {
    /// Creates a new [`FetchPayloadBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: impl Into<String>) -> FetchPayloadBuilder {
        FetchPayloadBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Target URL, without the query parameters.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Query parameters.
    #[must_use]
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Single query parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Consume into (method, url, headers, body, params).
    #[must_use]
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (
        Method,
        String,
        HashMap<String, String>,
        Option<String>,
        BTreeMap<String, String>,
    ) {
        (self.method, self.url, self.headers, self.body, self.params)
    }
}

/// Builder for constructing [`FetchPayload`] instances.
#[derive(Debug, Clone)]
pub struct FetchPayloadBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<String>,
    params: BTreeMap<String, String>,
}

impl FetchPayloadBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            params: BTreeMap::new(),
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets a query parameter, replacing any previous value for `name`.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Sets multiple query parameters.
    #[must_use]
    pub fn params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.params.extend(params);
        self
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize + ?Sized>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self
            .header(ContentType::HEADER, ContentType::Json.as_str())
            .body(body))
    }

    /// Set a form-urlencoded body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn form<T: serde::Serialize + ?Sized>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_form(value)?;
        Ok(self
            .header(ContentType::HEADER, ContentType::FormUrlEncoded.as_str())
            .body(body))
    }

    /// Builds the [`FetchPayload`].
    #[must_use]
    pub fn build(self) -> FetchPayload {
        FetchPayload {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            params: self.params,
        }
    }
}
