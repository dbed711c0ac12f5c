//! Normalized HTTP response.
//!
//! A [`Response`] is filled in through chained `set_*` calls on a single owned
//! value, then handed to the caller:
//!
//! ```
//! use fetchlane_core::Response;
//!
//! let mut response = Response::new(200);
//! response
//!     .set_header("X-Request-Id", "abc")
//!     .set_body(r#"{"ok":true}"#);
//!
//! assert_eq!(response.json()["ok"], true);
//! ```
//!
//! Application-level failures are carried in-band with [`Response::set_error`];
//! they are ordinary return values, never raised.

use std::collections::HashMap;

use serde::Serialize;

use crate::ContentType;

/// Status used by [`Response::set_error_default`].
pub const DEFAULT_ERROR_STATUS: u16 = 400;

/// HTTP response with status, headers, body, and an optional logical error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Option<String>,
    error_message: Option<String>,
}

impl Response {
    /// Creates an empty response with the given status.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: None,
            error_message: None,
        }
    }

    // ------------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------------

    /// Sets the HTTP status code.
    pub fn set_status(&mut self, code: u16) -> &mut Self {
        self.status = code;
        self
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.status >= 300 && self.status < 400
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    // ------------------------------------------------------------------------
    // Headers
    // ------------------------------------------------------------------------

    /// Sets a header. Names are case-sensitive; the last write wins.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// All headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    // ------------------------------------------------------------------------
    // Body
    // ------------------------------------------------------------------------

    /// Sets the raw body text.
    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    /// Raw body text, `""` when no body was set.
    #[must_use]
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Replaces the body with the JSON encoding of `data` and marks it as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` cannot be serialized; the response is left
    /// untouched in that case.
    pub fn set_json<T: Serialize + ?Sized>(&mut self, data: &T) -> crate::Result<&mut Self> {
        let body = crate::to_json(data)?;
        Ok(self.replace_json_body(body))
    }

    /// Decodes the body as a JSON object.
    ///
    /// Never fails: a missing body, invalid JSON, or a JSON value that is not
    /// an object all yield an empty map.
    #[must_use]
    pub fn json(&self) -> serde_json::Map<String, serde_json::Value> {
        match self
            .body
            .as_deref()
            .map(serde_json::from_str::<serde_json::Value>)
        {
            Some(Ok(serde_json::Value::Object(map))) => map,
            _ => serde_json::Map::new(),
        }
    }

    /// Decodes the body into `T`, reporting where decoding failed.
    ///
    /// Unlike [`Response::json`], this is strict.
    ///
    /// # Errors
    ///
    /// Returns an error if the body does not deserialize into `T`.
    pub fn json_as<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_json(self.body().as_bytes())
    }

    // ------------------------------------------------------------------------
    // Logical errors
    // ------------------------------------------------------------------------

    /// Marks this response as a logical error.
    ///
    /// Sets the error message and status, and replaces the body with
    /// `{"error": message}` as JSON.
    pub fn set_error(&mut self, message: impl Into<String>, code: u16) -> &mut Self {
        let message = message.into();
        let body = serde_json::json!({ "error": message }).to_string();
        self.error_message = Some(message);
        self.set_status(code);
        self.replace_json_body(body)
    }

    /// Same as [`Response::set_error`] with status [`DEFAULT_ERROR_STATUS`].
    pub fn set_error_default(&mut self, message: impl Into<String>) -> &mut Self {
        self.set_error(message, DEFAULT_ERROR_STATUS)
    }

    /// Logical error message, if [`Response::set_error`] was called.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns `true` if this response carries a logical error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error_message.is_some()
    }

    // ------------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------------

    /// Read-only aggregate of status, headers, body and error.
    #[must_use]
    pub fn snapshot(&self) -> ResponseSnapshot<'_> {
        ResponseSnapshot {
            status: self.status,
            headers: &self.headers,
            body: self.body.as_deref(),
            error: self.error_message.as_deref(),
        }
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HashMap<String, String>, String) {
        (self.status, self.headers, self.body.unwrap_or_default())
    }

    /// Any earlier content type goes, whatever case its name was stored in.
    fn replace_json_body(&mut self, body: String) -> &mut Self {
        self.body = Some(body);
        self.headers
            .retain(|name, _| !name.eq_ignore_ascii_case(ContentType::HEADER));
        self.set_header(ContentType::HEADER, ContentType::Json.as_str())
    }
}

/// Borrowed view over a [`Response`], for serialization or logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseSnapshot<'a> {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: &'a HashMap<String, String>,
    /// Raw body, `None` when never set.
    pub body: Option<&'a str>,
    /// Logical error message.
    pub error: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    #[test]
    fn response_basic() {
        let mut response = Response::new(200);
        response
            .set_header("Content-Type", "text/plain")
            .set_body("hello");

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.body(), "hello");
        assert!(response.is_success());
        assert!(!response.is_error());
    }

    #[test]
    fn response_status_checks() {
        assert!(Response::new(301).is_redirection());
        assert!(Response::new(404).is_client_error());
        assert!(Response::new(500).is_server_error());

        let mut response = Response::new(200);
        response.set_status(204);
        assert_eq!(response.status(), 204);
    }

    #[test]
    fn headers_are_case_sensitive_and_last_write_wins() {
        let mut response = Response::new(200);
        response
            .set_header("X-Trace", "1")
            .set_header("x-trace", "2")
            .set_header("X-Trace", "3");

        assert_eq!(response.header("X-Trace"), Some("3"));
        assert_eq!(response.header("x-trace"), Some("2"));
        assert_eq!(response.header("X-TRACE"), None);
        assert_eq!(response.headers().len(), 2);
    }

    #[test]
    fn body_defaults_to_empty_string() {
        let response = Response::new(204);
        assert_eq!(response.body(), "");
    }

    #[test]
    fn json_is_lenient() {
        let mut response = Response::new(200);
        assert!(response.json().is_empty());

        response.set_body("not json");
        assert!(response.json().is_empty());

        response.set_body("[1, 2, 3]");
        assert!(response.json().is_empty());

        response.set_body("");
        assert!(response.json().is_empty());
    }

    #[test]
    fn set_json_round_trips() {
        let mut response = Response::new(200);
        response.set_json(&json!({ "a": 1 })).expect("serialize");

        assert_eq!(
            serde_json::Value::Object(response.json()),
            json!({ "a": 1 })
        );
        assert_eq!(response.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn set_json_overwrites_body_and_content_type() {
        let mut response = Response::new(200);
        response
            .set_header("Content-Type", "text/html")
            .set_body("<p>hi</p>");
        response
            .set_json(&json!({ "b": [true] }))
            .expect("serialize")
            .set_header("X-After", "yes");

        assert_eq!(response.body(), r#"{"b":[true]}"#);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("X-After"), Some("yes"));
    }

    #[test]
    fn set_json_failure_leaves_response_untouched() {
        let mut response = Response::new(200);
        response.set_body("before");

        let unserializable = HashMap::from([((1, 2), "tuple keys are not JSON")]);
        let_assert!(Err(crate::Error::JsonSerialization(_)) = response.set_json(&unserializable));
        check!(response.body() == "before");
        check!(response.header("Content-Type").is_none());
    }

    #[test]
    fn set_error_populates_everything() {
        let mut response = Response::new(200);
        response.set_body("stale").set_error("bad input", 422);

        assert_eq!(response.status(), 422);
        assert_eq!(response.error_message(), Some("bad input"));
        assert_eq!(
            serde_json::Value::Object(response.json()),
            json!({ "error": "bad input" })
        );
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert!(response.is_error());
    }

    #[test]
    fn set_error_drops_content_type_in_any_case() {
        let mut response = Response::new(200);
        response
            .set_header("content-type", "text/plain")
            .set_header("CONTENT-TYPE", "text/csv")
            .set_header("X-Kept", "1")
            .set_error("bad input", 422);

        let content_types: Vec<_> = response
            .headers()
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .collect();
        let_assert!([(name, value)] = content_types.as_slice());
        check!(name.as_str() == "Content-Type");
        check!(value.as_str() == "application/json");
        check!(response.header("X-Kept") == Some("1"));
    }

    #[test]
    fn set_json_drops_lowercase_content_type() {
        let mut response = Response::new(200);
        response.set_header("content-type", "text/html");
        response.set_json(&json!({ "a": 1 })).expect("serialize");

        assert_eq!(response.header("content-type"), None);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.headers().len(), 1);
    }

    #[test]
    fn set_error_default_uses_400() {
        let mut response = Response::new(200);
        response.set_error_default("missing field");

        assert_eq!(response.status(), DEFAULT_ERROR_STATUS);
        assert_eq!(response.error_message(), Some("missing field"));
    }

    #[test]
    fn set_error_escapes_message() {
        let mut response = Response::new(200);
        response.set_error(r#"quote " and \ slash"#, 400);

        assert_eq!(response.json()["error"], r#"quote " and \ slash"#);
    }

    #[test]
    fn json_as_is_strict() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct User {
            id: u64,
        }

        let mut response = Response::new(200);
        response.set_body(r#"{"id":7}"#);
        assert_eq!(response.json_as::<User>().expect("decode"), User { id: 7 });

        response.set_body("not json");
        assert!(response.json_as::<User>().is_err());
    }

    #[test]
    fn snapshot_exposes_all_fields() {
        let mut response = Response::new(201);
        response.set_header("Location", "/users/1");

        let snapshot = response.snapshot();
        assert_eq!(snapshot.status, 201);
        assert_eq!(snapshot.headers.get("Location").map(String::as_str), Some("/users/1"));
        assert_eq!(snapshot.body, None);
        assert_eq!(snapshot.error, None);

        response.set_error("conflict", 409);
        let value = serde_json::to_value(response.snapshot()).expect("serialize");
        assert_eq!(value["status"], 409);
        assert_eq!(value["body"], r#"{"error":"conflict"}"#);
        assert_eq!(value["error"], "conflict");
        assert_eq!(value["headers"]["Content-Type"], "application/json");
    }

    #[test]
    fn into_parts_defaults_body() {
        let (status, headers, body) = Response::new(204).into_parts();
        assert_eq!(status, 204);
        assert!(headers.is_empty());
        assert_eq!(body, "");
    }
}
