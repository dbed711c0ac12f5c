//! HTTP transport implementation using hyper-util.

use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use fetchlane_core::{
    HandlerContext, Method, RequestOptions, Transport, TransportError, TransportResponse,
    to_query_string,
};
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{config::TransportConfig, connector::https_connector};

/// HTTP transport using hyper-util with connection pooling and rustls TLS.
///
/// Cheap to clone: clones share the connection pool.
///
/// # Example
///
/// ```ignore
/// use fetchlane::{HyperTransport, TransportConfig};
/// use std::time::Duration;
///
/// let transport = HyperTransport::with_config(
///     TransportConfig::builder()
///         .timeout(Duration::from_secs(5))
///         .http_errors(false)
///         .build(),
/// );
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: TransportConfig,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HyperTransport {
    /// Create a transport with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with custom configuration.
    #[must_use]
    pub fn with_config(config: TransportConfig) -> Self {
        let connector = https_connector(&config);

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner, config }
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Parse the URL and replace its query string with `query`, if any.
    fn build_url(
        raw: &str,
        query: &BTreeMap<String, String>,
        context: &HandlerContext,
    ) -> Result<Url, TransportError> {
        let mut url = Url::parse(raw).map_err(|err| {
            TransportError::new(format!("invalid URL `{raw}`: {err}"), context.clone())
        })?;

        if !query.is_empty() {
            url.set_query(Some(&to_query_string(query)));
        }

        Ok(url)
    }

    /// Build a hyper request from the method, URL and options.
    fn build_hyper_request(
        method: Method,
        url: &Url,
        headers: &HashMap<String, String>,
        body: Option<Bytes>,
    ) -> Result<http::Request<Full<Bytes>>, http::Error> {
        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str());

        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder.body(body.map_or_else(Full::default, Full::new))
    }

    /// Extract response headers, grouping repeated names in arrival order.
    ///
    /// hyper hands names over lowercased; they come out in canonical form
    /// (`content-type` becomes `Content-Type`).
    fn extract_headers(headers: &http::HeaderMap) -> Vec<(String, Vec<String>)> {
        headers
            .keys()
            .map(|name| {
                let values = headers
                    .get_all(name)
                    .iter()
                    .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                    .collect();
                (canonical_name(name.as_str()), values)
            })
            .collect()
    }

    async fn exchange(
        &self,
        request: http::Request<Full<Bytes>>,
        context: &HandlerContext,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .inner
            .request(request)
            .await
            .map_err(|err| Self::map_hyper_error(&err, context.clone()))?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(response.headers());

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|err| {
                TransportError::new(
                    format!("error reading response body: {err}"),
                    context.clone(),
                )
            })?
            .to_bytes();

        Ok(TransportResponse::new(status, headers, body))
    }

    fn map_hyper_error(
        err: &hyper_util::client::legacy::Error,
        mut context: HandlerContext,
    ) -> TransportError {
        let message = error_chain(err);
        context.insert("connect".to_string(), Value::Bool(err.is_connect()));
        context.insert("error".to_string(), Value::String(message.clone()));
        TransportError::new(message, context)
    }

    /// Failure for a 4xx/5xx response when `http_errors` is enabled.
    fn status_error(
        method: Method,
        url: &Url,
        response: TransportResponse,
        mut context: HandlerContext,
    ) -> TransportError {
        let status = response.status();
        let kind = if status < 500 { "Client" } else { "Server" };
        let reason = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default();
        let message = format!(
            "{kind} error: `{method} {url}` resulted in a `{status} {reason}` response"
        );

        context.insert("status".to_string(), Value::from(status));
        TransportError::with_response(message, context, response)
    }
}

/// Upper-case the first letter of every `-` separated word.
fn canonical_name(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len());
    let mut word_start = true;
    for ch in name.chars() {
        if word_start {
            canonical.push(ch.to_ascii_uppercase());
        } else {
            canonical.push(ch);
        }
        word_start = ch == '-';
    }
    canonical
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl Transport for HyperTransport {
    async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<TransportResponse, TransportError> {
        let mut context = HandlerContext::new();
        context.insert("method".to_string(), Value::from(method.as_str()));
        context.insert("url".to_string(), Value::from(url));

        let url = Self::build_url(url, &options.query, &context)?;
        context.insert("url".to_string(), Value::from(url.as_str()));

        let request = Self::build_hyper_request(method, &url, &options.headers, options.body)
            .map_err(|err| TransportError::new(format!("invalid request: {err}"), context.clone()))?;

        debug!(%method, %url, "dispatching request");

        let response = tokio::time::timeout(self.config.timeout, self.exchange(request, &context))
            .await
            .map_err(|_| {
                let mut context = context.clone();
                context.insert("timeout".to_string(), Value::Bool(true));
                TransportError::new(
                    format!(
                        "request timed out after {} ms",
                        self.config.timeout.as_millis()
                    ),
                    context,
                )
            })?
            .inspect_err(|err| debug!(%method, %url, error = %err, "request failed"))?;

        debug!(%method, %url, status = response.status(), "received response");

        if self.config.http_errors && response.status() >= 400 {
            return Err(Self::status_error(method, &url, response, context));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_default() {
        let transport = HyperTransport::new();
        assert_eq!(
            transport.config().timeout,
            std::time::Duration::from_secs(30)
        );
    }

    #[test]
    fn transport_keeps_its_config() {
        let config = TransportConfig::builder()
            .connect_timeout(std::time::Duration::from_millis(200))
            .pool_idle_per_host(0)
            .pool_idle_timeout(std::time::Duration::from_secs(1))
            .build();
        let transport = HyperTransport::with_config(config.clone());

        assert_eq!(transport.config(), &config);
        assert_eq!(transport.clone().config(), &config);
    }

    #[test]
    fn transport_is_debug() {
        let debug = format!("{:?}", HyperTransport::new());
        assert!(debug.contains("HyperTransport"));
    }

    #[test]
    fn build_url_replaces_query() {
        let query = BTreeMap::from([("q".to_string(), "a b".to_string())]);
        let url = HyperTransport::build_url(
            "https://api.example.com/x?stale=1",
            &query,
            &HandlerContext::new(),
        )
        .expect("url");
        assert_eq!(url.as_str(), "https://api.example.com/x?q=a%20b");

        let url = HyperTransport::build_url(
            "https://api.example.com/x?kept=1",
            &BTreeMap::new(),
            &HandlerContext::new(),
        )
        .expect("url");
        assert_eq!(url.query(), Some("kept=1"));
    }

    #[test]
    fn build_url_rejects_garbage() {
        let err = HyperTransport::build_url("", &BTreeMap::new(), &HandlerContext::new())
            .expect_err("empty URL");
        assert!(err.message().starts_with("invalid URL"));
        assert!(err.response().is_none());
    }

    #[test]
    fn extract_headers_groups_values() {
        let mut headers = http::HeaderMap::new();
        headers.append("set-cookie", http::HeaderValue::from_static("a=1"));
        headers.append("content-type", http::HeaderValue::from_static("text/plain"));
        headers.append("set-cookie", http::HeaderValue::from_static("b=2"));

        let extracted = HyperTransport::extract_headers(&headers);
        let cookies = extracted
            .iter()
            .find(|(name, _)| name == "Set-Cookie")
            .map(|(_, values)| values.clone());
        assert_eq!(cookies, Some(vec!["a=1".to_string(), "b=2".to_string()]));
        assert!(extracted.iter().any(|(name, _)| name == "Content-Type"));
        assert_eq!(extracted.len(), 2);
    }

    #[test]
    fn canonical_names() {
        assert_eq!(canonical_name("content-type"), "Content-Type");
        assert_eq!(canonical_name("x-multi"), "X-Multi");
        assert_eq!(canonical_name("etag"), "Etag");
        assert_eq!(canonical_name("www-authenticate"), "Www-Authenticate");
        assert_eq!(canonical_name("x--double-"), "X--Double-");
    }

    #[test]
    fn status_error_message() {
        let url = Url::parse("https://api.example.com/missing").expect("url");
        let err = HyperTransport::status_error(
            Method::Get,
            &url,
            TransportResponse::new(404, Vec::new(), "nope"),
            HandlerContext::new(),
        );

        assert_eq!(
            err.message(),
            "Client error: `GET https://api.example.com/missing` resulted in a `404 Not Found` response"
        );
        assert_eq!(err.handler_context()["status"], 404);
        assert_eq!(err.response().map(TransportResponse::status), Some(404));
    }
}
