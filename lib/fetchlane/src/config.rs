//! Settings for [`crate::HyperTransport`].
//!
//! ```
//! use std::time::Duration;
//! use fetchlane::TransportConfig;
//!
//! let config = TransportConfig::builder()
//!     .timeout(Duration::from_secs(5))
//!     .http_errors(false)
//!     .build();
//!
//! assert_eq!(config.connect_timeout, fetchlane::DEFAULT_CONNECT_TIMEOUT);
//! ```

use std::time::Duration;

/// Budget for a whole exchange: connect, send, and drain the body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Budget for establishing a connection (TCP and TLS).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Idle pooled connections kept per host.
pub const DEFAULT_POOL_IDLE_PER_HOST: usize = 32;

/// How long an idle pooled connection is kept.
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Transport settings. Every field has a default; see the `DEFAULT_*` constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Whole-exchange budget. Expiry is a failure with `timeout: true` in
    /// the handler context.
    pub timeout: Duration,
    /// Applied by the connector. Expiry is a failure with `connect: true`.
    pub connect_timeout: Duration,
    /// Upper bound of idle connections the pool keeps per host.
    pub pool_idle_per_host: usize,
    /// Idle connections older than this are dropped from the pool.
    pub pool_idle_timeout: Duration,
    /// Report 4xx/5xx responses as failures carrying the response.
    /// On by default; when off they come back as ordinary responses.
    pub http_errors: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_idle_per_host: DEFAULT_POOL_IDLE_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
            http_errors: true,
        }
    }
}

impl TransportConfig {
    /// Start from the defaults.
    #[must_use]
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }

    /// Start from this configuration, to derive a variant of it.
    #[must_use]
    pub fn to_builder(&self) -> TransportConfigBuilder {
        TransportConfigBuilder {
            config: self.clone(),
        }
    }
}

/// Builder for [`TransportConfig`]; fields not touched keep their seed value.
#[derive(Debug, Clone, Default)]
pub struct TransportConfigBuilder {
    config: TransportConfig,
}

impl TransportConfigBuilder {
    /// See [`TransportConfig::timeout`].
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// See [`TransportConfig::connect_timeout`].
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// `0` disables keeping idle connections.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config.pool_idle_per_host = count;
        self
    }

    /// See [`TransportConfig::pool_idle_timeout`].
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// See [`TransportConfig::http_errors`].
    #[must_use]
    pub const fn http_errors(mut self, enabled: bool) -> Self {
        self.config.http_errors = enabled;
        self
    }

    /// The configured [`TransportConfig`].
    #[must_use]
    pub fn build(self) -> TransportConfig {
        self.config
    }
}
