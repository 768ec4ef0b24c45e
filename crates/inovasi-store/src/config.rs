//! Public configuration for the PostgREST record store.
//!
//! This module provides a stable public API for configuring the REST client.
//! The resolved endpoint is derived from this when the client is built.

use std::time::Duration;

use thiserror::Error;

/// Table holding the innovation records.
pub const DEFAULT_TABLE: &str = "inovasi_daerah";

/// Configuration for the PostgREST record store.
///
/// # Example
///
/// ```
/// use inovasi_store::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::new("https://project.supabase.co")
///     .with_api_key("anon-key")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Clone)]
pub struct StoreConfig {
    /// Project URL, without the `/rest/v1` suffix
    pub(crate) base_url: String,
    /// Anonymous or service key, sent as `apikey` and bearer token
    pub(crate) api_key: Option<String>,
    /// Table name
    pub(crate) table: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Retry attempts for transient errors on reads
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("table", &self.table)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl StoreConfig {
    /// Create a configuration for a Supabase project URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            table: DEFAULT_TABLE.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("inovasi-store/", env!("CARGO_PKG_VERSION")).to_string(),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(500),
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_optional_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Set the table name.
    ///
    /// Defaults to `inovasi_daerah`.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds. A timed-out request surfaces as
    /// `StoreError::Unavailable`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the retry count for failed fetches.
    ///
    /// Only reads are retried; writes are sent once. Defaults to 2.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

/// Errors building a client from a `StoreConfig`.
#[derive(Debug, Error)]
pub enum StoreConfigError {
    #[error("Invalid store URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Table name cannot be empty")]
    EmptyTable,

    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
