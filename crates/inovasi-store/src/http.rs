//! HTTP backend abstraction for the PostgREST endpoint.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest, with retry and backoff for transient failures on reads.

use crate::config::{StoreConfig, StoreConfigError};
use crate::error::{RestError, RestResult};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::debug;
use url::Url;

// ============================================================================
// Request / Response
// ============================================================================

/// HTTP methods used against the table endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    /// Reads are idempotent and may be retried.
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Get)
    }

    const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request to the table endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<serde_json::Value>,
    /// Ask PostgREST to echo the affected rows (`Prefer: return=representation`).
    pub return_representation: bool,
}

impl HttpRequest {
    pub const fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
            return_representation: false,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub const fn returning_rows(mut self) -> Self {
        self.return_representation = true;
        self
    }
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

const fn is_transient_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500..=599)
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can exchange JSON with the table endpoint.
///
/// Any response that arrives is returned as-is, whatever its status;
/// only transport failures are errors.
///
/// This is an implementation detail - external code should use the
/// `RecordStore` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> RestResult<HttpResponse>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// Sends the `apikey` and bearer headers on every request. GET requests are
/// retried with exponential backoff on transient statuses and network
/// errors; writes are sent exactly once.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreConfigError> {
        let mut headers = HeaderMap::new();
        if let Some(ref key) = config.api_key {
            let apikey = HeaderValue::from_str(key)
                .map_err(|e| StoreConfigError::InvalidApiKey(e.to_string()))?;
            let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| StoreConfigError::InvalidApiKey(e.to_string()))?;
            headers.insert("apikey", apikey);
            headers.insert(AUTHORIZATION, bearer);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        })
    }

    fn build_request(&self, request: &HttpRequest) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(request.method.as_reqwest(), request.url.as_str());
        let prefer = if request.return_representation {
            "return=representation"
        } else {
            "return=minimal"
        };
        builder = builder.header("Prefer", prefer);
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        builder
    }
}

/// Longest wait between two retries.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Delay before retry number `attempt` (1-based): doubles each time, capped at `MAX_BACKOFF`.
fn backoff_delay(base: Duration, attempt: u8) -> Duration {
    let factor = 2u32.saturating_pow(u32::from(attempt.saturating_sub(1)));
    base.saturating_mul(factor).min(MAX_BACKOFF)
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: &HttpRequest) -> RestResult<HttpResponse> {
        let max_retries = if request.method.is_retryable() {
            self.max_retries
        } else {
            0
        };
        let mut last_error: Option<RestError> = None;

        for attempt in 0..=max_retries {
            if attempt > 0 {
                let delay = backoff_delay(self.retry_base_delay, attempt);
                debug!(attempt, ?delay, url = %request.url, "Retrying request");
                tokio::time::sleep(delay).await;
            }

            match self.build_request(request).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if is_transient_status(status) && attempt < max_retries {
                        last_error = Some(RestError::Status {
                            status,
                            message: format!("transient status from {}", request.url),
                        });
                        continue;
                    }
                    let body = response.text().await?;
                    return Ok(HttpResponse { status, body });
                }
                Err(e) => {
                    if attempt < max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| RestError::InvalidResponse {
            message: "Unknown error during request".to_string(),
        }))
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
