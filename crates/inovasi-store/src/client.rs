//! PostgREST client for the records table.
//!
//! The client speaks PostgREST filter syntax over a pluggable HTTP backend.
//! The `RecordStore` implementation lives in `port.rs`.

use inovasi_core::{NewRecord, Record, RecordKey, RecordPatch};
use tracing::debug;
use url::Url;

use crate::config::{StoreConfig, StoreConfigError};
use crate::error::RestResult;
use crate::http::{HttpBackend, HttpRequest, Method, ReqwestBackend};
use crate::parsing::{ensure_success, parse_inserted, parse_records};
use crate::url::{
    build_fetch_all_url, build_insert_url, build_key_eq_url, build_keys_in_url, build_table_url,
};

// ============================================================================
// Type Aliases
// ============================================================================

/// Supabase/PostgREST record store using the reqwest HTTP backend.
pub type PostgrestRecordStore = RestClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for one PostgREST table.
///
/// Generic over an HTTP backend so tests can swap in a fake. Use
/// `PostgrestRecordStore` in production code.
pub struct RestClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) table_url: Url,
}

impl PostgrestRecordStore {
    /// Create a client from configuration.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreConfigError> {
        let table_url = build_table_url(&config.base_url, &config.table)?;
        let backend = ReqwestBackend::new(config)?;
        debug!(endpoint = %table_url, "Created PostgREST record store");
        Ok(Self { backend, table_url })
    }
}

impl<B: HttpBackend> RestClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(table_url: Url, backend: B) -> Self {
        Self { backend, table_url }
    }

    /// Table endpoint this client talks to.
    pub const fn endpoint(&self) -> &Url {
        &self.table_url
    }

    pub(crate) async fn select_all(&self) -> RestResult<Vec<Record>> {
        let request = HttpRequest::new(Method::Get, build_fetch_all_url(&self.table_url));
        let body = ensure_success(self.backend.send(&request).await?)?;
        parse_records(&body)
    }

    pub(crate) async fn insert_row(&self, record: &NewRecord) -> RestResult<Record> {
        let body = serde_json::to_value([record])?;
        let request = HttpRequest::new(Method::Post, build_insert_url(&self.table_url))
            .with_body(body)
            .returning_rows();
        let body = ensure_success(self.backend.send(&request).await?)?;
        parse_inserted(&body)
    }

    pub(crate) async fn patch_row(&self, key: RecordKey, patch: &RecordPatch) -> RestResult<()> {
        let body = serde_json::to_value(patch)?;
        let request =
            HttpRequest::new(Method::Patch, build_key_eq_url(&self.table_url, key)).with_body(body);
        ensure_success(self.backend.send(&request).await?)?;
        Ok(())
    }

    pub(crate) async fn delete_row(&self, key: RecordKey) -> RestResult<()> {
        let request = HttpRequest::new(Method::Delete, build_key_eq_url(&self.table_url, key));
        ensure_success(self.backend.send(&request).await?)?;
        Ok(())
    }

    pub(crate) async fn delete_rows(&self, keys: &[RecordKey]) -> RestResult<()> {
        let request = HttpRequest::new(Method::Delete, build_keys_in_url(&self.table_url, keys));
        ensure_success(self.backend.send(&request).await?)?;
        Ok(())
    }
}
