//! Port trait implementation for `RestClient`.
//!
//! This module implements the core-owned `RecordStore` trait for
//! `RestClient`, mapping transport and status errors to `StoreError`.

use async_trait::async_trait;
use inovasi_core::{NewRecord, Record, RecordKey, RecordPatch, RecordStore, StoreError};
use tracing::debug;

use crate::client::RestClient;
use crate::error::RestError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `RestError` to core `StoreError`.
///
/// Constraint violations and other client errors are rejections carrying
/// the store's message; anything that might succeed later is unavailability.
fn map_error(err: RestError) -> StoreError {
    match err {
        RestError::Status { status, message } => match status {
            401 | 403 => StoreError::Rejected(format!("Not authorised to modify records: {message}")),
            408 | 429 | 500..=599 => StoreError::Unavailable(format!("HTTP {status}: {message}")),
            400..=499 => StoreError::Rejected(message),
            _ => StoreError::Unavailable(format!("Unexpected HTTP status {status}: {message}")),
        },
        RestError::Network(e) if e.is_timeout() => {
            StoreError::Unavailable(format!("Request timed out: {e}"))
        }
        RestError::Network(e) => StoreError::Unavailable(e.to_string()),
        err @ (RestError::InvalidResponse { .. } | RestError::JsonParse(_)) => {
            StoreError::Unavailable(err.to_string())
        }
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> RecordStore for RestClient<B> {
    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        let records = self.select_all().await.map_err(map_error)?;
        debug!(count = records.len(), "Fetched records");
        Ok(records)
    }

    async fn insert(&self, record: &NewRecord) -> Result<Record, StoreError> {
        self.insert_row(record).await.map_err(map_error)
    }

    async fn update(&self, key: RecordKey, patch: &RecordPatch) -> Result<(), StoreError> {
        self.patch_row(key, patch).await.map_err(map_error)
    }

    async fn delete_one(&self, key: RecordKey) -> Result<(), StoreError> {
        self.delete_row(key).await.map_err(map_error)
    }

    async fn delete_many(&self, keys: &[RecordKey]) -> Result<(), StoreError> {
        if keys.is_empty() {
            debug!("Bulk delete with no keys, skipping request");
            return Ok(());
        }
        self.delete_rows(keys).await.map_err(map_error)
    }
}
