//! Record store trait definition.
//!
//! This port defines the interface to the remote table that persists
//! innovation records. Implementations handle all transport details.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::{NewRecord, Record, RecordKey, RecordPatch};

/// Remote store for innovation records.
///
/// # Design Rules
///
/// - No HTTP types in signatures
/// - CRUD-only: fetch all, insert, update, delete one, delete many
/// - Search, filtering and sorting belong in the query pipeline, not here
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every record, ordered by key ascending.
    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError>;

    /// Insert a new record.
    ///
    /// Returns the persisted record with its assigned key.
    async fn insert(&self, record: &NewRecord) -> Result<Record, StoreError>;

    /// Apply a partial update to the record with the given key.
    async fn update(&self, key: RecordKey, patch: &RecordPatch) -> Result<(), StoreError>;

    /// Delete the record with the given key.
    async fn delete_one(&self, key: RecordKey) -> Result<(), StoreError>;

    /// Delete every record whose key is in `keys`, in a single call.
    async fn delete_many(&self, keys: &[RecordKey]) -> Result<(), StoreError>;
}
