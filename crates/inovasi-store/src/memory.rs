//! In-memory record store.
//!
//! Behaves like the remote table for the controller: keys come from a
//! counter that never goes backwards, so a deleted key is never handed out
//! again. Failures can be queued up front to exercise error paths.

use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;
use inovasi_core::{NewRecord, Record, RecordKey, RecordPatch, RecordStore, StoreError};
use tokio::sync::Mutex;
use tracing::debug;

/// A store call, as recorded by `MemoryRecordStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    FetchAll,
    Insert,
    Update(RecordKey),
    DeleteOne(RecordKey),
    DeleteMany(Vec<RecordKey>),
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<RecordKey, Record>,
    next_key: RecordKey,
    failures: VecDeque<StoreError>,
    calls: Vec<StoreCall>,
}

impl MemoryState {
    fn begin(&mut self, call: StoreCall) -> Result<(), StoreError> {
        self.calls.push(call);
        self.failures.pop_front().map_or(Ok(()), Err)
    }
}

/// `RecordStore` backed by a map in memory.
#[derive(Debug)]
pub struct MemoryRecordStore {
    state: Mutex<MemoryState>,
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRecordStore {
    /// An empty store; the first insert gets key 1.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_key: 1,
                ..MemoryState::default()
            }),
        }
    }

    /// A store seeded with existing rows.
    ///
    /// New keys continue after the largest seeded key.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let rows: BTreeMap<RecordKey, Record> =
            records.into_iter().map(|r| (r.key, r)).collect();
        let next_key = rows.keys().next_back().map_or(1, |max| max + 1);
        Self {
            state: Mutex::new(MemoryState {
                rows,
                next_key,
                ..MemoryState::default()
            }),
        }
    }

    /// A store seeded with `count` records titled from `new_record`.
    pub fn seeded(count: RecordKey, new_record: impl Fn(RecordKey) -> NewRecord) -> Self {
        Self::with_records((1..=count).map(|key| new_record(key).into_record(key)))
    }

    /// Make the next call fail with `err`. Failures queue up in order.
    pub async fn fail_next(&self, err: StoreError) {
        self.state.lock().await.failures.push_back(err);
    }

    /// Calls received so far, in order.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().await.calls.clone()
    }

    /// Current rows, ordered by key.
    pub async fn snapshot(&self) -> Vec<Record> {
        self.state.lock().await.rows.values().cloned().collect()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        let mut state = self.state.lock().await;
        state.begin(StoreCall::FetchAll)?;
        Ok(state.rows.values().cloned().collect())
    }

    async fn insert(&self, record: &NewRecord) -> Result<Record, StoreError> {
        let mut state = self.state.lock().await;
        state.begin(StoreCall::Insert)?;
        let key = state.next_key;
        state.next_key += 1;
        let created = record.clone().into_record(key);
        state.rows.insert(key, created.clone());
        debug!(key, "Inserted in-memory record");
        Ok(created)
    }

    async fn update(&self, key: RecordKey, patch: &RecordPatch) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.begin(StoreCall::Update(key))?;
        let row = state
            .rows
            .get_mut(&key)
            .ok_or_else(|| StoreError::Rejected(format!("No record with key {key}")))?;
        patch.apply_to(row);
        Ok(())
    }

    async fn delete_one(&self, key: RecordKey) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.begin(StoreCall::DeleteOne(key))?;
        state.rows.remove(&key);
        Ok(())
    }

    async fn delete_many(&self, keys: &[RecordKey]) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.begin(StoreCall::DeleteMany(keys.to_vec()))?;
        for key in keys {
            state.rows.remove(key);
        }
        Ok(())
    }
}
