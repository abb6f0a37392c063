use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use crate::{
    PendingRecord, RecordId, Result, StoreError, StoredRecord, Version,
    store::{CounterStore, RecordStore, SaveOptions},
};

/// In-memory record store for tests and single-process use.
///
/// Records keep their insertion order within a kind; updates replace a
/// record in place.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<HashMap<String, Vec<StoredRecord>>>>,
    counters: Arc<Mutex<HashMap<String, u64>>>,
}

impl InMemoryRecordStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records stored for a kind.
    pub async fn record_count(&self, kind: &str) -> usize {
        self.records.read().await.get(kind).map_or(0, Vec::len)
    }

    /// Returns the last value issued by a counter, if any.
    pub async fn counter_value(&self, kind: &str) -> Option<u64> {
        self.counters.lock().await.get(kind).copied()
    }

    /// Clears all records and counters.
    pub async fn clear(&self) {
        self.records.write().await.clear();
        self.counters.lock().await.clear();
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn save(&self, record: PendingRecord, options: SaveOptions) -> Result<StoredRecord> {
        let mut store = self.records.write().await;
        let records = store.entry(record.kind.clone()).or_default();

        let position = records.iter().position(|r| r.id == record.id);
        let current_version = position
            .map(|i| records[i].version)
            .unwrap_or(Version::initial());

        if let Some(expected) = options.expected_version
            && current_version != expected
        {
            return Err(StoreError::ConcurrencyConflict {
                kind: record.kind,
                id: record.id,
                expected,
                actual: current_version,
            });
        }

        let stored = StoredRecord {
            kind: record.kind,
            id: record.id,
            version: current_version.next(),
            stored_at: Utc::now(),
            payload: record.payload,
        };

        match position {
            Some(i) => records[i] = stored.clone(),
            None => records.push(stored.clone()),
        }

        Ok(stored)
    }

    async fn load(&self, kind: &str, id: RecordId) -> Result<Option<StoredRecord>> {
        let store = self.records.read().await;
        Ok(store
            .get(kind)
            .and_then(|records| records.iter().find(|r| r.id == id))
            .cloned())
    }

    async fn load_all(&self, kind: &str) -> Result<Vec<StoredRecord>> {
        let store = self.records.read().await;
        Ok(store.get(kind).cloned().unwrap_or_default())
    }

    async fn delete(&self, kind: &str, id: RecordId) -> Result<()> {
        let mut store = self.records.write().await;
        if let Some(records) = store.get_mut(kind) {
            records.retain(|r| r.id != id);
        }
        Ok(())
    }
}

#[async_trait]
impl CounterStore for InMemoryRecordStore {
    async fn next_value(&self, kind: &str, start: u64) -> Result<u64> {
        // The guard is held across the read and the write.
        let mut counters = self.counters.lock().await;
        let next = match counters.get(kind) {
            Some(current) => current
                .checked_add(1)
                .ok_or_else(|| StoreError::CounterOutOfRange {
                    kind: kind.to_string(),
                })?,
            None => start,
        };
        counters.insert(kind.to_string(), next);
        Ok(next)
    }
}
