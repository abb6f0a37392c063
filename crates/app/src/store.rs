//! Store backend chosen at start-up.

use async_trait::async_trait;
use common::RecordId;
use record_store::{
    CounterStore, InMemoryRecordStore, PendingRecord, PostgresRecordStore, RecordStore, Result,
    SaveOptions, StoredRecord,
};

/// The record store the application runs on.
#[derive(Clone)]
pub enum AppStore {
    /// Records live in process memory and are lost on exit.
    InMemory(InMemoryRecordStore),
    /// Records live in PostgreSQL.
    Postgres(PostgresRecordStore),
}

impl AppStore {
    /// Returns a short backend name for logs.
    pub fn backend(&self) -> &'static str {
        match self {
            AppStore::InMemory(_) => "memory",
            AppStore::Postgres(_) => "postgres",
        }
    }

    /// Releases any held connections.
    pub async fn close(&self) {
        if let AppStore::Postgres(store) = self {
            store.close().await;
        }
    }
}

#[async_trait]
impl RecordStore for AppStore {
    async fn save(&self, record: PendingRecord, options: SaveOptions) -> Result<StoredRecord> {
        match self {
            AppStore::InMemory(store) => store.save(record, options).await,
            AppStore::Postgres(store) => store.save(record, options).await,
        }
    }

    async fn load(&self, kind: &str, id: RecordId) -> Result<Option<StoredRecord>> {
        match self {
            AppStore::InMemory(store) => store.load(kind, id).await,
            AppStore::Postgres(store) => store.load(kind, id).await,
        }
    }

    async fn load_all(&self, kind: &str) -> Result<Vec<StoredRecord>> {
        match self {
            AppStore::InMemory(store) => store.load_all(kind).await,
            AppStore::Postgres(store) => store.load_all(kind).await,
        }
    }

    async fn delete(&self, kind: &str, id: RecordId) -> Result<()> {
        match self {
            AppStore::InMemory(store) => store.delete(kind, id).await,
            AppStore::Postgres(store) => store.delete(kind, id).await,
        }
    }
}

#[async_trait]
impl CounterStore for AppStore {
    async fn next_value(&self, kind: &str, start: u64) -> Result<u64> {
        match self {
            AppStore::InMemory(store) => store.next_value(kind, start).await,
            AppStore::Postgres(store) => store.next_value(kind, start).await,
        }
    }
}
