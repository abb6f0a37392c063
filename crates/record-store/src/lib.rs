pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod store;

pub use common::RecordId;
pub use error::{Result, StoreError};
pub use memory::InMemoryRecordStore;
pub use postgres::PostgresRecordStore;
pub use record::{PendingRecord, StoredRecord, Version};
pub use store::{CounterStore, RecordStore, RecordStoreExt, SaveOptions};
