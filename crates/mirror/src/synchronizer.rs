//! Full-refresh publication of a persisted collection.

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::Result;
use crate::publisher::{StatePublisher, StatePublisherExt};

/// Publishes a whole collection to the presentation layer.
///
/// Every call replaces both the live mirror and the original snapshot with
/// the collection it is given; nothing is patched incrementally. The caller
/// always passes a fresh reload from the store, so a publish that lands late
/// is corrected by the next one and never touches store truth.
#[derive(Clone)]
pub struct StateSynchronizer {
    publisher: Arc<dyn StatePublisher>,
    live_key: String,
    original_key: String,
}

impl StateSynchronizer {
    /// Creates a synchronizer publishing under `live_key` and
    /// `<live_key>_original`.
    pub fn new(publisher: Arc<dyn StatePublisher>, live_key: impl Into<String>) -> Self {
        let live_key = live_key.into();
        let original_key = format!("{live_key}_original");
        Self {
            publisher,
            live_key,
            original_key,
        }
    }

    /// Key of the live mirror the presentation layer edits and renders.
    pub fn live_key(&self) -> &str {
        &self.live_key
    }

    /// Key of the untouched snapshot used for dirty tracking.
    pub fn original_key(&self) -> &str {
        &self.original_key
    }

    /// Publishes `collection` under both keys. Idempotent.
    #[tracing::instrument(skip(self, collection), fields(key = %self.live_key, count = collection.len()))]
    pub async fn publish<T: Serialize + Sync>(&self, collection: &[T]) -> Result<()> {
        let live = serde_json::to_value(collection)?;
        let original = live.clone();

        self.publisher.set(&self.live_key, live).await;
        self.publisher.set(&self.original_key, original).await;

        metrics::counter!("mirror_publications").increment(1);
        tracing::debug!("mirror published");
        Ok(())
    }

    /// Reads the live mirror. Empty if nothing was published yet.
    pub async fn live<T: DeserializeOwned + Send>(&self) -> Result<Vec<T>> {
        Ok(self
            .publisher
            .get_as::<Vec<T>>(&self.live_key)
            .await?
            .unwrap_or_default())
    }

    /// Reads the original snapshot. Empty if nothing was published yet.
    pub async fn original<T: DeserializeOwned + Send>(&self) -> Result<Vec<T>> {
        Ok(self
            .publisher
            .get_as::<Vec<T>>(&self.original_key)
            .await?
            .unwrap_or_default())
    }

    /// Returns true if the live mirror was changed after the last publish.
    pub async fn is_dirty(&self) -> bool {
        let live = self.publisher.get(&self.live_key, Value::Null).await;
        let original = self.publisher.get(&self.original_key, Value::Null).await;
        live != original
    }
}
