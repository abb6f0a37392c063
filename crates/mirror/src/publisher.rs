//! Keyed state publication contract.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Result;

/// Keyed, process-wide shared state consumed by the presentation layer.
///
/// Writes are last-write-wins; there are no transactions across keys.
#[async_trait]
pub trait StatePublisher: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Value);

    /// Returns the value under `key`, or `default` if nothing was published.
    async fn get(&self, key: &str, default: Value) -> Value;
}

/// Typed reads on top of [`StatePublisher`].
#[async_trait]
pub trait StatePublisherExt: StatePublisher {
    /// Decodes the value under `key`. Returns None if nothing was published.
    async fn get_as<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key, Value::Null).await {
            Value::Null => Ok(None),
            value => Ok(Some(serde_json::from_value(value)?)),
        }
    }
}

impl<T: StatePublisher + ?Sized> StatePublisherExt for T {}
