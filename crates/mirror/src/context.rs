//! In-process keyed state shared with the presentation layer.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::publisher::StatePublisher;

/// Process-wide keyed state.
///
/// Created once at start-up and handed to every component that publishes or
/// reads mirrored state. Cloning shares the same underlying map.
#[derive(Clone, Default)]
pub struct StateContext {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl StateContext {
    /// Creates a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the published keys, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Returns the number of published keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if nothing has been published.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drops every published value. Called at shutdown.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl StatePublisher for StateContext {
    async fn set(&self, key: &str, value: Value) {
        self.entries.write().await.insert(key.to_string(), value);
    }

    async fn get(&self, key: &str, default: Value) -> Value {
        self.entries
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publisher::StatePublisherExt;
    use serde_json::json;

    #[tokio::test]
    async fn get_returns_default_for_missing_key() {
        let ctx = StateContext::new();
        assert_eq!(ctx.get("missing", json!([])).await, json!([]));
        assert!(ctx.is_empty().await);
    }

    #[tokio::test]
    async fn set_is_last_write_wins() {
        let ctx = StateContext::new();
        ctx.set("k", json!(1)).await;
        ctx.set("k", json!(2)).await;
        assert_eq!(ctx.get("k", Value::Null).await, json!(2));
        assert_eq!(ctx.len().await, 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let ctx = StateContext::new();
        let other = ctx.clone();
        other.set("shared", json!("yes")).await;
        assert_eq!(ctx.get("shared", Value::Null).await, json!("yes"));
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let ctx = StateContext::new();
        ctx.set("a", json!(1)).await;
        ctx.set("b", json!(2)).await;
        assert_eq!(ctx.keys().await, vec!["a".to_string(), "b".to_string()]);

        ctx.clear().await;
        assert!(ctx.is_empty().await);
    }

    #[tokio::test]
    async fn typed_get() {
        let ctx = StateContext::new();
        ctx.set("numbers", json!([1, 2, 3])).await;

        let numbers: Option<Vec<u32>> = ctx.get_as("numbers").await.unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));

        let missing: Option<Vec<u32>> = ctx.get_as("nothing").await.unwrap();
        assert!(missing.is_none());

        assert!(ctx.get_as::<Vec<u32>>("numbers").await.is_ok());
        ctx.set("bad", json!("not a list")).await;
        assert!(ctx.get_as::<Vec<u32>>("bad").await.is_err());
    }
}
