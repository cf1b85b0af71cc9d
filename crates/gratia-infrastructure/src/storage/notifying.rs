use async_trait::async_trait;
use std::sync::Arc;

use gratia_core::error::Result;
use gratia_core::storage::{ContextId, KeyValueStore, StorageEvent};

use super::hub::{ChangeHub, ChangeSubscription};

/// A context's view of the shared store: writes go to the backend and are then
/// announced on the hub, tagged with this context's id.
#[derive(Clone)]
pub struct NotifyingStore {
    inner: Arc<dyn KeyValueStore>,
    hub: ChangeHub,
    origin: ContextId,
}

impl NotifyingStore {
    pub fn new(inner: Arc<dyn KeyValueStore>, hub: ChangeHub, origin: ContextId) -> Self {
        Self { inner, hub, origin }
    }

    /// Subscribes to writes made by other contexts.
    pub fn subscribe(&self, key: Option<String>) -> ChangeSubscription {
        self.hub.subscribe(self.origin.clone(), key)
    }
}

#[async_trait]
impl KeyValueStore for NotifyingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.set(key, value).await?;
        self.hub.publish(StorageEvent {
            key: key.to_string(),
            new_value: Some(value.to_string()),
            origin: self.origin.clone(),
        });
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await?;
        self.hub.publish(StorageEvent {
            key: key.to_string(),
            new_value: None,
            origin: self.origin.clone(),
        });
        Ok(())
    }
}
