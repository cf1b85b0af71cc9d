//! Bridges writes made by another OS process into the local [`ChangeHub`].
//!
//! Two processes sharing a [`FileStore`] directory cannot see each other's
//! in-process hub, so each one polls the keys it cares about and republishes
//! changes it did not write itself.

use std::collections::HashMap;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use gratia_core::storage::{ContextId, StorageEvent};

use super::file::FileStore;
use super::hub::ChangeHub;

/// Origin attached to events discovered by polling.
pub const EXTERNAL_ORIGIN: &str = "external";

pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

pub struct FileStorePoller {
    store: FileStore,
    hub: ChangeHub,
    keys: Vec<String>,
    snapshot: HashMap<String, Option<String>>,
}

impl FileStorePoller {
    /// Captures the current value of `keys` as the baseline.
    pub fn new(store: FileStore, hub: ChangeHub, keys: Vec<String>) -> Self {
        let snapshot = keys
            .iter()
            .map(|key| (key.clone(), store.read_now(key).ok().flatten()))
            .collect();
        Self {
            store,
            hub,
            keys,
            snapshot,
        }
    }

    /// Checks every key once and publishes foreign changes. Returns them too.
    pub fn poll_once(&mut self) -> Vec<StorageEvent> {
        let mut events = Vec::new();
        for key in &self.keys {
            let current = match self.store.read_now(key) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "poll read failed");
                    continue;
                }
            };
            if self.snapshot.get(key) == Some(&current) {
                continue;
            }
            self.snapshot.insert(key.clone(), current.clone());
            if self.store.is_own_write(key, current.as_deref()) {
                continue;
            }
            tracing::debug!(key = %key, "external write detected");
            let event = StorageEvent {
                key: key.clone(),
                new_value: current,
                origin: ContextId::new(EXTERNAL_ORIGIN),
            };
            self.hub.publish(event.clone());
            events.push(event);
        }
        events
    }

    /// Polls every `interval` until `cancel` fires. Intervals below
    /// [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn spawn(mut self, interval: Duration, cancel: CancellationToken) -> JoinHandle<()> {
        let interval = interval.max(MIN_POLL_INTERVAL);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        self.poll_once();
                    }
                }
            }
            tracing::debug!("file store poller stopped");
        })
    }
}
