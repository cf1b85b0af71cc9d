//! Publish/subscribe channel for storage writes.
//!
//! Every context that writes through a [`super::NotifyingStore`] publishes here.
//! A [`ChangeSubscription`] only yields events produced by *other* contexts.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use gratia_core::storage::{ContextId, StorageEvent};

const DEFAULT_CAPACITY: usize = 256;

/// Cloneable handle to the broadcast channel shared by all contexts.
#[derive(Clone)]
pub struct ChangeHub {
    sender: broadcast::Sender<StorageEvent>,
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ChangeHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event. Having no subscribers is not an error.
    pub fn publish(&self, event: StorageEvent) {
        let delivered = self.sender.send(event).unwrap_or(0);
        tracing::trace!(delivered, "storage event published");
    }

    /// Subscribes on behalf of context `me`, optionally to a single key.
    pub fn subscribe(&self, me: ContextId, key: Option<String>) -> ChangeSubscription {
        ChangeSubscription {
            receiver: Some(self.sender.subscribe()),
            me,
            key,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Events from other contexts, until [`ChangeSubscription::unsubscribe`] is
/// called or the subscription is dropped.
pub struct ChangeSubscription {
    receiver: Option<broadcast::Receiver<StorageEvent>>,
    me: ContextId,
    key: Option<String>,
}

impl ChangeSubscription {
    /// Waits for the next matching event. Returns `None` once unsubscribed or
    /// when every publisher is gone.
    pub async fn recv(&mut self) -> Option<StorageEvent> {
        loop {
            let receiver = self.receiver.as_mut()?;
            match receiver.recv().await {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(event);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, context = %self.me, "storage events dropped, subscriber lagged");
                }
                Err(RecvError::Closed) => {
                    self.receiver = None;
                    return None;
                }
            }
        }
    }

    /// Non-blocking variant of [`Self::recv`].
    pub fn try_recv(&mut self) -> Option<StorageEvent> {
        loop {
            let receiver = self.receiver.as_mut()?;
            match receiver.try_recv() {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(event);
                    }
                }
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, context = %self.me, "storage events dropped, subscriber lagged");
                }
                Err(_) => return None,
            }
        }
    }

    /// Stops delivery and releases the channel slot.
    pub fn unsubscribe(&mut self) {
        self.receiver = None;
    }

    pub fn is_active(&self) -> bool {
        self.receiver.is_some()
    }

    fn accepts(&self, event: &StorageEvent) -> bool {
        event.is_from_other(&self.me)
            && self
                .key
                .as_deref()
                .is_none_or(|key| key == event.key)
    }
}
