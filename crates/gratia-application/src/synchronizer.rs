//! Shared-state synchronizer.
//!
//! Writes go through a [`NotifyingStore`], so every save is announced to the
//! other contexts on the hub. Corrupt stored values are treated as absent.

use futures::Stream;
use std::sync::Arc;

use gratia_core::keys;
use gratia_core::shared::{DocumentRepository, SharedDocument};
use gratia_infrastructure::storage::ChangeSubscription;
use gratia_infrastructure::{KvDocumentRepository, NotifyingStore};

pub struct SharedStateSynchronizer {
    store: NotifyingStore,
    repository: Arc<KvDocumentRepository>,
}

impl SharedStateSynchronizer {
    pub fn new(store: NotifyingStore) -> Self {
        let repository = Arc::new(KvDocumentRepository::new(Arc::new(store.clone())));
        Self { store, repository }
    }

    /// Document stored under `pairing_code`, if any.
    pub async fn load(&self, pairing_code: &str) -> Option<SharedDocument> {
        match self.repository.load(pairing_code).await {
            Ok(document) => {
                tracing::debug!(pairing_code, found = document.is_some(), "shared document loaded");
                document
            }
            Err(e) => {
                tracing::warn!(pairing_code, error = %e, "stored shared document unreadable, treating as absent");
                None
            }
        }
    }

    /// Persists the whole document. Unpaired documents are skipped and
    /// storage failures are logged, never raised. Returns whether it was written.
    pub async fn save(&self, document: &SharedDocument) -> bool {
        match self.repository.save(document).await {
            Ok(written) => written,
            Err(e) => {
                tracing::warn!(pairing_code = %document.pairing_code, error = %e, "failed to save shared document");
                false
            }
        }
    }

    /// Documents written by other contexts under `pairing_code`.
    ///
    /// An empty code yields a subscription that never delivers.
    pub fn observe(&self, pairing_code: &str) -> DocumentSubscription {
        let mut inner = self.store.subscribe(keys::sync_key(pairing_code));
        if keys::sync_key(pairing_code).is_none() {
            inner.unsubscribe();
        }
        DocumentSubscription {
            inner,
            repository: self.repository.clone(),
        }
    }
}

/// Stream of remote documents for one pairing code.
pub struct DocumentSubscription {
    inner: ChangeSubscription,
    repository: Arc<KvDocumentRepository>,
}

impl DocumentSubscription {
    /// Next document written by another context. `None` after
    /// [`Self::unsubscribe`].
    ///
    /// Removals and undecodable values are skipped.
    pub async fn recv(&mut self) -> Option<SharedDocument> {
        loop {
            let event = self.inner.recv().await?;
            let Some(raw) = event.new_value else {
                continue;
            };
            match self.repository.decode(&event.key, &raw) {
                Ok(document) => {
                    tracing::debug!(key = %event.key, origin = %event.origin, "remote document received");
                    return Some(document);
                }
                Err(e) => {
                    tracing::warn!(key = %event.key, error = %e, "ignoring corrupt remote document");
                }
            }
        }
    }

    pub fn unsubscribe(&mut self) {
        self.inner.unsubscribe();
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    pub fn into_stream(self) -> impl Stream<Item = SharedDocument> {
        futures::stream::unfold(self, |mut subscription| async move {
            subscription
                .recv()
                .await
                .map(|document| (document, subscription))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use gratia_core::storage::{ContextId, KeyValueStore};
    use gratia_infrastructure::{ChangeHub, MemoryStore};
    use std::time::Duration;

    fn pair() -> (SharedStateSynchronizer, SharedStateSynchronizer, MemoryStore) {
        let backend = MemoryStore::new();
        let hub = ChangeHub::default();
        let a = NotifyingStore::new(Arc::new(backend.clone()), hub.clone(), ContextId::new("a"));
        let b = NotifyingStore::new(Arc::new(backend.clone()), hub, ContextId::new("b"));
        (
            SharedStateSynchronizer::new(a),
            SharedStateSynchronizer::new(b),
            backend,
        )
    }

    fn doc(code: &str, user: &str) -> SharedDocument {
        SharedDocument {
            pairing_code: code.into(),
            user_name: user.into(),
            ..SharedDocument::default()
        }
    }

    #[tokio::test]
    async fn test_round_trip() {
        let (a, b, _) = pair();
        let document = doc("G-1", "Ana");
        assert!(a.save(&document).await);
        assert_eq!(b.load("G-1").await, Some(document));
    }

    #[tokio::test]
    async fn test_unpaired_never_found() {
        let (a, _, backend) = pair();
        assert!(!a.save(&doc("", "Ana")).await);
        assert!(a.load("").await.is_none());
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_corrupt_loads_as_absent() {
        let (a, _, backend) = pair();
        backend.set("gratia_sync_G-1", "{broken").await.unwrap();
        assert!(a.load("G-1").await.is_none());
    }

    #[tokio::test]
    async fn test_observer_sees_other_context_only() {
        let (a, b, _) = pair();
        let mut on_a = a.observe("G-1");
        let mut on_b = b.observe("G-1");

        a.save(&doc("G-1", "Ana")).await;
        let received = on_b.recv().await.unwrap();
        assert_eq!(received.user_name, "Ana");

        let own = tokio::time::timeout(Duration::from_millis(50), on_a.recv()).await;
        assert!(own.is_err(), "a context must not observe its own write");
    }

    #[tokio::test]
    async fn test_other_codes_not_delivered() {
        let (a, b, _) = pair();
        let mut on_b = b.observe("G-1");
        a.save(&doc("G-2", "Ana")).await;
        a.save(&doc("G-1", "Ana")).await;
        assert_eq!(on_b.recv().await.unwrap().pairing_code, "G-1");
    }

    #[tokio::test]
    async fn test_unsubscribed_receives_nothing() {
        let (a, b, _) = pair();
        let mut on_b = b.observe("G-1");
        on_b.unsubscribe();
        a.save(&doc("G-1", "Ana")).await;
        assert!(!on_b.is_active());
        assert!(on_b.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_empty_code_subscription_is_inert() {
        let (_, b, _) = pair();
        let mut sub = b.observe("  ");
        assert!(!sub.is_active());
        assert!(sub.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_stream_adapter() {
        let (a, b, _) = pair();
        let mut stream = Box::pin(b.observe("G-1").into_stream());
        a.save(&doc("G-1", "Ana")).await;
        a.save(&doc("G-1", "Ana again")).await;
        assert_eq!(stream.next().await.unwrap().user_name, "Ana");
        assert_eq!(stream.next().await.unwrap().user_name, "Ana again");
    }
}
