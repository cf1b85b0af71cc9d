//! Session repository over a key-value store.

use async_trait::async_trait;
use std::sync::Arc;
use version_migrate::Migrator;

use gratia_core::error::{GratiaError, Result};
use gratia_core::keys::{ONBOARDING_DONE_KEY, SESSION_KEY};
use gratia_core::session::{LocalSession, SessionRepository};
use gratia_core::storage::KeyValueStore;

use crate::dto::{LOCAL_SESSION_ENTITY, create_local_session_migrator};

pub struct KvSessionRepository {
    store: Arc<dyn KeyValueStore>,
    migrator: Migrator,
}

impl KvSessionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            migrator: create_local_session_migrator(),
        }
    }
}

#[async_trait]
impl SessionRepository for KvSessionRepository {
    async fn load_session(&self) -> Result<Option<LocalSession>> {
        let Some(raw) = self.store.get(SESSION_KEY).await? else {
            return Ok(None);
        };
        let json_value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| GratiaError::corrupt(SESSION_KEY, format!("invalid JSON: {}", e)))?;
        self.migrator
            .load_flat_from(LOCAL_SESSION_ENTITY, json_value)
            .map(Some)
            .map_err(|e| GratiaError::corrupt(SESSION_KEY, e.to_string()))
    }

    async fn save_session(&self, session: &LocalSession) -> Result<()> {
        let serialized = self
            .migrator
            .save_domain_flat(LOCAL_SESSION_ENTITY, session.clone())
            .map_err(|e| GratiaError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to serialize session: {}", e),
            })?;
        self.store.set(SESSION_KEY, &serialized).await
    }

    async fn is_onboarding_done(&self) -> Result<bool> {
        Ok(self.store.get(ONBOARDING_DONE_KEY).await?.as_deref() == Some("true"))
    }

    async fn set_onboarding_done(&self) -> Result<()> {
        self.store.set(ONBOARDING_DONE_KEY, "true").await
    }

    async fn clear(&self) -> Result<()> {
        self.store.remove(SESSION_KEY).await?;
        self.store.remove(ONBOARDING_DONE_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use gratia_core::session::UserRole;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let repo = KvSessionRepository::new(Arc::new(MemoryStore::new()));
        assert!(repo.load_session().await.unwrap().is_none());
        assert!(!repo.is_onboarding_done().await.unwrap());

        let session = LocalSession::new(UserRole::Mother);
        repo.save_session(&session).await.unwrap();
        repo.set_onboarding_done().await.unwrap();
        assert_eq!(repo.load_session().await.unwrap(), Some(session));
        assert!(repo.is_onboarding_done().await.unwrap());

        repo.clear().await.unwrap();
        assert!(repo.load_session().await.unwrap().is_none());
        assert!(!repo.is_onboarding_done().await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_session() {
        let store = MemoryStore::new();
        store.set(SESSION_KEY, "oops").await.unwrap();
        let repo = KvSessionRepository::new(Arc::new(store));
        assert!(repo.load_session().await.unwrap_err().is_corrupt());
    }
}
