//! Shared document repository over a key-value store.
//!
//! Documents are stored as versioned JSON under `gratia_sync_{pairingCode}`.

use async_trait::async_trait;
use std::sync::Arc;
use version_migrate::Migrator;

use gratia_core::error::{GratiaError, Result};
use gratia_core::keys;
use gratia_core::shared::{DocumentRepository, SharedDocument};
use gratia_core::storage::KeyValueStore;

use crate::dto::{SHARED_DOCUMENT_ENTITY, create_shared_document_migrator};

pub struct KvDocumentRepository {
    store: Arc<dyn KeyValueStore>,
    migrator: Migrator,
}

impl KvDocumentRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            migrator: create_shared_document_migrator(),
        }
    }

    /// Serializes a document in its stored form.
    pub fn encode(&self, document: &SharedDocument) -> Result<String> {
        self.migrator
            .save_domain_flat(SHARED_DOCUMENT_ENTITY, document.clone())
            .map_err(|e| GratiaError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to serialize shared document: {}", e),
            })
    }
}

#[async_trait]
impl DocumentRepository for KvDocumentRepository {
    async fn load(&self, pairing_code: &str) -> Result<Option<SharedDocument>> {
        let Some(key) = keys::sync_key(pairing_code) else {
            return Ok(None);
        };
        match self.store.get(&key).await? {
            Some(raw) => self.decode(&key, &raw).map(Some),
            None => Ok(None),
        }
    }

    async fn save(&self, document: &SharedDocument) -> Result<bool> {
        let Some(key) = keys::sync_key(&document.pairing_code) else {
            tracing::debug!("document has no pairing code, not persisted");
            return Ok(false);
        };
        let serialized = self.encode(document)?;
        self.store.set(&key, &serialized).await?;
        tracing::debug!(key = %key, bytes = serialized.len(), "shared document saved");
        Ok(true)
    }

    fn decode(&self, key: &str, raw: &str) -> Result<SharedDocument> {
        let json_value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| GratiaError::corrupt(key, format!("invalid JSON: {}", e)))?;
        self.migrator
            .load_flat_from(SHARED_DOCUMENT_ENTITY, json_value)
            .map_err(|e| GratiaError::corrupt(key, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use gratia_core::shared::records::TaskItem;
    use tempfile::TempDir;

    fn paired(code: &str, user: &str) -> SharedDocument {
        SharedDocument {
            pairing_code: code.to_string(),
            user_name: user.to_string(),
            ..SharedDocument::default()
        }
    }

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let repo = KvDocumentRepository::new(Arc::new(MemoryStore::new()));
        assert!(repo.load("GRATIA-AB12").await.unwrap().is_none());
        assert!(repo.load("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_whole_document() {
        let repo = KvDocumentRepository::new(Arc::new(MemoryStore::new()));
        let mut doc = paired("GRATIA-AB12", "Ana");
        doc.tasks.push(TaskItem {
            id: "t1".into(),
            text: "Prenatal vitamins".into(),
            completed: true,
        });

        assert!(repo.save(&doc).await.unwrap());
        let loaded = repo.load("GRATIA-AB12").await.unwrap().unwrap();
        assert_eq!(loaded, doc);
    }

    #[tokio::test]
    async fn test_unpaired_document_is_not_persisted() {
        let store = MemoryStore::new();
        let repo = KvDocumentRepository::new(Arc::new(store.clone()));
        assert!(!repo.save(&paired("", "Ana")).await.unwrap());
        assert!(store.is_empty().await);
        assert!(repo.load("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_later_save_replaces_whole_document() {
        let repo = KvDocumentRepository::new(Arc::new(MemoryStore::new()));
        let mut first = paired("G-1", "Ana");
        first.current_mood = "😢 Sad".into();
        let mut second = paired("G-1", "Ben");
        second.tasks.push(TaskItem {
            id: "t".into(),
            text: "Cook dinner".into(),
            completed: false,
        });

        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();

        let loaded = repo.load("G-1").await.unwrap().unwrap();
        assert_eq!(loaded, second);
        assert_ne!(loaded.current_mood, "😢 Sad");
    }

    #[tokio::test]
    async fn test_corrupt_value_is_typed_error() {
        let store = MemoryStore::new();
        store.set("gratia_sync_G-1", "{not json").await.unwrap();
        store.set("gratia_sync_G-2", "[1, 2, 3]").await.unwrap();
        let repo = KvDocumentRepository::new(Arc::new(store));

        assert!(repo.load("G-1").await.unwrap_err().is_corrupt());
        assert!(repo.load("G-2").await.unwrap_err().is_corrupt());
    }

    #[tokio::test]
    async fn test_file_backend() {
        let temp_dir = TempDir::new().unwrap();
        let repo = KvDocumentRepository::new(Arc::new(FileStore::new(temp_dir.path())));
        let doc = paired("GRATIA-ZZ99", "Ana");
        repo.save(&doc).await.unwrap();
        assert!(temp_dir.path().join("gratia_sync_GRATIA-ZZ99.json").exists());
        assert_eq!(repo.load("GRATIA-ZZ99").await.unwrap().unwrap(), doc);
    }

    #[tokio::test]
    async fn test_codes_differing_in_punctuation_are_separate_files() {
        let temp_dir = TempDir::new().unwrap();
        let repo = KvDocumentRepository::new(Arc::new(FileStore::new(temp_dir.path())));
        repo.save(&paired("G.1", "Ana")).await.unwrap();

        assert!(repo.load("G 1").await.unwrap().is_none());
        assert!(repo.load("G%1").await.unwrap().is_none());

        repo.save(&paired("G 1", "Ben")).await.unwrap();
        assert_eq!(repo.load("G.1").await.unwrap().unwrap().user_name, "Ana");
        assert_eq!(repo.load("G 1").await.unwrap().unwrap().user_name, "Ben");
    }
}
