//! Shared document repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::shared::model::SharedDocument;

/// Stores whole shared documents under their pairing code.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Loads the document stored under `pairing_code`.
    ///
    /// Returns `Ok(None)` when nothing is stored or the code is empty, and
    /// `GratiaError::CorruptDocument` when the stored value does not parse.
    async fn load(&self, pairing_code: &str) -> Result<Option<SharedDocument>>;

    /// Replaces the stored document. Returns `Ok(false)` without writing when
    /// the document has no pairing code.
    async fn save(&self, document: &SharedDocument) -> Result<bool>;

    /// Parses a raw stored value (as carried by a change event).
    fn decode(&self, key: &str, raw: &str) -> Result<SharedDocument>;
}
