//! SharedDocument DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Initial schema, every field optional with an explicit default

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use gratia_core::shared::SharedDocument;

/// Shared document DTO V1.0.0.
///
/// The record shapes are frozen for this version; a breaking change to any of
/// them needs a new DTO and a `MigratesTo` step.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct SharedDocumentV1_0_0 {
    #[serde(flatten)]
    pub document: SharedDocument,
}

/// Type alias for the latest SharedDocument version.
pub type SharedDocumentDTO = SharedDocumentV1_0_0;

/// Convert SharedDocumentV1_0_0 DTO to domain model
impl IntoDomain<SharedDocument> for SharedDocumentV1_0_0 {
    fn into_domain(self) -> SharedDocument {
        self.document
    }
}

/// Convert domain model to SharedDocumentV1_0_0 DTO (for version-migrate save support)
impl FromDomain<SharedDocument> for SharedDocumentV1_0_0 {
    fn from_domain(document: SharedDocument) -> Self {
        SharedDocumentV1_0_0 { document }
    }
}

/// Creates a Migrator for SharedDocument entities.
pub fn create_shared_document_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("shared_document" => [
        SharedDocumentV1_0_0,
        SharedDocument
    ], save = true)
    .expect("Failed to create shared_document migrator")
}
