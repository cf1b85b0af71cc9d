//! Versioned persistence shapes.
//!
//! Each stored value carries a `version` field next to its camelCase payload;
//! the migrators below turn any known version into the current domain model.

mod local_session;
mod shared_document;

pub use local_session::{LocalSessionDTO, LocalSessionV1_0_0, create_local_session_migrator};
pub use shared_document::{
    SharedDocumentDTO, SharedDocumentV1_0_0, create_shared_document_migrator,
};

/// Entity name of the shared document in the migrator registry.
pub const SHARED_DOCUMENT_ENTITY: &str = "shared_document";

/// Entity name of the local session in the migrator registry.
pub const LOCAL_SESSION_ENTITY: &str = "local_session";
