//! Persistence and notification plumbing for Gratia.
//!
//! - `storage`: key-value backends and the change hub that tells the other
//!   context about writes
//! - `dto`: versioned on-disk shapes and their migrators
//! - `document_repository` / `session_repository`: typed repositories over a
//!   key-value store
//! - `config_service` / `paths`: configuration file and directory layout

pub mod config_service;
pub mod document_repository;
pub mod dto;
pub mod paths;
pub mod session_repository;
pub mod storage;

pub use crate::document_repository::KvDocumentRepository;
pub use crate::session_repository::KvSessionRepository;
pub use crate::storage::{ChangeHub, FileStore, FileStorePoller, MemoryStore, NotifyingStore};
