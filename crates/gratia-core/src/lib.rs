//! Domain model for Gratia: the shared document two paired contexts keep in
//! sync, the per-context session, and the seams to storage and remote
//! collaborators.

pub mod advice;
pub mod config;
pub mod error;
pub mod keys;
pub mod location;
pub mod session;
pub mod shared;
pub mod storage;

// Re-export common error type
pub use error::GratiaError;
