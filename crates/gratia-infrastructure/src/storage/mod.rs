//! Key-value storage backends.
//!
//! - [`MemoryStore`]: process-local map, shared by contexts in one process
//! - [`FileStore`]: one JSON file per key, atomic replace, shared across processes
//! - [`NotifyingStore`]: wraps a backend and announces writes on a [`ChangeHub`]
//! - [`FileStorePoller`]: turns writes by other processes into hub events

mod file;
mod hub;
mod memory;
mod notifying;
mod poller;

pub use file::FileStore;
pub use hub::{ChangeHub, ChangeSubscription};
pub use memory::MemoryStore;
pub use notifying::NotifyingStore;
pub use poller::{EXTERNAL_ORIGIN, FileStorePoller};
