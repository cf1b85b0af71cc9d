//! Key-value persistence seam and change events.
//!
//! Both paired contexts write through a [`KeyValueStore`]; every write is
//! announced as a [`StorageEvent`] so the *other* context can pick it up.

mod event;
mod store;

pub use event::{ContextId, StorageEvent};
pub use store::KeyValueStore;
