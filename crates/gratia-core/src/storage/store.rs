use async_trait::async_trait;

use crate::error::Result;

/// Raw string storage keyed by the names in [`crate::keys`].
///
/// Implementations must make whole-value replacement atomic per key; there is
/// no field-level write.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
