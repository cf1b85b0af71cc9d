use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of one execution context (a terminal, a tab, a device).
///
/// Events carry the id of the context that produced them so a context can
/// ignore its own writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(String);

impl ContextId {
    /// Generates a fresh random context id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A change written to the shared persistence namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageEvent {
    /// Key that changed.
    pub key: String,
    /// New serialized value, `None` when the key was removed.
    pub new_value: Option<String>,
    /// Context that performed the write.
    pub origin: ContextId,
}

impl StorageEvent {
    /// True when the event came from a context other than `me`.
    pub fn is_from_other(&self, me: &ContextId) -> bool {
        &self.origin != me
    }
}
