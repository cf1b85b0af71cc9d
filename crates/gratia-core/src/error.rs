//! Error types for the Gratia workspace.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every Gratia crate.
///
/// Variants are typed and structured so callers can tell persistence problems
/// apart from corrupt data and from an unavailable remote collaborator.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum GratiaError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Storage is absent or refused the write (quota, permissions, poisoned lock).
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    /// A stored value exists but is not a document of the expected shape.
    #[error("Corrupt document under '{key}': {message}")]
    CorruptDocument { key: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// The AI or geolocation collaborator failed.
    #[error("Remote service '{service}' unavailable: {message}")]
    RemoteServiceUnavailable {
        service: String,
        message: String,
        quota_exceeded: bool,
    },

    /// A session lifecycle action was attempted from the wrong phase.
    #[error("Cannot {action} while session is {from}")]
    InvalidTransition { from: String, action: String },

    /// Input rejected before touching any state.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GratiaError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a PersistenceUnavailable error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::PersistenceUnavailable(message.into())
    }

    /// Creates a CorruptDocument error for the given storage key
    pub fn corrupt(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptDocument {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a RemoteServiceUnavailable error
    pub fn remote(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteServiceUnavailable {
            service: service.into(),
            message: message.into(),
            quota_exceeded: false,
        }
    }

    /// Creates a RemoteServiceUnavailable error caused by an exhausted quota
    pub fn quota_exceeded(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteServiceUnavailable {
            service: service.into(),
            message: message.into(),
            quota_exceeded: true,
        }
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(from: impl Into<String>, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.into(),
            action: action.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a CorruptDocument error
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptDocument { .. })
    }

    /// Check if this is a remote service failure
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteServiceUnavailable { .. })
    }

    /// Check if the remote service refused the call because of its quota
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(
            self,
            Self::RemoteServiceUnavailable {
                quota_exceeded: true,
                ..
            }
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for GratiaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for GratiaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GratiaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<version_migrate::MigrationError> for GratiaError {
    fn from(err: version_migrate::MigrationError) -> Self {
        Self::Migration(err.to_string())
    }
}

impl From<anyhow::Error> for GratiaError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, GratiaError>`.
pub type Result<T> = std::result::Result<T, GratiaError>;
