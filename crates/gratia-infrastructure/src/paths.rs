//! Directory layout for Gratia configuration and data.
//!
//! ```text
//! ~/.config/gratia/            # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/gratia/       # Data directory
//! ├── store/                   # Shared key-value store (one file per key)
//! └── profiles/<name>/         # Per-device session and onboarding flag
//! ```

use gratia_core::error::{GratiaError, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "gratia";

/// Unified path management for gratia.
pub struct GratiaPaths {
    config_override: Option<PathBuf>,
    data_override: Option<PathBuf>,
}

impl GratiaPaths {
    /// Uses the platform directories unless overridden.
    pub fn new(config_override: Option<PathBuf>, data_override: Option<PathBuf>) -> Self {
        Self {
            config_override,
            data_override,
        }
    }

    /// Returns the gratia configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.config_override {
            return Ok(dir.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| GratiaError::config("Cannot find config directory"))
    }

    /// Returns the path of `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the gratia data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_override {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| GratiaError::config("Cannot find data directory"))
    }

    /// Returns the directory of the shared key-value store.
    pub fn store_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("store"))
    }

    /// Returns the session directory of one device profile.
    ///
    /// Sessions are never synchronized, so each profile keeps its own.
    pub fn profile_dir(&self, profile: &str) -> Result<PathBuf> {
        if profile.trim().is_empty() {
            return Err(GratiaError::config("Profile name must not be blank"));
        }
        Ok(self.data_dir()?.join("profiles").join(escape_name(profile)))
    }
}

/// Escapes `name` into a single path component.
///
/// `[A-Za-z0-9_-]` pass through; every other byte, `%` included, becomes
/// `%XX`. Distinct names always give distinct components.
pub fn escape_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            escaped.push(char::from(byte));
        } else {
            escaped.push_str(&format!("%{byte:02X}"));
        }
    }
    escaped
}

/// File name for a storage key.
pub fn key_file_name(key: &str) -> String {
    format!("{}.json", escape_name(key))
}

/// Whether `path` is a store entry rather than a temp or lock file.
pub fn is_entry_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".json") && !name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let paths = GratiaPaths::new(Some("/tmp/cfg".into()), Some("/tmp/data".into()));
        assert_eq!(paths.config_file().unwrap(), PathBuf::from("/tmp/cfg/config.toml"));
        assert_eq!(paths.store_dir().unwrap(), PathBuf::from("/tmp/data/store"));
        assert_eq!(
            paths.profile_dir("mother").unwrap(),
            PathBuf::from("/tmp/data/profiles/mother")
        );
    }

    #[test]
    fn test_key_file_name() {
        assert_eq!(key_file_name("gratia_sync_GRATIA-AB12"), "gratia_sync_GRATIA-AB12.json");
        assert_eq!(key_file_name("gratia_sync_../x"), "gratia_sync_%2E%2E%2Fx.json");
    }

    #[test]
    fn test_punctuation_keeps_names_apart() {
        let names: Vec<String> = ["G.1", "G 1", "G%1", "G%2E1", "G1"]
            .iter()
            .map(|code| key_file_name(code))
            .collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), names.len(), "{names:?}");
        assert_eq!(escape_name("G%1"), "G%251");
    }

    #[test]
    fn test_profile_dirs_are_distinct() {
        let paths = GratiaPaths::new(None, Some("/tmp/data".into()));
        assert_ne!(paths.profile_dir("a.b").unwrap(), paths.profile_dir("a b").unwrap());
        assert_eq!(
            paths.profile_dir("../up").unwrap(),
            PathBuf::from("/tmp/data/profiles/%2E%2E%2Fup")
        );
        assert!(paths.profile_dir("  ").is_err());
    }

    #[test]
    fn test_is_entry_file() {
        assert!(is_entry_file(Path::new("/s/gratia_user_session.json")));
        assert!(!is_entry_file(Path::new("/s/.gratia_user_session.json.tmp")));
        assert!(!is_entry_file(Path::new("/s/gratia_user_session.lock")));
    }
}
