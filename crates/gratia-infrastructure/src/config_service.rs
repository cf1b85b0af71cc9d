//! Loads `config.toml` and applies environment overrides.

use gratia_core::config::AppConfig;
use gratia_core::error::{GratiaError, Result};
use std::path::Path;

/// Environment variable that overrides `gemini.api_key`.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Reads the configuration file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GratiaError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str::<AppConfig>(&content).map_err(|e| {
            GratiaError::config(format!("Failed to parse {}: {}", path.display(), e))
        })?
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        AppConfig::default()
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Applies overrides from an environment lookup.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(GEMINI_API_KEY_ENV).filter(|k| !k.is_empty()) {
        config.gemini.api_key = Some(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config.storage.poll_interval_ms, 500);
    }

    #[test]
    fn test_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"/srv/gratia\"\n\n[location]\nlatitude = -6.2\nlongitude = 106.8\n",
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.storage.data_dir.as_deref(), Some(Path::new("/srv/gratia")));
        assert_eq!(config.location.unwrap().latitude, -6.2);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[storage\n").unwrap();
        assert!(matches!(load_config(&path), Err(GratiaError::Config(_))));
    }

    #[test]
    fn test_env_override() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, |name| {
            (name == GEMINI_API_KEY_ENV).then(|| "from-env".to_string())
        });
        assert_eq!(config.gemini.api_key.as_deref(), Some("from-env"));

        apply_env_overrides(&mut config, |_| Some(String::new()));
        assert_eq!(config.gemini.api_key.as_deref(), Some("from-env"));
    }
}
