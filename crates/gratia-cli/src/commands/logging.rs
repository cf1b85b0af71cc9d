use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use gratia_core::config::LoggingSettings;

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
/// Logs go to stderr so command output stays clean.
pub fn init(settings: &LoggingSettings, force_json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| anyhow!("invalid log filter '{}': {e}", settings.level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if settings.json || force_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow!("failed to install logger: {e}"))
}
