use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use ba_calendar::{EngineConfig, Toolkit};

/// Load the configuration file (if any), apply environment overrides, and
/// build the toolkit.
pub fn load_toolkit(path: Option<&Path>) -> Result<Toolkit> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            info!(path = %path.display(), "loaded configuration");
            EngineConfig::from_toml_str(&text)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    config
        .apply_env(|var| std::env::var(var).ok())
        .context("invalid environment override")?;

    Toolkit::from_config(&config).context("invalid configuration")
}
