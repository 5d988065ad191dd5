use serde::{Deserialize, Serialize};

use zscore_core::benchmark::{BenchmarkConfig, CacheConfig};

use crate::input;

/// Settings read from `--config`. Missing keys keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub benchmark: BenchmarkConfig,
    pub cache: CacheConfig,
}

/// Load a YAML or JSON config file, or defaults when no path is given.
pub fn load(path: Option<&str>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };

    let (canonical, contents) = input::file::read_text(path)?;
    // JSON is a subset of YAML, so one parser covers both.
    let config: AppConfig = serde_yaml::from_str(&contents)
        .map_err(|e| format!("Failed to parse config '{}': {}", canonical.display(), e))?;

    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}
