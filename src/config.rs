use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::organize::Weights;

/// Laudo configuration (loaded from .laudo.toml)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LaudoConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub weights: Weights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the report store file
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "terminal" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: default_format(),
        }
    }
}

fn default_store_path() -> String {
    "laudo-reports.json".to_string()
}

fn default_format() -> String {
    "terminal".to_string()
}

impl LaudoConfig {
    /// Try to load .laudo.toml from the given directory or its parents.
    /// Config is advisory: a parse failure logs a warning and falls back to defaults.
    pub fn load(start: &Path) -> Option<Self> {
        let config_path = find_config_file(start)?;
        debug!("Found config: {}", config_path.display());

        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str::<LaudoConfig>(&content) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                    None
                }
            },
            Err(e) => {
                debug!("Could not read {}: {}", config_path.display(), e);
                None
            }
        }
    }
}

/// Walk up from the start path to find .laudo.toml
fn find_config_file(start: &Path) -> Option<std::path::PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let config = current.join(".laudo.toml");
        if config.exists() {
            return Some(config);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Create a default .laudo.toml in the current directory
pub fn init_config() -> Result<()> {
    let config_path = std::env::current_dir()?.join(".laudo.toml");

    if config_path.exists() {
        println!("⚠️  .laudo.toml already exists in this directory");
        return Ok(());
    }

    let default_config = r#"# Laudo configuration

[store]
# Where report records are kept
path = "laudo-reports.json"

[output]
# Default output format: "terminal" or "json"
format = "terminal"

# Print-weight tuning. Only the ratios matter; they break ties between
# findings of equal risk when ordering a location section.
[weights]
# base = 100
# chars_per_line = 40
# description_line = 10
# notes_line = 8
# photo_row = 150
"#;

    std::fs::write(&config_path, default_config)?;
    println!("✅ Created .laudo.toml");
    println!("   Edit it to customize the store location and print weights.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: LaudoConfig = toml::from_str("").unwrap();
        assert_eq!(config.store.path, "laudo-reports.json");
        assert_eq!(config.output.format, "terminal");
        assert_eq!(config.weights.base, 100);
        assert_eq!(config.weights.photo_row, 150);
    }

    #[test]
    fn partial_weights_override_only_named_fields() {
        let config: LaudoConfig = toml::from_str("[weights]\nphoto_row = 200\n").unwrap();
        assert_eq!(config.weights.photo_row, 200);
        assert_eq!(config.weights.base, 100);
        assert_eq!(config.weights.description_line, 10);
    }
}
