//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\cover-fetch\config.toml
//! - macOS: ~/Library/Application Support/cover-fetch/config.toml
//! - Linux: ~/.config/cover-fetch/config.toml
//!
//! The file holds credentials and tuning you don't want to retype; CLI
//! flags and environment variables override it. Loading is tolerant -
//! a missing or broken file degrades to defaults with a warning, it never
//! aborts the run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::dataset::ColumnSpec;

/// File-backed configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog API credentials
    pub credentials: CredentialsConfig,

    /// Batch tuning knobs
    pub enrichment: EnrichmentTuning,

    /// Column names in the input dataset
    pub dataset: ColumnSpec,
}

/// Catalog API credentials, both optional in the file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Batch tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentTuning {
    /// Pause between rows, in milliseconds
    pub row_delay_ms: u64,

    /// Maximum request attempts when rate limited
    pub max_retries: u32,

    /// Per-request timeout, in seconds
    pub timeout_secs: u64,
}

impl Default for EnrichmentTuning {
    fn default() -> Self {
        Self {
            row_delay_ms: 1000,
            max_retries: 3,
            timeout_secs: 60,
        }
    }
}

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cover-fetch"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if the file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[enrichment]"));
        assert!(toml.contains("[dataset]"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.credentials.client_id = Some("id-123".to_string());
        config.enrichment.row_delay_ms = 250;
        config.dataset.track = "song".to_string();

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.credentials.client_id, Some("id-123".to_string()));
        assert_eq!(parsed.enrichment.row_delay_ms, 250);
        assert_eq!(parsed.dataset.track, "song");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Config with only some fields
        let toml = r#"
[credentials]
client_id = "my-id"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        // Specified field is set
        assert_eq!(config.credentials.client_id, Some("my-id".to_string()));

        // Other fields use defaults
        assert_eq!(config.credentials.client_secret, None);
        assert_eq!(config.enrichment.max_retries, 3);
        assert_eq!(config.enrichment.timeout_secs, 60);
        assert_eq!(config.dataset.track, "track_name");
        assert_eq!(config.dataset.image, "image_url");
    }
}
