//! Configuration module for the gallery placer

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub manifest: ManifestSettings,
    #[serde(default)]
    pub fetch: FetchSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Where to find the gallery manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestSettings {
    pub path: PathBuf,
}

/// HTTP download behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Maximum concurrent downloads (clamped to 1..=50)
    pub concurrency: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        FetchSettings {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            concurrency: 8,
        }
    }
}

/// Where the placement document goes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSettings {
    /// Output file path; stdout when unset
    pub path: Option<PathBuf>,
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (prefixed with GALLERY_)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let builder = Config::builder()
            // Start with default configuration
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add local overrides (gitignored)
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // Add environment variables (GALLERY_FETCH__CONCURRENCY, etc.)
            .add_source(
                Environment::with_prefix("GALLERY")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            manifest: ManifestSettings {
                path: PathBuf::from("gallery.json"),
            },
            fetch: FetchSettings::default(),
            output: OutputSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.fetch.timeout_secs, 30);
        assert_eq!(settings.fetch.concurrency, 8);
        assert!(settings.output.path.is_none());
    }
}
