//! Configuration file support for HealthSense.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/healthsense/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub cli: CliConfig,
}

/// Table size limits enforced at the engine boundary
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_hospitals")]
    pub max_hospitals: usize,

    #[serde(default = "default_max_regions")]
    pub max_regions: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_hospitals: default_max_hospitals(),
            max_regions: default_max_regions(),
        }
    }
}

/// Front-end behaviour
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: default_seed_sample_data(),
        }
    }
}

// Default value functions
fn default_max_hospitals() -> usize {
    100
}

fn default_max_regions() -> usize {
    100
}

fn default_seed_sample_data() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject limits that would make the engine unusable
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_hospitals == 0 {
            return Err(Error::Config("limits.max_hospitals must be at least 1".into()));
        }
        if self.limits.max_regions == 0 {
            return Err(Error::Config("limits.max_regions must be at least 1".into()));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        base.join("healthsense").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.limits.max_hospitals, 100);
        assert_eq!(config.limits.max_regions, 100);
        assert!(config.cli.seed_sample_data);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[limits]
max_regions = 4
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.limits.max_regions, 4);
        assert_eq!(config.limits.max_hospitals, 100); // default
        assert!(config.cli.seed_sample_data);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let mut config = Config::default();
        config.limits.max_hospitals = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_save_and_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.limits.max_hospitals = 7;
        config.cli.seed_sample_data = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.limits.max_hospitals, 7);
        assert!(!loaded.cli.seed_sample_data);
    }

    #[test]
    fn test_load_from_rejects_invalid_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[limits]\nmax_regions = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
