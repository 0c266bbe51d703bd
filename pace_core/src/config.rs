//! Configuration file support for Stride.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/stride/config.toml`.
//! The pace section carries the formula constants, so the retired
//! generation's values can be restored without code changes.

use crate::pace::{PaceSettings, DEFAULT_MARATHON_MILES, DEFAULT_SHORT_RACE_FACTOR};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub pace: PaceConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Formula constants for the pace engine
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaceConfig {
    #[serde(default = "default_marathon_miles")]
    pub marathon_distance_miles: f64,

    #[serde(default = "default_short_race_factor")]
    pub short_race_factor: f64,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            marathon_distance_miles: default_marathon_miles(),
            short_race_factor: default_short_race_factor(),
        }
    }
}

impl PaceConfig {
    /// Engine settings derived from this config section
    pub fn settings(&self) -> PaceSettings {
        PaceSettings {
            marathon_miles: self.marathon_distance_miles,
            short_race_factor: self.short_race_factor,
        }
    }
}

/// Calendar export configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            calendar_name: default_calendar_name(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("stride")
}

fn default_marathon_miles() -> f64 {
    DEFAULT_MARATHON_MILES
}

fn default_short_race_factor() -> f64 {
    DEFAULT_SHORT_RACE_FACTOR
}

fn default_calendar_name() -> String {
    "Training Plan".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;

        if config.pace.short_race_factor <= 0.0 {
            return Err(Error::Config(
                "short_race_factor must be positive".to_string(),
            ));
        }
        if config.pace.marathon_distance_miles <= 0.0 {
            return Err(Error::Config(
                "marathon_distance_miles must be positive".to_string(),
            ));
        }

        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("stride").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
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
