use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::units::TemperatureUnit;

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Unit used when rendering temperatures. Stored data stays Celsius.
    #[serde(default)]
    pub unit: TemperatureUnit,

    /// Override for the geocoding endpoint; None means the public API.
    pub geocoding_url: Option<String>,

    /// Override for the forecast endpoint; None means the public API.
    pub forecast_url: Option<String>,

    /// Path to the search-history database. None disables history.
    pub history_db: Option<PathBuf>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Default location for the history database, for callers that want
    /// history but have no opinion about where it lives.
    pub fn default_history_db_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().join("weather.db"))
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "weather-lookup", "weather-lookup")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }
}
