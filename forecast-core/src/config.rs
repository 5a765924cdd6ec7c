use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{ForecastError, model::Units};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

pub const ENV_API_KEY: &str = "OPENWEATHER_APIKEY";
pub const ENV_BASE_URL: &str = "OPENWEATHER_URL";
pub const ENV_UNITS: &str = "OPENWEATHER_UNITS";
pub const ENV_USE_FIXTURE: &str = "WEATHER_USE_FIXTURE";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Settings for the weather command, built once at startup and passed down.
///
/// Example TOML:
/// ```toml
/// base_url = "https://api.openweathermap.org"
/// api_key = "..."
/// units = "metric"
/// use_fixture = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default)]
    pub units: Units,

    /// Serve the bundled sample document instead of calling OpenWeather.
    #[serde(default)]
    pub use_fixture: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            units: Units::default(),
            use_fixture: false,
        }
    }
}

impl Config {
    /// API key, or a configuration error when none is set or it is blank.
    pub fn require_api_key(&self) -> Result<&str, ForecastError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ForecastError::MissingApiKey)
    }

    /// Load the saved config from the default location.
    ///
    /// Environment overrides are not applied; use [`Config::with_overrides`]
    /// for the settings of a single run so they never end up on disk.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Copy of this config with `lookup` applied on top, leaving `self` untouched.
    pub fn with_overrides<F>(&self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = self.clone();
        cfg.apply_overrides(lookup);
        cfg
    }

    /// Load config from `path`, or return defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherforecast", "weatherforecast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override fields from environment-style variables looked up through `lookup`.
    ///
    /// Unparseable `OPENWEATHER_UNITS` values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }

        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(units) = lookup(ENV_UNITS) {
            match units.parse() {
                Ok(units) => self.units = units,
                Err(e) => tracing::warn!("Ignoring {}: {}", ENV_UNITS, e),
            }
        }

        if let Some(flag) = lookup(ENV_USE_FIXTURE) {
            self.use_fixture = matches!(flag.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }
}
