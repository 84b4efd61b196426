use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{
    icon::DayWindow, location::DEFAULT_FALLBACK_CITY, provider::openweather::DEFAULT_BASE_URL,
    theme::ThemePreference, units::UnitPreference,
};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "imperial"
/// theme = "dark"
/// fallback_city = "London"
///
/// [day_window]
/// start = 6
/// end = 20
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,

    pub base_url: String,

    /// Unit system used at start-up.
    pub units: UnitPreference,

    /// Explicit theme; when absent the terminal's scheme is used.
    pub theme: Option<ThemePreference>,

    /// City shown when the device location is unavailable.
    pub fallback_city: String,

    pub day_window: DayWindow,

    /// Key picked up from the environment; never written back to disk.
    #[serde(skip)]
    env_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            units: UnitPreference::default(),
            theme: None,
            fallback_city: DEFAULT_FALLBACK_CITY.to_string(),
            day_window: DayWindow::default(),
            env_api_key: None,
        }
    }
}

impl Config {
    /// Load config from disk (or defaults on first run) and apply the
    /// environment API key override.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        cfg.set_env_api_key(std::env::var(API_KEY_ENV).ok());
        Ok(cfg)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(&path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Record a key from the environment. Blank values are ignored.
    pub fn set_env_api_key(&mut self, key: Option<String>) {
        self.env_api_key = key.filter(|k| !k.trim().is_empty());
    }

    /// The key to use: environment first, then the stored one.
    pub fn resolve_api_key(&self) -> Option<&str> {
        self.env_api_key
            .as_deref()
            .or(self.api_key.as_deref())
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.units, UnitPreference::Metric);
        assert_eq!(cfg.fallback_city, "London");
        assert_eq!(cfg.day_window, DayWindow { start: 6, end: 20 });
        assert!(cfg.theme.is_none());
        assert!(cfg.resolve_api_key().is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg = Config::from_toml(
            r#"
            api_key = "FILE_KEY"
            units = "imperial"
            theme = "dark"
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.units, UnitPreference::Imperial);
        assert_eq!(cfg.theme, Some(ThemePreference::Dark));
        assert_eq!(cfg.fallback_city, "London");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.resolve_api_key(), Some("FILE_KEY"));
    }

    #[test]
    fn env_key_takes_precedence_and_is_not_saved() {
        let mut cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        };
        cfg.set_env_api_key(Some("ENV_KEY".into()));
        assert_eq!(cfg.resolve_api_key(), Some("ENV_KEY"));

        let toml = cfg.to_toml().unwrap();
        assert!(toml.contains("FILE_KEY"));
        assert!(!toml.contains("ENV_KEY"));
    }

    #[test]
    fn blank_env_key_is_ignored() {
        let mut cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        };
        cfg.set_env_api_key(Some("   ".into()));
        assert_eq!(cfg.resolve_api_key(), Some("FILE_KEY"));
    }

    #[test]
    fn toml_roundtrip_keeps_day_window() {
        let cfg = Config {
            day_window: DayWindow { start: 6, end: 18 },
            fallback_city: "Lisbon".into(),
            ..Config::default()
        };
        let parsed = Config::from_toml(&cfg.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.day_window, DayWindow { start: 6, end: 18 });
        assert_eq!(parsed.fallback_city, "Lisbon");
    }

    #[test]
    fn invalid_units_rejected() {
        assert!(Config::from_toml(r#"units = "kelvin""#).is_err());
    }
}
