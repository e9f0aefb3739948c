use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
///
/// Every field has a default, so a missing file or a partially filled one
/// still yields a usable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key; empty until `skycast configure` has run.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the weather REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout applied to every outbound request, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// City loaded when the dashboard starts.
    #[serde(default = "default_city")]
    pub default_city: String,

    /// IP geolocation endpoint. An empty string disables "use my location".
    #[serde(default = "default_geo_url")]
    pub geo_url: String,

    /// Dark terminal theme, persisted on every toggle.
    #[serde(default)]
    pub dark_mode: bool,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

fn default_city() -> String {
    "Kigali".to_string()
}

fn default_geo_url() -> String {
    "https://ipinfo.io/json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            default_city: default_city(),
            geo_url: default_geo_url(),
            dark_mode: false,
        }
    }
}

impl Config {
    /// Return the API key, or an actionable error when none is configured.
    pub fn require_api_key(&self) -> Result<&str> {
        if self.api_key.trim().is_empty() {
            bail!(
                "No API key configured.\n\
                 Hint: run `skycast configure` and paste your OpenWeather API key."
            );
        }

        Ok(self.api_key.as_str())
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
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
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.require_api_key().unwrap_err();

        assert!(err.to_string().contains("skycast configure"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = Config { api_key: "   ".to_string(), ..Config::default() };

        assert!(cfg.require_api_key().is_err());
    }

    #[test]
    fn defaults_point_at_openweather() {
        let cfg = Config::default();

        assert_eq!(cfg.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(cfg.timeout_ms, 10_000);
        assert_eq!(cfg.default_city, "Kigali");
        assert_eq!(cfg.geo_url, "https://ipinfo.io/json");
        assert!(!cfg.dark_mode);
    }

    #[test]
    fn partial_file_falls_back_to_defaults_per_field() {
        let cfg: Config = toml::from_str(r#"api_key = "SECRET""#).expect("minimal config parses");

        assert_eq!(cfg.api_key, "SECRET");
        assert_eq!(cfg.default_city, "Kigali");
        assert_eq!(cfg.timeout_ms, 10_000);
        assert!(!cfg.dark_mode);
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = Config {
            api_key: "SECRET".to_string(),
            default_city: "London".to_string(),
            dark_mode: true,
            ..Config::default()
        };

        let text = toml::to_string_pretty(&cfg).expect("config serializes");
        let parsed: Config = toml::from_str(&text).expect("config parses back");

        assert_eq!(parsed, cfg);
    }
}
