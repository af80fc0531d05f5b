use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::UnitGroup;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_units = "metric"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Visual Crossing API key.
    pub api_key: Option<String>,

    /// Optional default unit group, "metric" or "us".
    pub default_units: Option<String>,
}

impl Config {
    /// Return the configured default unit group, falling back to metric.
    pub fn default_unit_group(&self) -> Result<UnitGroup> {
        match self.default_units.as_deref() {
            Some(s) => UnitGroup::try_from(s),
            None => Ok(UnitGroup::default()),
        }
    }

    pub fn set_default_units(&mut self, units: UnitGroup) {
        self.default_units = Some(units.as_str().to_string());
    }

    /// Returns the API key, or an actionable error when none is configured.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `skydash configure` and enter your Visual Crossing API key."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

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
        let dirs = ProjectDirs::from("dev", "skydash", "skydash")
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

        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `skydash configure`"));
    }

    #[test]
    fn set_api_key_configures() {
        let mut cfg = Config::default();
        assert!(!cfg.is_configured());

        cfg.set_api_key("KEY".into());
        assert!(cfg.is_configured());
        assert_eq!(cfg.require_api_key().unwrap(), "KEY");
    }

    #[test]
    fn default_units_fall_back_to_metric() {
        let cfg = Config::default();
        assert_eq!(cfg.default_unit_group().unwrap(), UnitGroup::Metric);
    }

    #[test]
    fn set_default_units_overrides_fallback() {
        let mut cfg = Config::default();
        cfg.set_default_units(UnitGroup::Us);
        assert_eq!(cfg.default_unit_group().unwrap(), UnitGroup::Us);
    }

    #[test]
    fn bad_default_units_error() {
        let cfg = Config { api_key: None, default_units: Some("kelvin".into()) };
        assert!(cfg.default_unit_group().is_err());
    }
}
