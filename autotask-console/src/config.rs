use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SERVICE_URL_ENV: &str = "AUTOTASK_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Entry URL of the REST API; the zone serving the user is resolved from it.
    #[serde(default = "default_service_url")]
    pub service_url: String,
    /// Tracking identifier of the API integration, sent with every request.
    #[serde(default)]
    pub integration_code: Option<String>,
    /// Account whose projects are offered, matched by name.
    #[serde(default = "default_account_name")]
    pub account_name: String,
    /// Only projects whose name contains this label are listed.
    #[serde(default = "default_project_label")]
    pub project_label: String,
    /// Where remembered credentials are stored. Defaults to `prefs.json`
    /// next to this config file.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_service_url() -> String {
    "https://webservices3.autotask.net/atservicesrest".to_string()
}

fn default_account_name() -> String {
    "SRS".to_string()
}

fn default_project_label() -> String {
    "[Dev-Eng]".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            integration_code: None,
            account_name: default_account_name(),
            project_label: default_project_label(),
            credentials_path: None,
            log_level: default_log_level(),
        }
    }
}

pub fn root_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("autotask-console"))
}

impl ConsoleConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(root_path()?.join("config.toml"))
    }

    /// Load config from disk, then apply environment overrides. Returns the
    /// default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        if let Ok(url) = std::env::var(SERVICE_URL_ENV) {
            config.service_url = url;
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    pub fn credentials_path(&self) -> Result<PathBuf> {
        match &self.credentials_path {
            Some(path) => Ok(path.clone()),
            None => crate::credential_store::default_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConsoleConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.account_name, "SRS");
        assert_eq!(config.project_label, "[Dev-Eng]");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "service_url = \"http://localhost:8080\"\ncredentials_path = \"/tmp/prefs.json\"\n",
        )
        .unwrap();

        let config = ConsoleConfig::load_from(&path).unwrap();

        assert_eq!(config.service_url, "http://localhost:8080");
        assert_eq!(
            config.credentials_path().unwrap(),
            PathBuf::from("/tmp/prefs.json")
        );
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "service_url = [").unwrap();
        assert!(ConsoleConfig::load_from(&path).is_err());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = ConsoleConfig {
            integration_code: Some("ABC123".to_string()),
            ..Default::default()
        };

        config.save_to(&path).unwrap();

        assert_eq!(ConsoleConfig::load_from(&path).unwrap(), config);
    }
}
