//! Configuration loaded from `config.toml` and the environment.

use crate::error::{Result, SearchError};
use crate::query::ValidationOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_NEYNAR_API_URL: &str = "https://api.neynar.com";
/// Stays under the 20s budget of the search route.
pub const DEFAULT_TIMEOUT_SECS: u64 = 19;
pub const DEFAULT_LIMIT: u32 = 10;

const ENV_BASE_URL: &str = "CASTQUERY_BASE_URL";
const ENV_API_KEY: &str = "NEYNAR_API_KEY";
const ENV_TIMEOUT: &str = "CASTQUERY_TIMEOUT_SECS";

/// castquery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host serving the `/api/search` route.
    pub base_url: String,
    /// Neynar API root, used for profile lookups and bulk cast fetches.
    pub neynar_api_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub default_limit: u32,
    /// Reject dates that are well-formed but not real days.
    pub calendar_dates: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            neynar_api_url: DEFAULT_NEYNAR_API_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_limit: DEFAULT_LIMIT,
            calendar_dates: false,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/castquery/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("castquery").join("config.toml"))
    }

    /// Load from the default location, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from an explicit file, then apply environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SearchError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(key) = get(ENV_API_KEY).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(secs) = get(ENV_TIMEOUT) {
            self.timeout_secs = secs.parse().map_err(|_| {
                SearchError::ConfigError(format!("{} must be a number, got '{}'", ENV_TIMEOUT, secs))
            })?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            calendar_dates: self.calendar_dates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout(), Duration::from_secs(19));
        assert!(!config.validation_options().calendar_dates);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = \"https://herocast.xyz\"\ncalendar_dates = true\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.base_url, "https://herocast.xyz");
        assert_eq!(config.neynar_api_url, DEFAULT_NEYNAR_API_URL);
        assert_eq!(config.default_limit, DEFAULT_LIMIT);
        assert!(config.calendar_dates);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, SearchError::ConfigError(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://127.0.0.1:8080"),
            (ENV_API_KEY, "secret"),
            (ENV_TIMEOUT, "5"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_bad_timeout_env() {
        let mut config = Config::default();
        let err = config
            .apply_env(|key| (key == ENV_TIMEOUT).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT));
    }
}
