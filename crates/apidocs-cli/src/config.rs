//! Configuration management for the apidocs CLI
//!
//! Stores the platform endpoint and the documented API target in
//! ~/.config/apidocs/config.toml. `APIDOCS_*` environment variables
//! (including those from a `.env` file) override the file.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use apidocs::PlatformConfig;

const CONFIG_DIR: &str = "apidocs";
const CONFIG_FILE: &str = "config.toml";

/// Keys accepted by `config set`, with their environment variable names
pub const KEYS: [(&str, &str); 5] = [
    ("platform_url", "APIDOCS_PLATFORM_URL"),
    ("token", "APIDOCS_PLATFORM_TOKEN"),
    ("api_id", "APIDOCS_API_ID"),
    ("stage", "APIDOCS_STAGE"),
    ("timeout_secs", "APIDOCS_PLATFORM_TIMEOUT_SECS"),
];

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
    #[serde(default = "default_stage")]
    pub stage: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_stage() -> String {
    "prod".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform_url: None,
            token: None,
            api_id: None,
            stage: default_stage(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Set a value by key name
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "platform_url" => self.platform_url = Some(value),
            "token" => self.token = Some(value),
            "api_id" => self.api_id = Some(value),
            "stage" => self.stage = value,
            "timeout_secs" => {
                self.timeout_secs = value
                    .trim()
                    .parse()
                    .with_context(|| format!("timeout_secs must be a number: {}", value))?;
            }
            _ => bail!(
                "Unknown config key '{}'. Known keys: {}",
                key,
                KEYS.map(|(k, _)| k).join(", ")
            ),
        }
        Ok(())
    }

    /// Apply overrides from environment-style lookups
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (key, var) in KEYS {
            if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
                self.set(key, value)
                    .with_context(|| format!("Invalid value in {}", var))?;
            }
        }
        Ok(self)
    }

    pub fn require_api_id(&self) -> Result<&str> {
        self.api_id
            .as_deref()
            .context("API id not set. Run 'apidocs config set api_id <ID>' or set APIDOCS_API_ID.")
    }

    /// Settings for the HTTP platform client
    pub fn platform_config(&self) -> Result<PlatformConfig> {
        let url = self.platform_url.as_deref().context(
            "Platform URL not set. Run 'apidocs config set platform_url <URL>' or set APIDOCS_PLATFORM_URL.",
        )?;

        let mut platform =
            PlatformConfig::new(url).with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(token) = &self.token {
            platform = platform.with_token(token.clone());
        }
        Ok(platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fills_defaults() {
        let config = Config::parse(
            r#"
            platform_url = "https://platform.example"
            api_id = "abc123"
            "#,
        )
        .unwrap();

        assert_eq!(config.stage, "prod");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.require_api_id().unwrap(), "abc123");
    }

    #[test]
    fn test_env_overrides_file() {
        let config = Config::parse(r#"api_id = "from-file""#)
            .unwrap()
            .with_overrides(|var| match var {
                "APIDOCS_API_ID" => Some("from-env".to_string()),
                "APIDOCS_PLATFORM_TIMEOUT_SECS" => Some("5".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.api_id.as_deref(), Some("from-env"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let mut config = Config::default();
        assert!(config.set("region", "eu-west-1".to_string()).is_err());
        assert!(config.set("timeout_secs", "soon".to_string()).is_err());
    }

    #[test]
    fn test_platform_config_requires_url() {
        let mut config = Config::default();
        assert!(config.platform_config().is_err());

        config.set("platform_url", "https://platform.example".to_string()).unwrap();
        config.set("token", "secret".to_string()).unwrap();
        let platform = config.platform_config().unwrap();
        assert_eq!(platform.token.as_deref(), Some("secret"));
        assert_eq!(platform.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = Config::default();
        config.set("api_id", "abc123".to_string()).unwrap();
        let content = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::parse(&content).unwrap(), config);
    }
}
