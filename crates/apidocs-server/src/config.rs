//! Server configuration
//!
//! Read once at startup from Shuttle secrets (or any key lookup).

use anyhow::{Context, Result};
use std::time::Duration;

use apidocs::{ExportConfig, PlatformConfig};

pub const API_ID_KEY: &str = "APIDOCS_API_ID";
pub const STAGE_KEY: &str = "APIDOCS_STAGE";
pub const PLATFORM_URL_KEY: &str = "APIDOCS_PLATFORM_URL";
pub const PLATFORM_TOKEN_KEY: &str = "APIDOCS_PLATFORM_TOKEN";
pub const PLATFORM_TIMEOUT_KEY: &str = "APIDOCS_PLATFORM_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub export: ExportConfig,
    pub platform: PlatformConfig,
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .with_context(|| format!("Missing required secret {key}"))
}

impl ServerConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let export = ExportConfig::new(required(&lookup, API_ID_KEY)?, required(&lookup, STAGE_KEY)?);

        let mut platform = PlatformConfig::new(required(&lookup, PLATFORM_URL_KEY)?);
        if let Some(token) = lookup(PLATFORM_TOKEN_KEY).filter(|t| !t.is_empty()) {
            platform = platform.with_token(token);
        }
        if let Some(raw) = lookup(PLATFORM_TIMEOUT_KEY) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{PLATFORM_TIMEOUT_KEY} must be a number of seconds"))?;
            platform = platform.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self { export, platform })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_reads_all_keys() {
        let config = ServerConfig::from_lookup(lookup(&[
            (API_ID_KEY, "abc123"),
            (STAGE_KEY, "prod"),
            (PLATFORM_URL_KEY, "https://platform.example"),
            (PLATFORM_TOKEN_KEY, "secret"),
            (PLATFORM_TIMEOUT_KEY, "5"),
        ]))
        .unwrap();

        assert_eq!(config.export, ExportConfig::new("abc123", "prod"));
        assert_eq!(config.platform.base_url, "https://platform.example");
        assert_eq!(config.platform.token.as_deref(), Some("secret"));
        assert_eq!(config.platform.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_stage_fails() {
        let err = ServerConfig::from_lookup(lookup(&[
            (API_ID_KEY, "abc123"),
            (STAGE_KEY, " "),
            (PLATFORM_URL_KEY, "https://platform.example"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains(STAGE_KEY));
    }

    #[test]
    fn test_invalid_timeout_fails() {
        let result = ServerConfig::from_lookup(lookup(&[
            (API_ID_KEY, "abc123"),
            (STAGE_KEY, "prod"),
            (PLATFORM_URL_KEY, "https://platform.example"),
            (PLATFORM_TIMEOUT_KEY, "soon"),
        ]));

        assert!(result.is_err());
    }
}
