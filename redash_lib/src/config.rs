//! Connection settings: base URL, API key, and request timeout.

use crate::error::Error;
use std::time::Duration;
use url::Url;

pub const ENV_URL: &str = "REDASH_URL";
pub const ENV_API_KEY: &str = "REDASH_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "REDASH_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Where and how to reach a Redash instance.
#[derive(Clone)]
pub struct Config {
    pub base_url: Url,
    pub api_key: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Validate and build a config. The base URL must be http(s) and the key non-empty.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, Error> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| Error::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base URL must use http or https, got '{}'",
                base_url.scheme()
            )));
        }
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(Error::Config("API key must not be empty".to_string()));
        }
        Ok(Self {
            base_url,
            api_key,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `REDASH_URL`, `REDASH_API_KEY` and optional `REDASH_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let url = get(ENV_URL).ok_or_else(|| Error::Config(format!("{} is not set", ENV_URL)))?;
        let key =
            get(ENV_API_KEY).ok_or_else(|| Error::Config(format!("{} is not set", ENV_API_KEY)))?;
        let mut config = Self::new(&url, key)?;
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Config(format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Absolute URL for an API path such as `/api/queries/7`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
