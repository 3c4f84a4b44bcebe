//! Configuration Module
//!
//! Handles loading the Pokedex configuration from environment variables and
//! layering command-line overrides on top.

use std::env;
use std::time::Duration;

/// Default PokeAPI base URL
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST API
    pub api_url: String,
    /// Reaper wake period and entry max age, in seconds
    pub cache_interval: u64,
    /// HTTP request timeout in seconds
    pub http_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_API_URL` - API base URL (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_CACHE_INTERVAL` - Cache interval in seconds (default: 5)
    /// - `POKEDEX_HTTP_TIMEOUT` - HTTP timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var("POKEDEX_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_url),
            cache_interval: env::var("POKEDEX_CACHE_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_interval),
            http_timeout: env::var("POKEDEX_HTTP_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout),
        }
    }

    /// Applies values given on the command line over the loaded ones.
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        cache_interval: Option<u64>,
        http_timeout: Option<u64>,
    ) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(secs) = cache_interval {
            self.cache_interval = secs;
        }
        if let Some(secs) = http_timeout {
            self.http_timeout = secs;
        }
        self
    }

    /// Cache interval as a Duration.
    pub fn cache_interval(&self) -> Duration {
        Duration::from_secs(self.cache_interval)
    }

    /// HTTP timeout as a Duration.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cache_interval: 5,
            http_timeout: 10,
        }
    }
}
