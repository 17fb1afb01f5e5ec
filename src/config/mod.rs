//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Stats provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name, used for rate-limit buckets and cache keys
    #[serde(default = "default_provider_name")]
    pub name: String,

    /// Base URL of the provider API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Platform slug for player lookups
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Env var holding the provider API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Allowed requests per minute
    #[serde(default = "default_rate_per_minute")]
    pub rate_per_minute: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Recent matches requested per player
    #[serde(default = "default_match_limit")]
    pub match_limit: usize,

    /// Queue filter for recent matches
    #[serde(default = "default_queue")]
    pub queue: String,
}

fn default_provider_name() -> String {
    "tracker".to_string()
}

fn default_base_url() -> String {
    "https://public-api.tracker.gg/v2/csgo".to_string()
}

fn default_platform() -> String {
    "steam".to_string()
}

fn default_api_key_env() -> String {
    "TRACKER_API_KEY".to_string()
}

fn default_rate_per_minute() -> u32 {
    30
}

fn default_timeout() -> u64 {
    10
}

fn default_match_limit() -> usize {
    20
}

fn default_queue() -> String {
    "competitive".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            base_url: default_base_url(),
            platform: default_platform(),
            api_key_env: default_api_key_env(),
            rate_per_minute: default_rate_per_minute(),
            timeout_seconds: default_timeout(),
            match_limit: default_match_limit(),
            queue: default_queue(),
        }
    }
}

/// Profile cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry time-to-live in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

fn default_cache_ttl() -> u64 {
    3600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            provider: ProviderConfig::default(),
            cache: CacheConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.rate_per_minute == 0 {
            return Err(ConfigError::ValidationError(
                "Provider rate limit must be greater than 0".to_string(),
            ));
        }

        if self.provider.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Provider timeout must be greater than 0".to_string(),
            ));
        }

        if self.provider.match_limit == 0 {
            return Err(ConfigError::ValidationError(
                "Match limit must be greater than 0".to_string(),
            ));
        }

        if self.cache.ttl_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Cache TTL must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
