//! Provider HTTP client, TTL cache, and rate limiting.
//!
//! Fetches raw profile and recent-match payloads from the stats provider.
//! Owns no business logic; normalization happens in [`crate::normalize`].

pub mod cache;
pub mod rate_limit;
mod raw;

pub use cache::TtlCache;
pub use rate_limit::RateLimiter;
pub use raw::{
    Envelope, RawMatch, RawMatchAttributes, RawMatchMetadata, RawPlatformInfo, RawProfile,
    RawSegment, RawStat, RawStatMetadata,
};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::config::ProviderConfig;

/// Header carrying the provider-issued API key.
const API_KEY_HEADER: &str = "TRN-Api-Key";

/// Errors raised while talking to the stats provider.
///
/// Request-level variants carry the provider name and player id so the
/// caller can decide fallback behavior per player.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{provider}: request for {player_id} failed: {source}")]
    Http {
        provider: String,
        player_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: HTTP {status} for {player_id}")]
    Status {
        provider: String,
        player_id: String,
        status: u16,
    },

    #[error("{provider}: malformed payload for {player_id}: {source}")]
    Payload {
        provider: String,
        player_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid provider URL: {0}")]
    InvalidUrl(String),

    #[error("missing API key (set {0})")]
    MissingApiKey(String),

    #[error("API key from {0} is not a valid header value")]
    InvalidApiKey(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Abstraction over the remote stats provider, so tests and offline runs
/// can substitute a deterministic source.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Provider name used for rate-limit buckets and cache keys.
    fn provider_name(&self) -> &str;

    /// Fetch the raw career profile for one player.
    async fn fetch_profile(&self, player_id: &str) -> Result<RawProfile, FetchError>;

    /// Fetch the player's recent competitive matches.
    async fn fetch_recent_matches(&self, player_id: &str) -> Result<Vec<RawMatch>, FetchError>;
}

/// HTTP client for the Tracker Network standard API.
///
/// Applies the per-provider rate limiter before every request and bounds
/// each request with the configured timeout.
pub struct TrackerClient {
    client: Client,
    name: String,
    base_url: String,
    platform: String,
    match_limit: usize,
    queue: String,
    limiter: RateLimiter,
}

impl TrackerClient {
    /// Create a client, reading the API key from the env var named in the
    /// provider config.
    pub fn new(config: &ProviderConfig) -> Result<Self, FetchError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| FetchError::MissingApiKey(config.api_key_env.clone()))?;
        Self::with_api_key(config, &api_key)
    }

    /// Create a client with an explicit API key.
    pub fn with_api_key(config: &ProviderConfig, api_key: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let key_value = HeaderValue::from_str(api_key)
            .map_err(|_| FetchError::InvalidApiKey(config.api_key_env.clone()))?;
        headers.insert(API_KEY_HEADER, key_value);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            name: config.name.clone(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            platform: config.platform.clone(),
            match_limit: config.match_limit,
            queue: config.queue.clone(),
            limiter: RateLimiter::new(config.rate_per_minute),
        })
    }

    fn profile_url(&self, player_id: &str) -> Result<Url, FetchError> {
        let raw = format!(
            "{}/standard/profile/{}/{}",
            self.base_url, self.platform, player_id
        );
        Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }

    fn matches_url(&self, player_id: &str) -> Result<Url, FetchError> {
        let raw = format!(
            "{}/standard/profile/{}/{}/segments/match",
            self.base_url, self.platform, player_id
        );
        let mut url = Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("limit", &self.match_limit.to_string())
            .append_pair("queue", &self.queue);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        player_id: &str,
    ) -> Result<T, FetchError> {
        self.limiter.acquire(&self.name).await;
        debug!(%url, "fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http {
                provider: self.name.clone(),
                player_id: player_id.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                provider: self.name.clone(),
                player_id: player_id.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Http {
            provider: self.name.clone(),
            player_id: player_id.to_string(),
            source: e,
        })?;

        serde_json::from_str(&body).map_err(|e| FetchError::Payload {
            provider: self.name.clone(),
            player_id: player_id.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl ProfileSource for TrackerClient {
    fn provider_name(&self) -> &str {
        &self.name
    }

    async fn fetch_profile(&self, player_id: &str) -> Result<RawProfile, FetchError> {
        let url = self.profile_url(player_id)?;
        let envelope: Envelope<RawProfile> = self.get_json(url, player_id).await?;
        info!(player_id, "profile fetched");
        Ok(envelope.data)
    }

    async fn fetch_recent_matches(&self, player_id: &str) -> Result<Vec<RawMatch>, FetchError> {
        let url = self.matches_url(player_id)?;
        let envelope: Envelope<Vec<RawMatch>> = self.get_json(url, player_id).await?;
        info!(player_id, matches = envelope.data.len(), "recent matches fetched");
        Ok(envelope.data)
    }
}
