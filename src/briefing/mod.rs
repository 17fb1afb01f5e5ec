//! Briefing orchestration.
//!
//! Coordinates the full pipeline:
//! 1. Resolve each player: cache → provider fetch → synthetic fallback
//! 2. Aggregate both rosters into team reports
//! 3. Detect threats and opportunities in the enemy roster
//! 4. Generate ranked recommendations and a confidence score
//!
//! Per-player fetch failures never abort a briefing; they degrade to
//! clearly-labeled synthetic profiles.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use thiserror::Error;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use crate::analysis;
use crate::config::AppConfig;
use crate::fetch::{FetchError, ProfileSource, TrackerClient, TtlCache};
use crate::models::{BriefingFailure, BriefingId, PlayerProfile, PreMatchBriefing};
use crate::normalize;

/// Errors surfaced by briefing orchestration.
#[derive(Debug, Error)]
pub enum BriefingError {
    #[error("no players supplied for either roster")]
    EmptyRosters,
}

impl BriefingError {
    /// The caller-facing error object, carrying a fallback strategy.
    pub fn into_failure(self) -> BriefingFailure {
        BriefingFailure::new(self.to_string())
    }
}

/// Process-lifetime usage counters, shared across concurrent briefings.
#[derive(Debug, Default)]
pub struct UsageStats {
    pub api_calls: AtomicU64,
    pub cache_hits: AtomicU64,
    pub cache_misses: AtomicU64,
    pub errors: AtomicU64,
    pub synthetic_served: AtomicU64,
}

/// Point-in-time view of [`UsageStats`].
#[derive(Debug, Clone, Serialize)]
pub struct UsageSnapshot {
    pub api_calls: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub errors: u64,
    pub synthetic_served: u64,
    pub cache_hit_rate: f64,
}

impl UsageStats {
    pub fn snapshot(&self) -> UsageSnapshot {
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        let cache_misses = self.cache_misses.load(Ordering::Relaxed);
        let lookups = cache_hits + cache_misses;

        UsageSnapshot {
            api_calls: self.api_calls.load(Ordering::Relaxed),
            cache_hits,
            cache_misses,
            errors: self.errors.load(Ordering::Relaxed),
            synthetic_served: self.synthetic_served.load(Ordering::Relaxed),
            cache_hit_rate: if lookups == 0 {
                0.0
            } else {
                cache_hits as f64 / lookups as f64
            },
        }
    }
}

/// Composes fetch, normalization, and analysis into briefings.
///
/// Owns the profile cache and usage counters; the provider source is
/// injected so tests can substitute a deterministic stub.
pub struct BriefingOrchestrator {
    source: Arc<dyn ProfileSource>,
    cache: TtlCache<PlayerProfile>,
    usage: Arc<UsageStats>,
}

impl BriefingOrchestrator {
    pub fn new(source: Arc<dyn ProfileSource>, cache_ttl: Duration) -> Self {
        Self {
            source,
            cache: TtlCache::new(cache_ttl),
            usage: Arc::new(UsageStats::default()),
        }
    }

    /// Build an orchestrator backed by the configured Tracker client.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let client = TrackerClient::new(&config.provider)?;
        Ok(Self::new(
            Arc::new(client),
            Duration::from_secs(config.cache.ttl_seconds),
        ))
    }

    pub fn usage(&self) -> Arc<UsageStats> {
        Arc::clone(&self.usage)
    }

    fn cache_key(&self, player_id: &str) -> String {
        format!("profile:{}:{}", self.source.provider_name(), player_id)
    }

    /// Resolve one player: cache first, then provider fetch, then a
    /// synthetic placeholder on any failure.
    pub async fn player_profile(&self, player_id: &str) -> PlayerProfile {
        let key = self.cache_key(player_id);
        if let Some(profile) = self.cache.get(&key) {
            self.usage.cache_hits.fetch_add(1, Ordering::Relaxed);
            debug!(player_id, "profile cache hit");
            return profile;
        }
        self.usage.cache_misses.fetch_add(1, Ordering::Relaxed);

        match self.fetch_and_normalize(player_id).await {
            Ok(profile) => {
                self.cache.set(&key, profile.clone());
                profile
            }
            Err(e) => {
                self.usage.errors.fetch_add(1, Ordering::Relaxed);
                self.usage.synthetic_served.fetch_add(1, Ordering::Relaxed);
                warn!(player_id, error = %e, "fetch failed, substituting synthetic profile");
                normalize::synthetic_profile(player_id)
            }
        }
    }

    async fn fetch_and_normalize(&self, player_id: &str) -> Result<PlayerProfile, FetchError> {
        let raw_profile = self.source.fetch_profile(player_id).await?;
        self.usage.api_calls.fetch_add(1, Ordering::Relaxed);

        // Recent matches are best-effort: a profile without them is still
        // usable for analysis.
        let raw_matches = match self.source.fetch_recent_matches(player_id).await {
            Ok(matches) => {
                self.usage.api_calls.fetch_add(1, Ordering::Relaxed);
                matches
            }
            Err(e) => {
                self.usage.errors.fetch_add(1, Ordering::Relaxed);
                warn!(player_id, error = %e, "recent matches unavailable");
                Vec::new()
            }
        };

        Ok(normalize::normalize(&raw_profile, &raw_matches))
    }

    async fn roster_profiles(&self, ids: &[String]) -> Vec<PlayerProfile> {
        join_all(ids.iter().map(|id| self.player_profile(id))).await
    }

    /// Build a complete pre-match briefing for the given rosters and map.
    ///
    /// Both rosters are resolved concurrently; the per-provider rate
    /// limiter inside the client serializes actual provider requests.
    pub async fn build_briefing(
        &self,
        own_ids: &[String],
        enemy_ids: &[String],
        map: &str,
    ) -> Result<PreMatchBriefing, BriefingError> {
        if own_ids.is_empty() && enemy_ids.is_empty() {
            return Err(BriefingError::EmptyRosters);
        }

        info!(
            own = own_ids.len(),
            enemy = enemy_ids.len(),
            map,
            "building pre-match briefing"
        );

        let (own_profiles, enemy_profiles) = tokio::join!(
            self.roster_profiles(own_ids),
            self.roster_profiles(enemy_ids)
        );

        let team = analysis::team_report(&own_profiles);
        let enemy = analysis::team_report(&enemy_profiles);
        let threats = analysis::detect_threats(&enemy_profiles);
        let opportunities = analysis::detect_opportunities(&enemy_profiles);
        let recommendations = analysis::generate_recommendations(&team, &enemy, map);
        let confidence = analysis::confidence_score(&enemy_profiles);

        let synthetic_profiles = own_profiles
            .iter()
            .chain(enemy_profiles.iter())
            .filter(|p| p.provenance.is_synthetic())
            .count() as u32;

        let briefing = PreMatchBriefing {
            id: BriefingId::generate(own_ids, enemy_ids, map),
            generated_at: Utc::now(),
            map: map.to_string(),
            team,
            enemy,
            threats,
            opportunities,
            recommendations,
            confidence,
            synthetic_profiles,
        };

        info!(
            briefing_id = %briefing.id,
            confidence = briefing.confidence,
            threats = briefing.threats.len(),
            recommendations = briefing.recommendations.len(),
            synthetic = briefing.synthetic_profiles,
            "briefing ready"
        );

        Ok(briefing)
    }
}
