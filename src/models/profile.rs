//! Normalized per-player profile models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a profile's data came from.
///
/// Synthetic profiles are substituted when every fetch path for a player
/// failed; downstream analysis treats both variants uniformly, but callers
/// can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Fetched from the stats provider and normalized.
    #[default]
    Provider,
    /// Placeholder data substituted after a fetch failure.
    Synthetic,
}

impl Provenance {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Provenance::Synthetic)
    }
}

/// Inferred player role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Awper,
    EntryFragger,
    Playmaker,
    Support,
    #[default]
    Rifler,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Awper => write!(f, "awper"),
            Role::EntryFragger => write!(f, "entry_fragger"),
            Role::Playmaker => write!(f, "playmaker"),
            Role::Support => write!(f, "support"),
            Role::Rifler => write!(f, "rifler"),
        }
    }
}

/// Inferred play style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayStyle {
    Aggressive,
    Balanced,
    Supportive,
    #[default]
    Passive,
}

impl std::fmt::Display for PlayStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayStyle::Aggressive => write!(f, "aggressive"),
            PlayStyle::Balanced => write!(f, "balanced"),
            PlayStyle::Supportive => write!(f, "supportive"),
            PlayStyle::Passive => write!(f, "passive"),
        }
    }
}

/// Threshold-tagged statistical strengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    HighHeadshotRate,
    GoodFragger,
    WinnerMentality,
    GoodAim,
    MvpPlayer,
}

/// Threshold-tagged statistical weaknesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weakness {
    LowKd,
    LowHeadshotRate,
    LowWinRate,
    PoorAim,
}

/// Career statistics. Every field defaults to zero when the provider
/// omits it; defaults are resolved once, at the normalization boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub time_played: f64,
    pub score: f64,
    pub kills: f64,
    pub deaths: f64,
    pub kd: f64,
    pub damage: f64,
    /// Average damage per round.
    pub adr: f64,
    pub headshots: f64,
    pub headshot_pct: f64,
    pub shots_fired: f64,
    pub shots_hit: f64,
    pub accuracy: f64,
    pub wins: f64,
    pub losses: f64,
    pub win_rate: f64,
    pub mvp_count: f64,
    pub matches_played: f64,
    pub rounds_played: f64,
    pub rounds_won: f64,
}

/// Rank and rating summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub rating: f64,
    pub rank_name: String,
    pub rank_icon_url: String,
    pub percentile: f64,
}

impl Default for RatingSummary {
    fn default() -> Self {
        Self {
            rating: 0.0,
            rank_name: "Unranked".to_string(),
            rank_icon_url: String::new(),
            percentile: 0.0,
        }
    }
}

/// Labels derived from [`PlayerStats`]. A pure function of the stats:
/// identical stats always produce identical labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedAnalysis {
    pub role: Role,
    pub play_style: PlayStyle,
    pub strengths: Vec<Strength>,
    pub weaknesses: Vec<Weakness>,
}

/// One recent competitive match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentMatch {
    pub match_id: String,
    pub map: String,
    pub result: String,
    pub score: String,
    pub kills: f64,
    pub deaths: f64,
    pub assists: f64,
    pub headshot_pct: f64,
    pub adr: f64,
    pub kd: f64,
    pub rating: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Normalized per-player record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Provider platform slug (e.g. "steam").
    pub platform: String,
    pub platform_user_id: String,
    pub handle: String,
    pub avatar_url: String,
    pub provenance: Provenance,
    pub stats: PlayerStats,
    pub rating: RatingSummary,
    pub analysis: DerivedAnalysis,
    /// Most recent competitive matches, newest first, at most 20.
    pub recent_matches: Vec<RecentMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_default_is_provider() {
        assert_eq!(Provenance::default(), Provenance::Provider);
        assert!(!Provenance::Provider.is_synthetic());
        assert!(Provenance::Synthetic.is_synthetic());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::EntryFragger).unwrap();
        assert_eq!(json, "\"entry_fragger\"");

        let parsed: Role = serde_json::from_str("\"awper\"").unwrap();
        assert_eq!(parsed, Role::Awper);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(format!("{}", Role::EntryFragger), "entry_fragger");
        assert_eq!(format!("{}", Role::Rifler), "rifler");
    }

    #[test]
    fn test_play_style_serialization() {
        let json = serde_json::to_string(&PlayStyle::Aggressive).unwrap();
        assert_eq!(json, "\"aggressive\"");
    }

    #[test]
    fn test_strength_serialization() {
        let json = serde_json::to_string(&Strength::HighHeadshotRate).unwrap();
        assert_eq!(json, "\"high_headshot_rate\"");
    }

    #[test]
    fn test_player_stats_default_all_zero() {
        let stats = PlayerStats::default();
        assert_eq!(stats.kd, 0.0);
        assert_eq!(stats.headshot_pct, 0.0);
        assert_eq!(stats.matches_played, 0.0);
    }

    #[test]
    fn test_rating_summary_default_unranked() {
        let rating = RatingSummary::default();
        assert_eq!(rating.rank_name, "Unranked");
        assert_eq!(rating.rating, 0.0);
    }

    #[test]
    fn test_profile_serialization_round_trip() {
        let profile = PlayerProfile {
            platform: "steam".to_string(),
            platform_user_id: "7656119".to_string(),
            handle: "s1mple".to_string(),
            avatar_url: String::new(),
            provenance: Provenance::Provider,
            stats: PlayerStats {
                kd: 1.42,
                ..Default::default()
            },
            rating: RatingSummary::default(),
            analysis: DerivedAnalysis::default(),
            recent_matches: vec![],
        };

        let json = serde_json::to_string(&profile).unwrap();
        let parsed: PlayerProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
    }
}
