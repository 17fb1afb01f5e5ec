//! Payload normalization and statistical inference.
//!
//! Converts raw provider payloads into [`PlayerProfile`] records. All
//! defaults are resolved here, once; downstream analysis never sees an
//! absent field. Role and play-style labels come from ordered
//! `(predicate, label)` tables, so the first-match-wins policy is explicit
//! and each rule is testable on its own.

use std::collections::HashMap;

use crate::fetch::{RawMatch, RawProfile, RawStat};
use crate::models::{
    DerivedAnalysis, PlayStyle, PlayerProfile, PlayerStats, Provenance, RatingSummary,
    RecentMatch, Role, Strength, Weakness,
};

/// Maximum recent matches carried on a profile.
pub const RECENT_MATCH_LIMIT: usize = 20;

type StatPredicate = fn(&PlayerStats) -> bool;

fn awper_profile(s: &PlayerStats) -> bool {
    s.headshot_pct > 50.0 && s.kd > 1.2
}

fn entry_fragger_profile(s: &PlayerStats) -> bool {
    s.adr > 85.0 && s.kd > 1.1
}

fn playmaker_profile(s: &PlayerStats) -> bool {
    s.mvp_count > 0.25 * s.matches_played
}

fn support_profile(s: &PlayerStats) -> bool {
    s.kd < 0.9 && s.accuracy > 20.0
}

/// Role rules in priority order; first match wins, `Rifler` is the fallback.
const ROLE_RULES: [(StatPredicate, Role); 4] = [
    (awper_profile, Role::Awper),
    (entry_fragger_profile, Role::EntryFragger),
    (playmaker_profile, Role::Playmaker),
    (support_profile, Role::Support),
];

fn aggressive_style(s: &PlayerStats) -> bool {
    s.kd > 1.3 && s.accuracy > 25.0
}

fn balanced_style(s: &PlayerStats) -> bool {
    s.win_rate > 55.0 && s.kd > 1.0
}

fn supportive_style(s: &PlayerStats) -> bool {
    s.accuracy > 22.0 && s.kd < 1.0
}

/// Play-style rules in priority order; `Passive` is the fallback.
const STYLE_RULES: [(StatPredicate, PlayStyle); 3] = [
    (aggressive_style, PlayStyle::Aggressive),
    (balanced_style, PlayStyle::Balanced),
    (supportive_style, PlayStyle::Supportive),
];

/// Infer the player's role from career stats.
pub fn infer_role(stats: &PlayerStats) -> Role {
    ROLE_RULES
        .iter()
        .find(|(matches, _)| matches(stats))
        .map(|(_, role)| *role)
        .unwrap_or(Role::Rifler)
}

/// Infer the player's play style from career stats.
pub fn infer_play_style(stats: &PlayerStats) -> PlayStyle {
    STYLE_RULES
        .iter()
        .find(|(matches, _)| matches(stats))
        .map(|(_, style)| *style)
        .unwrap_or(PlayStyle::Passive)
}

/// Tag statistical strengths. Thresholds are independent; a profile may
/// carry several tags or none.
pub fn identify_strengths(stats: &PlayerStats) -> Vec<Strength> {
    let mut strengths = Vec::new();
    if stats.headshot_pct > 50.0 {
        strengths.push(Strength::HighHeadshotRate);
    }
    if stats.kd > 1.2 {
        strengths.push(Strength::GoodFragger);
    }
    if stats.win_rate > 55.0 {
        strengths.push(Strength::WinnerMentality);
    }
    if stats.accuracy > 25.0 {
        strengths.push(Strength::GoodAim);
    }
    if stats.mvp_count > 0.25 * stats.matches_played {
        strengths.push(Strength::MvpPlayer);
    }
    strengths
}

/// Tag statistical weaknesses, independently per threshold.
pub fn identify_weaknesses(stats: &PlayerStats) -> Vec<Weakness> {
    let mut weaknesses = Vec::new();
    if stats.kd < 0.8 {
        weaknesses.push(Weakness::LowKd);
    }
    if stats.headshot_pct < 35.0 {
        weaknesses.push(Weakness::LowHeadshotRate);
    }
    if stats.win_rate < 45.0 {
        weaknesses.push(Weakness::LowWinRate);
    }
    if stats.accuracy < 15.0 {
        weaknesses.push(Weakness::PoorAim);
    }
    weaknesses
}

/// Derive all labels. Pure function of the stats.
pub fn derive_analysis(stats: &PlayerStats) -> DerivedAnalysis {
    DerivedAnalysis {
        role: infer_role(stats),
        play_style: infer_play_style(stats),
        strengths: identify_strengths(stats),
        weaknesses: identify_weaknesses(stats),
    }
}

fn stat(stats: &HashMap<String, RawStat>, key: &str) -> f64 {
    stats.get(key).and_then(|s| s.value).unwrap_or(0.0)
}

/// Convert a raw profile plus its recent matches into the internal schema.
pub fn normalize(raw_profile: &RawProfile, raw_matches: &[RawMatch]) -> PlayerProfile {
    let empty = HashMap::new();
    let overview = raw_profile.overview_stats().unwrap_or(&empty);

    let stats = PlayerStats {
        time_played: stat(overview, "timePlayed"),
        score: stat(overview, "score"),
        kills: stat(overview, "kills"),
        deaths: stat(overview, "deaths"),
        kd: stat(overview, "kd"),
        damage: stat(overview, "damage"),
        adr: stat(overview, "damagePerRound"),
        headshots: stat(overview, "headshots"),
        headshot_pct: stat(overview, "headshotPct"),
        shots_fired: stat(overview, "shotsFired"),
        shots_hit: stat(overview, "shotsHit"),
        accuracy: stat(overview, "shotsAccuracy"),
        wins: stat(overview, "wins"),
        losses: stat(overview, "losses"),
        win_rate: stat(overview, "wlPercentage"),
        mvp_count: stat(overview, "mvp"),
        matches_played: stat(overview, "matchesPlayed"),
        rounds_played: stat(overview, "roundsPlayed"),
        rounds_won: stat(overview, "roundsWon"),
    };

    let rating = RatingSummary {
        rating: stat(overview, "rating"),
        rank_name: overview
            .get("rank")
            .and_then(|s| s.display_value.clone())
            .unwrap_or_else(|| "Unranked".to_string()),
        rank_icon_url: overview
            .get("rank")
            .and_then(|s| s.metadata.as_ref())
            .and_then(|m| m.icon_url.clone())
            .unwrap_or_default(),
        percentile: overview
            .get("rankScore")
            .and_then(|s| s.percentile)
            .unwrap_or(0.0),
    };

    let analysis = derive_analysis(&stats);
    let info = &raw_profile.platform_info;

    PlayerProfile {
        platform: info.platform_slug.clone().unwrap_or_else(|| "steam".to_string()),
        platform_user_id: info.platform_user_id.clone().unwrap_or_default(),
        handle: info
            .platform_user_handle
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        avatar_url: info.avatar_url.clone().unwrap_or_default(),
        provenance: Provenance::Provider,
        stats,
        rating,
        analysis,
        recent_matches: raw_matches
            .iter()
            .take(RECENT_MATCH_LIMIT)
            .map(normalize_match)
            .collect(),
    }
}

fn normalize_match(raw: &RawMatch) -> RecentMatch {
    RecentMatch {
        match_id: raw.attributes.id.clone().unwrap_or_default(),
        map: raw.metadata.map_name.clone().unwrap_or_else(|| "unknown".to_string()),
        result: raw.metadata.result.clone().unwrap_or_default(),
        score: raw.metadata.score.clone().unwrap_or_default(),
        kills: stat(&raw.stats, "kills"),
        deaths: stat(&raw.stats, "deaths"),
        assists: stat(&raw.stats, "assists"),
        headshot_pct: stat(&raw.stats, "headshotPct"),
        adr: stat(&raw.stats, "damagePerRound"),
        kd: stat(&raw.stats, "kd"),
        rating: stat(&raw.stats, "rating"),
        timestamp: raw.metadata.timestamp,
    }
}

/// Placeholder profile substituted when every fetch path for a player
/// failed. Clearly labeled via [`Provenance::Synthetic`]; stats are fixed
/// mid-tier values, and labels are derived from them through the same
/// cascades as real data.
pub fn synthetic_profile(player_id: &str) -> PlayerProfile {
    let tail: String = {
        let chars: Vec<char> = player_id.chars().collect();
        let start = chars.len().saturating_sub(4);
        chars[start..].iter().collect()
    };

    let stats = PlayerStats {
        time_played: 120_000.0,
        kills: 15_420.0,
        deaths: 13_200.0,
        kd: 1.17,
        damage: 1_842_000.0,
        headshots: 7_800.0,
        headshot_pct: 50.6,
        accuracy: 19.2,
        wins: 520.0,
        losses: 480.0,
        win_rate: 52.0,
        mvp_count: 156.0,
        matches_played: 1000.0,
        ..Default::default()
    };
    let analysis = derive_analysis(&stats);

    PlayerProfile {
        platform: "steam".to_string(),
        platform_user_id: player_id.to_string(),
        handle: format!("MockPlayer_{}", tail),
        avatar_url: String::new(),
        provenance: Provenance::Synthetic,
        stats,
        rating: RatingSummary {
            rating: 1850.0,
            rank_name: "DMG".to_string(),
            rank_icon_url: String::new(),
            percentile: 72.0,
        },
        analysis,
        recent_matches: vec![RecentMatch {
            map: "de_mirage".to_string(),
            result: "win".to_string(),
            score: "16-12".to_string(),
            kills: 24.0,
            deaths: 18.0,
            kd: 1.33,
            rating: 1.22,
            ..Default::default()
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{RawMatchMetadata, RawSegment};
    use pretty_assertions::assert_eq;

    fn stats_with(kd: f64, headshot_pct: f64, adr: f64, accuracy: f64) -> PlayerStats {
        PlayerStats {
            kd,
            headshot_pct,
            adr,
            accuracy,
            ..Default::default()
        }
    }

    #[test]
    fn test_role_awper() {
        let stats = stats_with(1.3, 52.0, 0.0, 0.0);
        assert_eq!(infer_role(&stats), Role::Awper);
    }

    #[test]
    fn test_role_awper_requires_both_thresholds() {
        // High headshot rate alone is not enough.
        let stats = stats_with(1.1, 52.0, 0.0, 0.0);
        assert_ne!(infer_role(&stats), Role::Awper);
    }

    #[test]
    fn test_role_entry_fragger() {
        let stats = stats_with(1.15, 40.0, 90.0, 0.0);
        assert_eq!(infer_role(&stats), Role::EntryFragger);
    }

    #[test]
    fn test_role_playmaker() {
        let stats = PlayerStats {
            kd: 1.0,
            mvp_count: 300.0,
            matches_played: 1000.0,
            ..Default::default()
        };
        assert_eq!(infer_role(&stats), Role::Playmaker);
    }

    #[test]
    fn test_role_support() {
        let stats = stats_with(0.85, 30.0, 0.0, 22.0);
        assert_eq!(infer_role(&stats), Role::Support);
    }

    #[test]
    fn test_role_falls_back_to_rifler() {
        let stats = stats_with(1.0, 40.0, 70.0, 18.0);
        assert_eq!(infer_role(&stats), Role::Rifler);
    }

    #[test]
    fn test_role_cascade_order_awper_beats_entry() {
        // Satisfies both awper and entry fragger rules; awper is first.
        let stats = stats_with(1.3, 55.0, 95.0, 0.0);
        assert_eq!(infer_role(&stats), Role::Awper);
    }

    #[test]
    fn test_role_inference_is_deterministic() {
        let stats = stats_with(1.25, 51.0, 80.0, 24.0);
        let first = infer_role(&stats);
        for _ in 0..10 {
            assert_eq!(infer_role(&stats), first);
        }
    }

    #[test]
    fn test_zero_stats_infer_rifler_passive() {
        let stats = PlayerStats::default();
        assert_eq!(infer_role(&stats), Role::Rifler);
        assert_eq!(infer_play_style(&stats), PlayStyle::Passive);
    }

    #[test]
    fn test_style_aggressive() {
        let stats = stats_with(1.4, 0.0, 0.0, 26.0);
        assert_eq!(infer_play_style(&stats), PlayStyle::Aggressive);
    }

    #[test]
    fn test_style_balanced() {
        let stats = PlayerStats {
            kd: 1.1,
            win_rate: 58.0,
            ..Default::default()
        };
        assert_eq!(infer_play_style(&stats), PlayStyle::Balanced);
    }

    #[test]
    fn test_style_supportive() {
        let stats = stats_with(0.9, 0.0, 0.0, 23.0);
        assert_eq!(infer_play_style(&stats), PlayStyle::Supportive);
    }

    #[test]
    fn test_strengths_can_stack() {
        let stats = PlayerStats {
            kd: 1.5,
            headshot_pct: 55.0,
            win_rate: 60.0,
            accuracy: 27.0,
            ..Default::default()
        };
        let strengths = identify_strengths(&stats);
        assert!(strengths.contains(&Strength::HighHeadshotRate));
        assert!(strengths.contains(&Strength::GoodFragger));
        assert!(strengths.contains(&Strength::WinnerMentality));
        assert!(strengths.contains(&Strength::GoodAim));
    }

    #[test]
    fn test_weaknesses_can_stack() {
        let stats = PlayerStats {
            kd: 0.7,
            headshot_pct: 20.0,
            win_rate: 40.0,
            accuracy: 10.0,
            ..Default::default()
        };
        assert_eq!(identify_weaknesses(&stats).len(), 4);
    }

    #[test]
    fn test_solid_player_has_no_weaknesses() {
        let stats = PlayerStats {
            kd: 1.1,
            headshot_pct: 45.0,
            win_rate: 50.0,
            accuracy: 20.0,
            ..Default::default()
        };
        assert!(identify_weaknesses(&stats).is_empty());
    }

    fn overview_profile(entries: &[(&str, f64)]) -> RawProfile {
        let stats = entries
            .iter()
            .map(|(key, value)| {
                (
                    key.to_string(),
                    RawStat {
                        value: Some(*value),
                        ..Default::default()
                    },
                )
            })
            .collect();
        RawProfile {
            segments: vec![RawSegment {
                segment_type: "overview".to_string(),
                stats,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_maps_provider_keys() {
        let raw = overview_profile(&[
            ("kd", 1.42),
            ("headshotPct", 52.1),
            ("wlPercentage", 56.0),
            ("shotsAccuracy", 24.0),
            ("damagePerRound", 88.0),
            ("mvp", 50.0),
            ("matchesPlayed", 400.0),
        ]);

        let profile = normalize(&raw, &[]);
        assert_eq!(profile.stats.kd, 1.42);
        assert_eq!(profile.stats.headshot_pct, 52.1);
        assert_eq!(profile.stats.win_rate, 56.0);
        assert_eq!(profile.stats.accuracy, 24.0);
        assert_eq!(profile.stats.adr, 88.0);
        assert_eq!(profile.analysis.role, Role::Awper);
        assert_eq!(profile.provenance, Provenance::Provider);
    }

    #[test]
    fn test_normalize_empty_payload_defaults_to_zero() {
        let profile = normalize(&RawProfile::default(), &[]);
        assert_eq!(profile.stats, PlayerStats::default());
        assert_eq!(profile.handle, "Unknown");
        assert_eq!(profile.platform, "steam");
        assert_eq!(profile.rating.rank_name, "Unranked");
        assert_eq!(profile.analysis.role, Role::Rifler);
    }

    #[test]
    fn test_normalize_truncates_recent_matches() {
        let matches: Vec<RawMatch> = (0..30).map(|_| RawMatch::default()).collect();
        let profile = normalize(&RawProfile::default(), &matches);
        assert_eq!(profile.recent_matches.len(), RECENT_MATCH_LIMIT);
    }

    #[test]
    fn test_normalize_match_fields() {
        let raw = RawMatch {
            metadata: RawMatchMetadata {
                map_name: Some("de_inferno".to_string()),
                result: Some("loss".to_string()),
                score: Some("10-16".to_string()),
                timestamp: None,
            },
            stats: [(
                "kd".to_string(),
                RawStat {
                    value: Some(0.9),
                    ..Default::default()
                },
            )]
            .into_iter()
            .collect(),
            ..Default::default()
        };

        let profile = normalize(&RawProfile::default(), &[raw]);
        let m = &profile.recent_matches[0];
        assert_eq!(m.map, "de_inferno");
        assert_eq!(m.result, "loss");
        assert_eq!(m.kd, 0.9);
    }

    #[test]
    fn test_synthetic_profile_is_labeled() {
        let profile = synthetic_profile("76561198001234567");
        assert!(profile.provenance.is_synthetic());
        assert_eq!(profile.handle, "MockPlayer_4567");
        assert_eq!(profile.platform_user_id, "76561198001234567");
    }

    #[test]
    fn test_synthetic_profile_labels_come_from_cascades() {
        let profile = synthetic_profile("1234");
        // kd 1.17 with hs 50.6 is below the awper kd gate.
        assert_eq!(profile.analysis.role, Role::Rifler);
        assert_eq!(profile.analysis, derive_analysis(&profile.stats));
    }

    #[test]
    fn test_synthetic_profile_short_id() {
        let profile = synthetic_profile("42");
        assert_eq!(profile.handle, "MockPlayer_42");
    }
}
