//! Strategic analysis engine.
//!
//! Computes derived views from normalized profiles:
//! - Team aggregation (averages, composition, style, predicted strategy)
//! - Threat and opportunity detection over the enemy roster
//! - Ranked tactical recommendations
//! - Briefing confidence scoring

pub mod recommend;
pub mod team;
pub mod threats;

pub use recommend::{generate as generate_recommendations, map_recommendations};
pub use team::{aggregate, team_report, team_style, AggregationError, TeamSignals};
pub use threats::{detect_opportunities, detect_threats};

use crate::models::PlayerProfile;

/// Cap applied to every briefing confidence score.
pub const CONFIDENCE_CAP: u32 = 95;

/// Confidence in a briefing, as a percentage of how much data backs it.
///
/// 10 points per resolved profile, a per-player bonus for match history
/// depth (>100 → 10, >50 → 5, >20 → 3), and a flat 15 when any player has
/// more than 10 recent matches on record.
pub fn confidence_score(profiles: &[PlayerProfile]) -> u32 {
    let mut confidence = profiles.len() as u32 * 10;

    for p in profiles {
        let matches = p.stats.matches_played;
        if matches > 100.0 {
            confidence += 10;
        } else if matches > 50.0 {
            confidence += 5;
        } else if matches > 20.0 {
            confidence += 3;
        }
    }

    if profiles.iter().any(|p| p.recent_matches.len() > 10) {
        confidence += 15;
    }

    confidence.min(CONFIDENCE_CAP)
}
