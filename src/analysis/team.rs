//! Roster aggregation into a team-level view.

use thiserror::Error;

use crate::models::{
    PlayerHighlight, PlayerProfile, Role, TeamAnalysis, TeamComposition, TeamReport, TeamStyle,
    Vulnerability, WeakLink,
};

/// Raised when aggregation is attempted over an empty roster.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("No data available")]
    EmptyRoster,
}

/// Inputs to the team style cascade.
#[derive(Debug, Clone, Copy)]
pub struct TeamSignals {
    pub average_kd: f64,
    pub has_awper: bool,
    pub entry_fraggers: u32,
}

type TeamPredicate = fn(&TeamSignals) -> bool;

fn aggressive_team(s: &TeamSignals) -> bool {
    s.average_kd > 1.1 && s.entry_fraggers >= 2
}

fn tactical_team(s: &TeamSignals) -> bool {
    s.has_awper && s.average_kd > 1.0
}

fn defensive_team(s: &TeamSignals) -> bool {
    s.average_kd < 0.9
}

/// Style rules in priority order; first match wins, `Balanced` is the
/// fallback.
const TEAM_STYLE_RULES: [(TeamPredicate, TeamStyle); 3] = [
    (aggressive_team, TeamStyle::Aggressive),
    (tactical_team, TeamStyle::Tactical),
    (defensive_team, TeamStyle::Defensive),
];

/// Classify a team's style from its aggregate signals.
pub fn team_style(signals: &TeamSignals) -> TeamStyle {
    TEAM_STYLE_RULES
        .iter()
        .find(|(matches, _)| matches(signals))
        .map(|(_, style)| *style)
        .unwrap_or(TeamStyle::Balanced)
}

/// Aggregate a roster of profiles into a [`TeamAnalysis`].
///
/// Top and weakest player are chosen by k/d; on ties the first occurrence
/// in roster order wins, for both ends.
pub fn aggregate(profiles: &[PlayerProfile]) -> Result<TeamAnalysis, AggregationError> {
    if profiles.is_empty() {
        return Err(AggregationError::EmptyRoster);
    }

    let count = profiles.len() as f64;
    let average_kd = profiles.iter().map(|p| p.stats.kd).sum::<f64>() / count;
    let average_win_rate = profiles.iter().map(|p| p.stats.win_rate).sum::<f64>() / count;
    let average_rating = profiles.iter().map(|p| p.rating.rating).sum::<f64>() / count;

    let mut top = &profiles[0];
    let mut weakest = &profiles[0];
    for p in &profiles[1..] {
        if p.stats.kd > top.stats.kd {
            top = p;
        }
        if p.stats.kd < weakest.stats.kd {
            weakest = p;
        }
    }

    let composition = TeamComposition {
        has_awper: profiles.iter().any(|p| p.analysis.role == Role::Awper),
        entry_fraggers: profiles
            .iter()
            .filter(|p| p.analysis.role == Role::EntryFragger)
            .count() as u32,
        supports: profiles
            .iter()
            .filter(|p| p.analysis.role == Role::Support)
            .count() as u32,
    };

    let style = team_style(&TeamSignals {
        average_kd,
        has_awper: composition.has_awper,
        entry_fraggers: composition.entry_fraggers,
    });

    Ok(TeamAnalysis {
        player_count: profiles.len(),
        average_kd,
        average_win_rate,
        average_rating,
        top_player: PlayerHighlight {
            handle: top.handle.clone(),
            kd: top.stats.kd,
            role: top.analysis.role,
        },
        weakest_player: WeakLink {
            handle: weakest.handle.clone(),
            kd: weakest.stats.kd,
            vulnerability: if weakest.stats.kd < 0.8 {
                Vulnerability::High
            } else {
                Vulnerability::Medium
            },
        },
        predicted_strategy: style.predicted_strategy(composition.has_awper).to_string(),
        composition,
        team_style: style,
    })
}

/// Aggregate into a [`TeamReport`], mapping an empty roster to the
/// explicit no-data marker.
pub fn team_report(profiles: &[PlayerProfile]) -> TeamReport {
    match aggregate(profiles) {
        Ok(analysis) => TeamReport::Ready(analysis),
        Err(AggregationError::EmptyRoster) => TeamReport::no_data(),
    }
}
