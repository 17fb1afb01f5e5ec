//! Team-level aggregation models.

use serde::{Deserialize, Serialize};

use super::Role;

/// Team style classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TeamStyle {
    Aggressive,
    Tactical,
    Defensive,
    #[default]
    Balanced,
}

impl TeamStyle {
    /// Fixed style → strategy lookup.
    pub fn predicted_strategy(self, has_awper: bool) -> &'static str {
        match self {
            TeamStyle::Aggressive => "Fast executes and map control",
            TeamStyle::Tactical if has_awper => "Slow defaults with AWP control",
            TeamStyle::Defensive => "Passive holds and late rotates",
            _ => "Standard defaults and mid-round calls",
        }
    }
}

impl std::fmt::Display for TeamStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamStyle::Aggressive => write!(f, "aggressive"),
            TeamStyle::Tactical => write!(f, "tactical"),
            TeamStyle::Defensive => write!(f, "defensive"),
            TeamStyle::Balanced => write!(f, "balanced"),
        }
    }
}

/// How exposed the weakest player is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vulnerability {
    High,
    Medium,
}

/// The team's standout performer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerHighlight {
    pub handle: String,
    pub kd: f64,
    pub role: Role,
}

/// The team's lowest performer by k/d.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakLink {
    pub handle: String,
    pub kd: f64,
    pub vulnerability: Vulnerability,
}

/// Role counts across the roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamComposition {
    pub has_awper: bool,
    pub entry_fraggers: u32,
    pub supports: u32,
}

/// Aggregated view of one roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAnalysis {
    pub player_count: usize,
    pub average_kd: f64,
    pub average_win_rate: f64,
    pub average_rating: f64,
    pub top_player: PlayerHighlight,
    pub weakest_player: WeakLink,
    pub composition: TeamComposition,
    pub team_style: TeamStyle,
    pub predicted_strategy: String,
}

/// Either a full analysis or the explicit degraded marker for an empty
/// roster. The degraded form serializes as `{"error": "No data available"}`
/// so a briefing never carries NaN-bearing numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamReport {
    Ready(TeamAnalysis),
    NoData { error: String },
}

impl TeamReport {
    /// The explicit no-data marker.
    pub fn no_data() -> Self {
        TeamReport::NoData {
            error: "No data available".to_string(),
        }
    }

    pub fn analysis(&self) -> Option<&TeamAnalysis> {
        match self {
            TeamReport::Ready(analysis) => Some(analysis),
            TeamReport::NoData { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, TeamReport::Ready(_))
    }
}
