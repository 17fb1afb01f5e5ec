//! Threats and opportunities read from the enemy roster.

use serde::{Deserialize, Serialize};

use super::Role;

/// Threat severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Numeric rank used for descending sorts.
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// What kind of risk an enemy player poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatType {
    StarPlayer,
    SkilledAwper,
    AggressivePlayer,
}

/// A specific risk posed by one opposing player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    #[serde(rename = "type")]
    pub threat_type: ThreatType,
    pub player: String,
    pub role: Role,
    pub kd: f64,
    pub headshot_pct: f64,
    pub severity: Severity,
    pub counter_strategy: String,
}

/// What kind of weakness the enemy roster exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityType {
    WeakPlayers,
    LowConfidenceTeam,
    NoAwper,
}

/// An exploitable weakness in the opposing roster. `players` is empty for
/// team-level opportunities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "type")]
    pub opportunity_type: OpportunityType,
    pub players: Vec<String>,
    pub win_rate: Option<f64>,
    pub exploitation: String,
}
