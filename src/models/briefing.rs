//! The aggregate briefing result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BriefingId, Opportunity, Recommendation, TeamReport, Threat};

/// Complete strategic output for one upcoming match.
///
/// Threats and recommendations arrive pre-sorted by severity/priority
/// descending. `confidence` is a percentage in `[0, 95]` reflecting how
/// much data backs the analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreMatchBriefing {
    pub id: BriefingId,
    pub generated_at: DateTime<Utc>,
    pub map: String,
    pub team: TeamReport,
    pub enemy: TeamReport,
    pub threats: Vec<Threat>,
    pub opportunities: Vec<Opportunity>,
    pub recommendations: Vec<Recommendation>,
    pub confidence: u32,
    /// How many roster slots were filled with synthetic placeholder data.
    pub synthetic_profiles: u32,
}

/// Returned when briefing generation fails outright. Carries a textual
/// fallback strategy instead of propagating an exception to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BriefingFailure {
    pub error: bool,
    pub message: String,
    pub fallback_strategy: String,
}

impl BriefingFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            fallback_strategy: "Play default setups and gather intel".to_string(),
        }
    }
}
