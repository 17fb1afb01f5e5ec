//! Raw provider payload schema.
//!
//! Typed mirror of the Tracker Network JSON, with every nested field
//! optional. Defaults are resolved once, in [`crate::normalize`];
//! downstream code never touches these types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level `data` envelope on every provider response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Raw career profile: platform identity plus a list of stat segments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    #[serde(default)]
    pub platform_info: RawPlatformInfo,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

impl RawProfile {
    /// Stats from the `overview` segment, if present.
    pub fn overview_stats(&self) -> Option<&HashMap<String, RawStat>> {
        self.segments
            .iter()
            .find(|s| s.segment_type == "overview")
            .map(|s| &s.stats)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlatformInfo {
    #[serde(default)]
    pub platform_slug: Option<String>,
    #[serde(default)]
    pub platform_user_id: Option<String>,
    #[serde(default)]
    pub platform_user_handle: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSegment {
    #[serde(rename = "type", default)]
    pub segment_type: String,
    #[serde(default)]
    pub stats: HashMap<String, RawStat>,
}

/// A single provider stat object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStat {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub display_value: Option<String>,
    #[serde(default)]
    pub percentile: Option<f64>,
    #[serde(default)]
    pub metadata: Option<RawStatMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatMetadata {
    #[serde(default)]
    pub icon_url: Option<String>,
}

/// One entry of the recent-match segment list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMatch {
    #[serde(default)]
    pub attributes: RawMatchAttributes,
    #[serde(default)]
    pub metadata: RawMatchMetadata,
    #[serde(default)]
    pub stats: HashMap<String, RawStat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMatchAttributes {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMatchMetadata {
    #[serde(default)]
    pub map_name: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_deserialization() {
        let json = r#"{
            "data": {
                "platformInfo": {
                    "platformSlug": "steam",
                    "platformUserId": "76561198000000000",
                    "platformUserHandle": "s1mple",
                    "avatarUrl": "https://example.com/a.png"
                },
                "segments": [
                    {
                        "type": "overview",
                        "stats": {
                            "kd": { "value": 1.42, "displayValue": "1.42" },
                            "headshotPct": { "value": 52.1, "percentile": 98.0 }
                        }
                    }
                ]
            }
        }"#;

        let envelope: Envelope<RawProfile> = serde_json::from_str(json).unwrap();
        let profile = envelope.data;

        assert_eq!(profile.platform_info.platform_slug.as_deref(), Some("steam"));
        let overview = profile.overview_stats().unwrap();
        assert_eq!(overview["kd"].value, Some(1.42));
        assert_eq!(overview["headshotPct"].percentile, Some(98.0));
    }

    #[test]
    fn test_missing_fields_default() {
        let profile: RawProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.platform_info.platform_slug.is_none());
        assert!(profile.segments.is_empty());
        assert!(profile.overview_stats().is_none());
    }

    #[test]
    fn test_stat_with_only_display_value() {
        let stat: RawStat = serde_json::from_str(r#"{"displayValue": "Gold Nova"}"#).unwrap();
        assert!(stat.value.is_none());
        assert_eq!(stat.display_value.as_deref(), Some("Gold Nova"));
    }

    #[test]
    fn test_raw_match_deserialization() {
        let json = r#"{
            "attributes": { "id": "m-123" },
            "metadata": {
                "mapName": "de_mirage",
                "result": "win",
                "score": "16-12",
                "timestamp": "2025-11-04T18:30:00Z"
            },
            "stats": {
                "kills": { "value": 24.0 },
                "kd": { "value": 1.33 }
            }
        }"#;

        let m: RawMatch = serde_json::from_str(json).unwrap();
        assert_eq!(m.attributes.id.as_deref(), Some("m-123"));
        assert_eq!(m.metadata.map_name.as_deref(), Some("de_mirage"));
        assert!(m.metadata.timestamp.is_some());
        assert_eq!(m.stats["kills"].value, Some(24.0));
    }

    #[test]
    fn test_non_overview_segments_are_ignored() {
        let json = r#"{
            "segments": [
                { "type": "map", "stats": { "kd": { "value": 9.9 } } },
                { "type": "overview", "stats": { "kd": { "value": 1.1 } } }
            ]
        }"#;

        let profile: RawProfile = serde_json::from_str(json).unwrap();
        let overview = profile.overview_stats().unwrap();
        assert_eq!(overview["kd"].value, Some(1.1));
    }
}
