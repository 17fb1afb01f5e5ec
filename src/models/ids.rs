//! Deterministic briefing IDs using SHA256 hashing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A deterministic briefing ID derived from the request inputs, so the
/// same matchup on the same map always hashes to the same ID.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BriefingId(String);

impl BriefingId {
    /// Create a new BriefingId from a hash string.
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Generate a BriefingId from both rosters and the map.
    /// Uses SHA256 and takes the first 16 characters for brevity.
    pub fn generate(own_ids: &[String], enemy_ids: &[String], map: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(own_ids.join(",").as_bytes());
        hasher.update(b"|");
        hasher.update(enemy_ids.join(",").as_bytes());
        hasher.update(b"|");
        hasher.update(map.as_bytes());
        let result = hasher.finalize();
        let hash = hex::encode(result);
        Self(hash[..16].to_string())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BriefingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for BriefingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BriefingId({})", self.0)
    }
}

impl From<String> for BriefingId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BriefingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let own = vec!["111".to_string(), "222".to_string()];
        let enemy = vec!["333".to_string()];

        let a = BriefingId::generate(&own, &enemy, "de_mirage");
        let b = BriefingId::generate(&own, &enemy, "de_mirage");
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_differs_by_map() {
        let own = vec!["111".to_string()];
        let enemy = vec!["222".to_string()];

        let mirage = BriefingId::generate(&own, &enemy, "de_mirage");
        let dust = BriefingId::generate(&own, &enemy, "de_dust2");
        assert_ne!(mirage, dust);
    }

    #[test]
    fn test_generate_differs_by_roster() {
        let enemy = vec!["222".to_string()];

        let a = BriefingId::generate(&["111".to_string()], &enemy, "de_mirage");
        let b = BriefingId::generate(&["999".to_string()], &enemy, "de_mirage");
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_length() {
        let id = BriefingId::generate(&["111".to_string()], &[], "de_nuke");
        assert_eq!(id.as_str().len(), 16);
    }

    #[test]
    fn test_display() {
        let id = BriefingId::new("abc123".to_string());
        assert_eq!(format!("{}", id), "abc123");
        assert_eq!(format!("{:?}", id), "BriefingId(abc123)");
    }
}
