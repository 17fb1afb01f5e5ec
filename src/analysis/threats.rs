//! Threat and opportunity detection over the enemy roster.

use crate::models::{
    Opportunity, OpportunityType, PlayStyle, PlayerProfile, Role, Severity, Threat, ThreatType,
};

/// Scan enemy profiles for standout risks. Rules are evaluated
/// independently per player, so one player may trigger several threats.
/// The result is sorted by severity descending; ties keep detection order.
pub fn detect_threats(enemy: &[PlayerProfile]) -> Vec<Threat> {
    let mut threats = Vec::new();

    for p in enemy {
        let stats = &p.stats;
        let analysis = &p.analysis;

        if stats.kd > 1.5 {
            threats.push(Threat {
                threat_type: ThreatType::StarPlayer,
                player: p.handle.clone(),
                role: analysis.role,
                kd: stats.kd,
                headshot_pct: stats.headshot_pct,
                severity: Severity::High,
                counter_strategy: "Focus fire, use utility to isolate".to_string(),
            });
        }

        if analysis.role == Role::Awper && stats.headshot_pct > 50.0 {
            threats.push(Threat {
                threat_type: ThreatType::SkilledAwper,
                player: p.handle.clone(),
                role: analysis.role,
                kd: stats.kd,
                headshot_pct: stats.headshot_pct,
                severity: Severity::High,
                counter_strategy: "Smoke key angles, use flashes for peeks".to_string(),
            });
        }

        if analysis.play_style == PlayStyle::Aggressive && stats.kd > 1.2 {
            threats.push(Threat {
                threat_type: ThreatType::AggressivePlayer,
                player: p.handle.clone(),
                role: analysis.role,
                kd: stats.kd,
                headshot_pct: stats.headshot_pct,
                severity: Severity::Medium,
                counter_strategy: "Stack sites, prepare for rushes".to_string(),
            });
        }
    }

    // Stable sort keeps detection order within a severity.
    threats.sort_by(|a, b| b.severity.rank().cmp(&a.severity.rank()));
    threats
}

/// Scan enemy profiles for exploitable weaknesses. An empty roster yields
/// no opportunities.
pub fn detect_opportunities(enemy: &[PlayerProfile]) -> Vec<Opportunity> {
    let mut opportunities = Vec::new();
    if enemy.is_empty() {
        return opportunities;
    }

    let weak_players: Vec<String> = enemy
        .iter()
        .filter(|p| p.stats.kd < 0.8)
        .map(|p| p.handle.clone())
        .collect();
    if !weak_players.is_empty() {
        opportunities.push(Opportunity {
            opportunity_type: OpportunityType::WeakPlayers,
            players: weak_players,
            win_rate: None,
            exploitation: "Target these players for easy picks".to_string(),
        });
    }

    let average_win_rate =
        enemy.iter().map(|p| p.stats.win_rate).sum::<f64>() / enemy.len() as f64;
    if average_win_rate < 45.0 {
        opportunities.push(Opportunity {
            opportunity_type: OpportunityType::LowConfidenceTeam,
            players: vec![],
            win_rate: Some(average_win_rate),
            exploitation: "Apply pressure early to break morale".to_string(),
        });
    }

    if !enemy.iter().any(|p| p.analysis.role == Role::Awper) {
        opportunities.push(Opportunity {
            opportunity_type: OpportunityType::NoAwper,
            players: vec![],
            win_rate: None,
            exploitation: "Control long ranges with AWP".to_string(),
        });
    }

    opportunities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DerivedAnalysis, PlayerStats, Provenance, RatingSummary};

    fn enemy(
        handle: &str,
        kd: f64,
        headshot_pct: f64,
        win_rate: f64,
        role: Role,
        play_style: PlayStyle,
    ) -> PlayerProfile {
        PlayerProfile {
            platform: "steam".to_string(),
            platform_user_id: handle.to_string(),
            handle: handle.to_string(),
            avatar_url: String::new(),
            provenance: Provenance::Provider,
            stats: PlayerStats {
                kd,
                headshot_pct,
                win_rate,
                ..Default::default()
            },
            rating: RatingSummary::default(),
            analysis: DerivedAnalysis {
                role,
                play_style,
                ..Default::default()
            },
            recent_matches: vec![],
        }
    }

    #[test]
    fn test_star_player_at_kd_16() {
        let roster = vec![enemy("star", 1.6, 40.0, 50.0, Role::Rifler, PlayStyle::Passive)];
        let threats = detect_threats(&roster);
        assert_eq!(threats.len(), 1);
        assert_eq!(threats[0].threat_type, ThreatType::StarPlayer);
        assert_eq!(threats[0].severity, Severity::High);
    }

    #[test]
    fn test_no_star_player_at_kd_14() {
        let roster = vec![enemy("ok", 1.4, 40.0, 50.0, Role::Rifler, PlayStyle::Passive)];
        let threats = detect_threats(&roster);
        assert!(threats
            .iter()
            .all(|t| t.threat_type != ThreatType::StarPlayer));
    }

    #[test]
    fn test_skilled_awper_requires_role_and_headshots() {
        let roster = vec![enemy("awp", 1.3, 55.0, 50.0, Role::Awper, PlayStyle::Passive)];
        let threats = detect_threats(&roster);
        assert_eq!(threats.len(), 1);
        assert_eq!(threats[0].threat_type, ThreatType::SkilledAwper);

        let roster = vec![enemy("awp", 1.3, 45.0, 50.0, Role::Awper, PlayStyle::Passive)];
        assert!(detect_threats(&roster).is_empty());
    }

    #[test]
    fn test_aggressive_player_is_medium() {
        let roster = vec![enemy(
            "rush",
            1.3,
            40.0,
            50.0,
            Role::EntryFragger,
            PlayStyle::Aggressive,
        )];
        let threats = detect_threats(&roster);
        assert_eq!(threats.len(), 1);
        assert_eq!(threats[0].threat_type, ThreatType::AggressivePlayer);
        assert_eq!(threats[0].severity, Severity::Medium);
    }

    #[test]
    fn test_one_player_can_trigger_multiple_threats() {
        // kd 1.6 + awper with 55% headshots + aggressive style.
        let roster = vec![enemy("ace", 1.6, 55.0, 50.0, Role::Awper, PlayStyle::Aggressive)];
        let threats = detect_threats(&roster);
        assert_eq!(threats.len(), 3);
    }

    #[test]
    fn test_threats_sorted_high_first_stable() {
        let roster = vec![
            enemy("rush", 1.3, 40.0, 50.0, Role::Rifler, PlayStyle::Aggressive),
            enemy("star", 1.7, 40.0, 50.0, Role::Rifler, PlayStyle::Passive),
            enemy("awp", 1.1, 60.0, 50.0, Role::Awper, PlayStyle::Passive),
        ];
        let threats = detect_threats(&roster);
        assert_eq!(threats.len(), 3);
        // High severities first, in detection order: star before awp.
        assert_eq!(threats[0].threat_type, ThreatType::StarPlayer);
        assert_eq!(threats[1].threat_type, ThreatType::SkilledAwper);
        assert_eq!(threats[2].threat_type, ThreatType::AggressivePlayer);
    }

    #[test]
    fn test_weak_players_opportunity_lists_all() {
        let roster = vec![
            enemy("a", 0.7, 40.0, 50.0, Role::Rifler, PlayStyle::Passive),
            enemy("b", 1.2, 40.0, 50.0, Role::Awper, PlayStyle::Passive),
            enemy("c", 0.75, 40.0, 50.0, Role::Support, PlayStyle::Passive),
        ];
        let opportunities = detect_opportunities(&roster);
        let weak = opportunities
            .iter()
            .find(|o| o.opportunity_type == OpportunityType::WeakPlayers)
            .unwrap();
        assert_eq!(weak.players, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_low_confidence_team_opportunity() {
        let roster = vec![
            enemy("a", 1.0, 40.0, 40.0, Role::Awper, PlayStyle::Passive),
            enemy("b", 1.0, 40.0, 44.0, Role::Rifler, PlayStyle::Passive),
        ];
        let opportunities = detect_opportunities(&roster);
        let low = opportunities
            .iter()
            .find(|o| o.opportunity_type == OpportunityType::LowConfidenceTeam)
            .unwrap();
        assert_eq!(low.win_rate, Some(42.0));
    }

    #[test]
    fn test_no_awper_opportunity() {
        let roster = vec![enemy("a", 1.0, 40.0, 50.0, Role::Rifler, PlayStyle::Passive)];
        let opportunities = detect_opportunities(&roster);
        assert!(opportunities
            .iter()
            .any(|o| o.opportunity_type == OpportunityType::NoAwper));

        let roster = vec![enemy("a", 1.0, 40.0, 50.0, Role::Awper, PlayStyle::Passive)];
        let opportunities = detect_opportunities(&roster);
        assert!(opportunities
            .iter()
            .all(|o| o.opportunity_type != OpportunityType::NoAwper));
    }

    #[test]
    fn test_empty_roster_yields_nothing() {
        assert!(detect_threats(&[]).is_empty());
        assert!(detect_opportunities(&[]).is_empty());
    }
}
