//! Tactical recommendation rules.
//!
//! Rules fire independently in a fixed sequence (style → awp → weakness →
//! map), then the list is sorted by priority descending. The sort is
//! stable, so equal priorities keep generation order.

use crate::models::{
    Priority, Recommendation, RecommendationType, TeamReport, TeamStyle, Vulnerability,
};

/// Generate ranked recommendations from both team reports and the map.
///
/// Team-derived rules only fire when the relevant report carries data; a
/// no-data report contributes nothing. Map guidance always applies.
pub fn generate(own: &TeamReport, enemy: &TeamReport, map: &str) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if let (Some(own), Some(enemy)) = (own.analysis(), enemy.analysis()) {
        if enemy.team_style == TeamStyle::Aggressive && own.team_style == TeamStyle::Tactical {
            recommendations.push(Recommendation {
                rec_type: RecommendationType::CounterStyle,
                priority: Priority::High,
                title: "Counter Aggressive Play".to_string(),
                description:
                    "Enemy team plays aggressive. Use utility to slow pushes and play for trades."
                        .to_string(),
                actions: vec![
                    "Stack bombsites early in rounds".to_string(),
                    "Use incendiaries on chokepoints".to_string(),
                    "Play crossfires and trade frags".to_string(),
                ],
            });
        }
    }

    if let Some(enemy) = enemy.analysis() {
        if enemy.composition.has_awper {
            recommendations.push(Recommendation {
                rec_type: RecommendationType::CounterAwp,
                priority: Priority::High,
                title: "Neutralize Enemy AWPer".to_string(),
                description: "Enemy has dedicated AWPer. Control their angles.".to_string(),
                actions: vec![
                    "Smoke common AWP angles immediately".to_string(),
                    "Use coordinated flashes for peeks".to_string(),
                    "Force close-range engagements".to_string(),
                ],
            });
        }

        if enemy.weakest_player.vulnerability == Vulnerability::High {
            recommendations.push(Recommendation {
                rec_type: RecommendationType::ExploitWeakness,
                priority: Priority::Medium,
                title: "Target Weak Link".to_string(),
                description: format!(
                    "Focus {} - lowest performer on enemy team.",
                    enemy.weakest_player.handle
                ),
                actions: vec![
                    "Push their typical positions".to_string(),
                    "Force duels against this player".to_string(),
                    "Exploit for map control".to_string(),
                ],
            });
        }
    }

    recommendations.extend(map_recommendations(map));

    // Stable sort keeps generation order within a priority.
    recommendations.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    recommendations
}

/// Canned control-point guidance per map; unknown maps get a generic
/// default setup.
pub fn map_recommendations(map: &str) -> Vec<Recommendation> {
    match map {
        "de_mirage" => vec![Recommendation {
            rec_type: RecommendationType::MapControl,
            priority: Priority::High,
            title: "Control Middle".to_string(),
            description: "Mid control is crucial on Mirage".to_string(),
            actions: vec![
                "Smoke window/connector early".to_string(),
                "Contest mid with 2 players".to_string(),
            ],
        }],
        "de_dust2" => vec![Recommendation {
            rec_type: RecommendationType::MapControl,
            priority: Priority::High,
            title: "Long A Control".to_string(),
            description: "Take long control for map presence".to_string(),
            actions: vec![
                "Rush long with flash support".to_string(),
                "Smoke CT cross".to_string(),
            ],
        }],
        "de_inferno" => vec![Recommendation {
            rec_type: RecommendationType::MapControl,
            priority: Priority::High,
            title: "Banana Control".to_string(),
            description: "Control banana for B site pressure".to_string(),
            actions: vec![
                "Molly car position".to_string(),
                "Flash over for control".to_string(),
            ],
        }],
        _ => vec![Recommendation {
            rec_type: RecommendationType::DefaultSetup,
            priority: Priority::Medium,
            title: "Default Setup".to_string(),
            description: "Play standard positions and gather info".to_string(),
            actions: vec![
                "Spread across map".to_string(),
                "Look for picks".to_string(),
            ],
        }],
    }
}
