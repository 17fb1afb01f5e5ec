use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use match_scout::api::state::AppState;
use match_scout::briefing::BriefingOrchestrator;
use match_scout::config::AppConfig;
use match_scout::models::{PlayerProfile, PreMatchBriefing, TeamReport};

#[derive(Parser)]
#[command(name = "match-scout")]
#[command(about = "Pre-match strategic briefing engine for competitive CS2 teams")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a pre-match briefing for two rosters
    Brief {
        /// Own team player ids (comma-separated)
        #[arg(long, value_delimiter = ',')]
        own: Vec<String>,

        /// Enemy team player ids (comma-separated)
        #[arg(long, value_delimiter = ',')]
        enemy: Vec<String>,

        /// Map identifier (e.g. de_mirage)
        #[arg(long, default_value = "")]
        map: String,

        /// Print the full briefing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch and normalize a single player profile
    Profile {
        /// Player id on the configured platform
        player_id: String,

        /// Print the full profile as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port number
        #[arg(long, default_value = "8080")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting match-scout v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli.config);

    match cli.command {
        Commands::Brief {
            own,
            enemy,
            map,
            json,
        } => {
            let orchestrator = BriefingOrchestrator::from_config(&config)?;
            match orchestrator.build_briefing(&own, &enemy, &map).await {
                Ok(briefing) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&briefing)?);
                    } else {
                        print_briefing(&briefing);
                    }
                }
                Err(e) => {
                    let failure = e.into_failure();
                    eprintln!("Briefing failed: {}", failure.message);
                    eprintln!("Fallback: {}", failure.fallback_strategy);
                }
            }
        }
        Commands::Profile { player_id, json } => {
            let orchestrator = BriefingOrchestrator::from_config(&config)?;
            let profile = orchestrator.player_profile(&player_id).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                print_profile(&profile);
            }
        }
        Commands::Serve { host, port } => {
            let orchestrator = Arc::new(BriefingOrchestrator::from_config(&config)?);
            let state = AppState { orchestrator };
            let app = match_scout::api::build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("API listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn load_config(path: &str) -> AppConfig {
    let path = std::path::PathBuf::from(path);
    if !path.exists() {
        return AppConfig::default();
    }
    match AppConfig::from_file(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load {}: {} (using defaults)", path.display(), e);
            AppConfig::default()
        }
    }
}

fn print_team(label: &str, report: &TeamReport) {
    match report.analysis() {
        Some(team) => {
            println!(
                "{}: {} players, avg K/D {:.2}, style {} ({})",
                label,
                team.player_count,
                team.average_kd,
                team.team_style,
                team.predicted_strategy
            );
            println!(
                "  Top: {} ({:.2} K/D, {})",
                team.top_player.handle, team.top_player.kd, team.top_player.role
            );
            println!(
                "  Weakest: {} ({:.2} K/D)",
                team.weakest_player.handle, team.weakest_player.kd
            );
        }
        None => println!("{}: no data available", label),
    }
}

fn print_briefing(briefing: &PreMatchBriefing) {
    println!("\n=== Pre-Match Briefing ({}) ===", briefing.map);
    println!("Confidence: {}%", briefing.confidence);
    if briefing.synthetic_profiles > 0 {
        println!(
            "Warning: {} profile(s) substituted with placeholder data",
            briefing.synthetic_profiles
        );
    }
    println!();

    print_team("Own team", &briefing.team);
    print_team("Enemy team", &briefing.enemy);

    if !briefing.threats.is_empty() {
        println!("\nThreats:");
        for threat in &briefing.threats {
            println!(
                "  [{}] {} ({:.2} K/D): {}",
                threat.severity, threat.player, threat.kd, threat.counter_strategy
            );
        }
    }

    if !briefing.opportunities.is_empty() {
        println!("\nOpportunities:");
        for opportunity in &briefing.opportunities {
            if opportunity.players.is_empty() {
                println!("  {}", opportunity.exploitation);
            } else {
                println!(
                    "  {} ({})",
                    opportunity.exploitation,
                    opportunity.players.join(", ")
                );
            }
        }
    }

    println!("\nRecommendations:");
    for rec in &briefing.recommendations {
        println!("  [{}] {}: {}", rec.priority, rec.title, rec.description);
        for action in &rec.actions {
            println!("    - {}", action);
        }
    }
}

fn print_profile(profile: &PlayerProfile) {
    println!("\n=== {} ===", profile.handle);
    if profile.provenance.is_synthetic() {
        println!("(placeholder data, provider fetch failed)");
    }
    println!("Platform: {} ({})", profile.platform, profile.platform_user_id);
    println!(
        "K/D {:.2} | HS {:.1}% | Win rate {:.1}% | {} matches",
        profile.stats.kd,
        profile.stats.headshot_pct,
        profile.stats.win_rate,
        profile.stats.matches_played
    );
    println!(
        "Rank: {} (rating {:.0}, top {:.0}%)",
        profile.rating.rank_name,
        profile.rating.rating,
        100.0 - profile.rating.percentile
    );
    println!(
        "Role: {} | Style: {}",
        profile.analysis.role, profile.analysis.play_style
    );
    if !profile.recent_matches.is_empty() {
        println!("Recent matches:");
        for m in profile.recent_matches.iter().take(5) {
            println!("  {} {} {} (K/D {:.2})", m.map, m.result, m.score, m.kd);
        }
    }
}
