//! # Match Scout
//!
//! Pre-match strategic briefing engine for competitive CS2 teams.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (profiles, team analysis, threats, briefings)
//! - **fetch**: Provider HTTP client, TTL cache, and rate limiting
//! - **normalize**: Raw payloads → profiles, with role/style inference
//! - **analysis**: Team aggregation, threat detection, recommendations
//! - **briefing**: Orchestration of the full pipeline
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod analysis;
pub mod api;
pub mod briefing;
pub mod config;
pub mod fetch;
pub mod models;
pub mod normalize;

pub use models::*;
