//! REST API endpoints.
//!
//! Thin axum surface exposing briefing data to a presentation layer.
//! The engine returns plain data; rendering happens elsewhere.

pub mod state;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::briefing::UsageSnapshot;
use crate::models::{BriefingFailure, PlayerProfile, PreMatchBriefing};
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Briefing failed: {0}")]
    Briefing(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(_) => {
                let body = ErrorResponse {
                    error: ErrorDetail {
                        code: "BAD_REQUEST".to_string(),
                        message: self.to_string(),
                    },
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            // Briefing failures keep the documented shape with a fallback
            // strategy the caller can display as-is.
            ApiError::Briefing(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(BriefingFailure::new(message)),
            )
                .into_response(),
        }
    }
}

/// Request body for `POST /api/briefing`.
#[derive(Debug, Clone, Deserialize)]
pub struct BriefingRequest {
    #[serde(default)]
    pub own_ids: Vec<String>,
    #[serde(default)]
    pub enemy_ids: Vec<String>,
    #[serde(default)]
    pub map: String,
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/briefing", post(briefing))
        .route("/api/players/:id", get(player))
        .route("/api/usage", get(usage))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn briefing(
    State(state): State<AppState>,
    Json(request): Json<BriefingRequest>,
) -> Result<Json<PreMatchBriefing>, ApiError> {
    state
        .orchestrator
        .build_briefing(&request.own_ids, &request.enemy_ids, &request.map)
        .await
        .map(Json)
        .map_err(|e| ApiError::Briefing(e.to_string()))
}

async fn player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlayerProfile>, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::BadRequest("empty player id".to_string()));
    }
    Ok(Json(state.orchestrator.player_profile(&id).await))
}

async fn usage(State(state): State<AppState>) -> Json<UsageSnapshot> {
    Json(state.orchestrator.usage().snapshot())
}
