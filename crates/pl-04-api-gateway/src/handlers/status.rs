use crate::domain::error::ApiError;
use crate::domain::types::HealthResponse;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        agent_ready: state.agent.is_ready(),
    })
}

/// `GET /metrics`
pub async fn metrics(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.metrics.to_json())
}

pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}
