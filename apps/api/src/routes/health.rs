use axum::{extract::State, Json};

use crate::models::evaluation::HealthResponse;
use crate::state::AppState;

/// GET /health
/// Reports service status and which embedder / skill strategy are active.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        // The pipeline is built before the listener starts, so a serving process
        // always has its model loaded.
        ml_model_loaded: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        embedder: state.pipeline.embedder_name().to_string(),
        skill_strategy: state.pipeline.skill_strategy().to_string(),
    })
}
