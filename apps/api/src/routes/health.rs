use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Resume Analyzer API",
        "status": "running"
    }))
}

/// GET /health
/// Returns liveness, whether LLM backends are configured, and the service version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "ai_configured": state.config.ai_configured(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
