pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::builder::handlers as builder;
use crate::errors::AppError;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Analyze / match
        .route("/api/analyze", post(analysis::handle_analyze))
        .route("/api/match-job", post(matching::handle_match_job))
        .route(
            "/api/parse-job-description",
            post(matching::handle_parse_job_description),
        )
        // Resume builder
        .route("/api/tailor-resume", post(builder::handle_tailor_resume))
        .route("/api/improve-section", post(builder::handle_improve_section))
        .route("/api/generate-resume", post(builder::handle_generate_resume))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("No such endpoint".to_string())
}
