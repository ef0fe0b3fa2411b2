//! Axum route handlers for the Match API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::matching::jd_parser::{parse_job_description, ParsedJobDescription};
use crate::matching::models::{MatchRequest, MatchResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseJobDescriptionRequest {
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ParseJobDescriptionResponse {
    pub success: bool,
    pub parsed: ParsedJobDescription,
}

/// POST /api/match-job
///
/// Scores resume text (typically `extracted_text` from `/api/analyze`)
/// against a job description.
#[instrument(skip_all)]
pub async fn handle_match_job(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    info!(
        "Matching resume ({} chars) against job description ({} chars), backend: {}",
        request.resume_text.len(),
        request.job_description.len(),
        state.matcher.backend()
    );

    let result = state
        .matcher
        .match_job(&request.resume_text, &request.job_description)
        .await?;

    info!(
        "Match complete: score={} matched={} missing={}",
        result.match_score,
        result.matched_skills.len(),
        result.missing_skills.len()
    );

    Ok(Json(MatchResponse {
        success: true,
        r#match: result,
    }))
}

/// POST /api/parse-job-description
///
/// Returns the heuristic JD parse. Useful for previewing what matching will
/// look for before running it.
pub async fn handle_parse_job_description(
    Json(request): Json<ParseJobDescriptionRequest>,
) -> Result<Json<ParseJobDescriptionResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    Ok(Json(ParseJobDescriptionResponse {
        success: true,
        parsed: parse_job_description(&request.job_description),
    }))
}
