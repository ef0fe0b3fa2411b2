//! Axum route handlers for the resume builder: tailoring, section
//! improvement and plain-text generation.

use axum::{extract::State, Json};
use tracing::{info, instrument};

use crate::builder::models::{
    GenerateResumeResponse, ImproveSectionRequest, ResumeData, SectionImprovement, TailorRequest,
    TailorResponse,
};
use crate::builder::render::render_plain_text;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/tailor-resume
#[instrument(skip_all)]
pub async fn handle_tailor_resume(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    info!(
        "Tailoring resume ({} experience entries, {} skills), backend: {}",
        request.resume_data.experience.len(),
        request.resume_data.skills.len(),
        state.coach.backend()
    );

    let tailored_resume = state
        .coach
        .tailor(&request.resume_data, &request.job_description)
        .await?;

    Ok(Json(TailorResponse {
        success: true,
        tailored_resume,
    }))
}

/// POST /api/improve-section
///
/// Returns up to three rewritten variants of one section plus tips.
#[instrument(skip_all)]
pub async fn handle_improve_section(
    State(state): State<AppState>,
    Json(request): Json<ImproveSectionRequest>,
) -> Result<Json<SectionImprovement>, AppError> {
    if request.section_text.trim().is_empty() {
        return Err(AppError::Validation(
            "section_text cannot be empty".to_string(),
        ));
    }
    let section_type = match request.section_type.trim() {
        "" => "general",
        other => other,
    };

    info!("Improving {section_type} section, backend: {}", state.coach.backend());

    let improvement = state
        .coach
        .improve(&request.section_text, section_type)
        .await?;

    Ok(Json(improvement))
}

/// POST /api/generate-resume
///
/// Echoes the resume data with a formatted plain-text rendering.
pub async fn handle_generate_resume(
    Json(data): Json<ResumeData>,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    if data.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let formatted = render_plain_text(&data);
    info!("Generated resume for {} ({} chars)", data.name, formatted.len());

    Ok(Json(GenerateResumeResponse {
        success: true,
        message: "Resume generated successfully".to_string(),
        data,
        formatted,
    }))
}
