//! Axum route handler for the Analyze API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::analysis::models::AnalyzeResponse;
use crate::errors::AppError;
use crate::pdf::{is_pdf, ExtractError, TextExtractor};
use crate::state::AppState;

/// The file part of an analyze upload.
struct Upload {
    filename: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

/// POST /api/analyze
///
/// Multipart fields: `file` (required, PDF) and `job_description` (optional).
/// Returns the analysis plus the extracted text, which callers reuse for
/// `/api/match-job`.
#[instrument(skip_all, fields(analysis_id))]
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut upload: Option<Upload> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                upload = Some(Upload {
                    filename,
                    content_type,
                    data,
                });
            }
            Some("job_description") => {
                let text = field.text().await?;
                job_description = Some(text).filter(|t| !t.trim().is_empty());
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    if !is_pdf(
        upload.filename.as_deref(),
        upload.content_type.as_deref(),
        &upload.data,
    ) {
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }

    let analysis_id = Uuid::new_v4();
    tracing::Span::current().record("analysis_id", tracing::field::display(analysis_id));
    let filename = upload.filename.unwrap_or_else(|| "resume.pdf".to_string());
    info!(
        "Analyzing {filename} ({} bytes, backend: {})",
        upload.data.len(),
        state.analyzer.backend()
    );

    let extracted_text = extract_text(state.extractor.clone(), upload.data).await?;

    let analysis = state
        .analyzer
        .analyze(&extracted_text, job_description.as_deref())
        .await?;

    info!(
        "Analysis complete: overall={} ats={} content={} format={}",
        analysis.overall_score, analysis.ats_score, analysis.content_score, analysis.format_score
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis_id,
        filename,
        extracted_text,
        analysis,
    }))
}

/// Runs extraction on the blocking pool. A panicking parser is reported as a
/// parse failure instead of taking the worker down.
async fn extract_text(extractor: Arc<dyn TextExtractor>, data: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || extractor.extract(&data))
        .await
        .map_err(|e| ExtractError::Parse(format!("extractor task failed: {e}")))??;

    if text.trim().is_empty() {
        return Err(ExtractError::NoText.into());
    }
    Ok(text)
}
