//! HTTP client for the analyzer API, used by `resume-cli`.
//!
//! Preflight checks run before any request is built: a non-PDF file, a
//! missing resume, or a blank job description never reach the network.
//! Every transport, status or decoding failure collapses into one generic
//! error per operation; the cause is only logged.

pub mod render;

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::models::AnalyzeResponse;
use crate::matching::models::{MatchResponse, MatchResult};
use crate::pdf::PDF_MAGIC;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const REQUEST_TIMEOUT_SECS: u64 = 180;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Please upload a PDF file")]
    NotPdf,

    #[error("Please analyze a resume first")]
    MissingResume,

    #[error("Please enter a job description")]
    EmptyJobDescription,

    #[error("Analysis failed")]
    AnalysisFailed,

    #[error("Matching failed")]
    MatchingFailed,

    #[error("failed to build HTTP client: {0}")]
    Setup(#[from] reqwest::Error),
}

/// Reads `path` and checks it is a PDF by extension and magic bytes.
pub async fn read_pdf(path: &Path) -> Result<Vec<u8>, ClientError> {
    let has_pdf_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !has_pdf_extension {
        return Err(ClientError::NotPdf);
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        debug!("cannot read {}: {e}", path.display());
        ClientError::NotPdf
    })?;
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ClientError::NotPdf);
    }
    Ok(bytes)
}

#[derive(Clone)]
pub struct AnalyzerClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalyzerClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Uploads a PDF to `/api/analyze`.
    pub async fn analyze_file(
        &self,
        path: &Path,
        job_description: Option<&str>,
    ) -> Result<AnalyzeResponse, ClientError> {
        let bytes = read_pdf(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume.pdf")
            .to_string();

        self.send_analyze(bytes, filename, job_description)
            .await
            .map_err(|e| {
                warn!("analyze request failed: {e}");
                ClientError::AnalysisFailed
            })
            .and_then(|response| {
                if response.success {
                    Ok(response)
                } else {
                    warn!("analyze response reported success=false");
                    Err(ClientError::AnalysisFailed)
                }
            })
    }

    async fn send_analyze(
        &self,
        bytes: Vec<u8>,
        filename: String,
        job_description: Option<&str>,
    ) -> Result<AnalyzeResponse, reqwest::Error> {
        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str("application/pdf")?;
        let mut form = Form::new().part("file", part);
        if let Some(jd) = job_description.filter(|jd| !jd.trim().is_empty()) {
            form = form.text("job_description", jd.to_string());
        }

        self.http
            .post(self.url("/api/analyze"))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json::<AnalyzeResponse>()
            .await
    }

    /// Posts resume text and a job description to `/api/match-job`.
    pub async fn match_job(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<MatchResult, ClientError> {
        if resume_text.trim().is_empty() {
            return Err(ClientError::MissingResume);
        }
        if job_description.trim().is_empty() {
            return Err(ClientError::EmptyJobDescription);
        }

        let response = self
            .send_match(resume_text, job_description)
            .await
            .map_err(|e| {
                warn!("match request failed: {e}");
                ClientError::MatchingFailed
            })?;
        if !response.success {
            warn!("match response reported success=false");
            return Err(ClientError::MatchingFailed);
        }
        Ok(response.r#match)
    }

    async fn send_match(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<MatchResponse, reqwest::Error> {
        self.http
            .post(self.url("/api/match-job"))
            .json(&serde_json::json!({
                "resume_text": resume_text,
                "job_description": job_description,
            }))
            .send()
            .await?
            .error_for_status()?
            .json::<MatchResponse>()
            .await
    }
}
