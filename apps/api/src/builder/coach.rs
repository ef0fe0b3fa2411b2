//! Resume coach backends: tailoring and section improvement behind the
//! `ResumeCoach` trait. Same arrangement as analysis and matching: a
//! heuristic default and an LLM backend that falls back to it.

use async_trait::async_trait;
use tracing::warn;

use crate::analysis::skills::dedupe_case_insensitive;
use crate::analysis::timeline::current_year;
use crate::builder::improve::{improve_section, MAX_SUGGESTIONS};
use crate::builder::models::{
    ExperienceImprovement, RawSectionImprovement, RawTailoredResume, ResumeData,
    SectionImprovement, TailoredResume,
};
use crate::builder::prompts::{build_improve_prompt, build_tailor_prompt, COACH_ROLE};
use crate::builder::tailor::tailor_resume;
use crate::errors::AppError;
use crate::llm_client::{prompts::system_prompt, LlmClient};

#[async_trait]
pub trait ResumeCoach: Send + Sync {
    async fn tailor(
        &self,
        data: &ResumeData,
        job_description: &str,
    ) -> Result<TailoredResume, AppError>;

    async fn improve(
        &self,
        section_text: &str,
        section_type: &str,
    ) -> Result<SectionImprovement, AppError>;

    fn backend(&self) -> &'static str;
}

pub struct HeuristicCoach;

#[async_trait]
impl ResumeCoach for HeuristicCoach {
    async fn tailor(
        &self,
        data: &ResumeData,
        job_description: &str,
    ) -> Result<TailoredResume, AppError> {
        Ok(tailor_resume(data, job_description, current_year()))
    }

    async fn improve(
        &self,
        section_text: &str,
        section_type: &str,
    ) -> Result<SectionImprovement, AppError> {
        Ok(improve_section(section_text, section_type))
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

pub struct LlmCoach {
    llm: LlmClient,
}

impl LlmCoach {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeCoach for LlmCoach {
    async fn tailor(
        &self,
        data: &ResumeData,
        job_description: &str,
    ) -> Result<TailoredResume, AppError> {
        let fallback = tailor_resume(data, job_description, current_year());

        let resume_json = serde_json::to_string_pretty(data)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize resume data: {e}")))?;
        let prompt = build_tailor_prompt(&resume_json, job_description);

        match self
            .llm
            .call_json::<RawTailoredResume>(&prompt, &system_prompt(COACH_ROLE))
            .await
        {
            Ok(raw) => Ok(merge_tailored(raw, fallback)),
            Err(e) => {
                warn!("LLM tailoring failed, using heuristic suggestions: {e}");
                Ok(fallback)
            }
        }
    }

    async fn improve(
        &self,
        section_text: &str,
        section_type: &str,
    ) -> Result<SectionImprovement, AppError> {
        let fallback = improve_section(section_text, section_type);

        let prompt = build_improve_prompt(section_text, section_type);
        match self
            .llm
            .call_json::<RawSectionImprovement>(&prompt, &system_prompt(COACH_ROLE))
            .await
        {
            Ok(raw) => Ok(merge_improvement(raw, fallback)),
            Err(e) => {
                warn!("LLM section improvement failed, using heuristic variants: {e}");
                Ok(fallback)
            }
        }
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn or_fallback(items: Vec<String>, fallback: Vec<String>) -> Vec<String> {
    let items = dedupe_case_insensitive(items);
    if items.is_empty() {
        fallback
    } else {
        items
    }
}

/// Merges model output over the heuristic suggestions. Improvements without
/// both an original and an improved line are dropped.
pub fn merge_tailored(raw: RawTailoredResume, fallback: TailoredResume) -> TailoredResume {
    let improvements: Vec<ExperienceImprovement> = raw
        .experience_improvements
        .into_iter()
        .filter_map(|imp| {
            Some(ExperienceImprovement {
                original: non_blank(imp.original)?,
                improved: non_blank(imp.improved)?,
                reason: non_blank(imp.reason).unwrap_or_default(),
            })
        })
        .collect();

    TailoredResume {
        tailored_summary: non_blank(raw.tailored_summary).unwrap_or(fallback.tailored_summary),
        keywords_to_add: or_fallback(raw.keywords_to_add, fallback.keywords_to_add),
        experience_improvements: if improvements.is_empty() {
            fallback.experience_improvements
        } else {
            improvements
        },
        skills_to_highlight: or_fallback(raw.skills_to_highlight, fallback.skills_to_highlight),
        additional_sections: or_fallback(raw.additional_sections, fallback.additional_sections),
        overall_strategy: non_blank(raw.overall_strategy).unwrap_or(fallback.overall_strategy),
    }
}

/// At most three suggestions, never an empty list when the heuristic had any.
pub fn merge_improvement(raw: RawSectionImprovement, fallback: SectionImprovement) -> SectionImprovement {
    let mut suggestions = or_fallback(raw.suggestions, fallback.suggestions);
    suggestions.truncate(MAX_SUGGESTIONS);
    SectionImprovement {
        suggestions,
        tips: or_fallback(raw.tips, fallback.tips),
    }
}
