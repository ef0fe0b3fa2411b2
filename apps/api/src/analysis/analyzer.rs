//! Resume analyzer backends: pluggable via the `ResumeAnalyzer` trait.
//!
//! Default: `HeuristicAnalyzer` (pure Rust, deterministic).
//! With `ANTHROPIC_API_KEY`: `LlmAnalyzer`, which falls back to the heuristic
//! report on any LLM failure and clamps whatever the model returns.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`, chosen at startup.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::warn;

use crate::analysis::models::{
    clamp_score, AnalysisResult, RawAnalysis, ScoreBand, SectionReport, REQUIRED_SECTIONS,
};
use crate::analysis::prompts::{build_analysis_prompt, ANALYSIS_ROLE};
use crate::analysis::scoring::score_resume;
use crate::analysis::skills::dedupe_case_insensitive;
use crate::analysis::timeline::current_year;
use crate::errors::AppError;
use crate::llm_client::{prompts::system_prompt, LlmClient};

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<AnalysisResult, AppError>;

    /// Backend label for logs: "heuristic" | "llm".
    fn backend(&self) -> &'static str;
}

pub struct HeuristicAnalyzer;

#[async_trait]
impl ResumeAnalyzer for HeuristicAnalyzer {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<AnalysisResult, AppError> {
        Ok(score_resume(resume_text, job_description, current_year()))
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

pub struct LlmAnalyzer {
    llm: LlmClient,
}

impl LlmAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeAnalyzer for LlmAnalyzer {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<AnalysisResult, AppError> {
        let fallback = score_resume(resume_text, job_description, current_year());

        let prompt = build_analysis_prompt(resume_text, job_description);
        match self
            .llm
            .call_json::<RawAnalysis>(&prompt, &system_prompt(ANALYSIS_ROLE))
            .await
        {
            Ok(raw) => Ok(merge_analysis(raw, fallback)),
            Err(e) => {
                warn!("LLM analysis failed, using heuristic report: {e}");
                Ok(fallback)
            }
        }
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Merges model output over the heuristic report so that every invariant of
/// `AnalysisResult` holds: scores in 0..=100, all required sections present,
/// status consistent with score, no empty lists, and missing keywords disjoint
/// from extracted skills.
pub fn merge_analysis(raw: RawAnalysis, fallback: AnalysisResult) -> AnalysisResult {
    let mut sections: BTreeMap<String, SectionReport> = BTreeMap::new();
    for (name, section) in raw.sections {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        let fallback_section = fallback.sections.get(&key);
        let score = clamp_score(
            section.score,
            fallback_section.map(|s| s.score).unwrap_or(50),
        );
        let message = section
            .message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| fallback_section.map(|s| s.message.clone()))
            .unwrap_or_default();
        sections.insert(
            key,
            SectionReport {
                status: ScoreBand::from_score(score),
                message,
                score,
            },
        );
    }
    for name in REQUIRED_SECTIONS {
        if !sections.contains_key(*name) {
            if let Some(section) = fallback.sections.get(*name) {
                sections.insert(name.to_string(), section.clone());
            }
        }
    }

    let non_empty = |items: Vec<String>, fallback: Vec<String>| {
        let items = dedupe_case_insensitive(items);
        if items.is_empty() {
            fallback
        } else {
            items
        }
    };

    let extracted_skills = non_empty(raw.extracted_skills, fallback.extracted_skills);
    let mut missing_keywords = dedupe_case_insensitive(raw.missing_keywords);
    missing_keywords.retain(|k| !extracted_skills.iter().any(|s| s.eq_ignore_ascii_case(k)));

    AnalysisResult {
        overall_score: clamp_score(raw.overall_score, fallback.overall_score),
        ats_score: clamp_score(raw.ats_score, fallback.ats_score),
        content_score: clamp_score(raw.content_score, fallback.content_score),
        format_score: clamp_score(raw.format_score, fallback.format_score),
        sections,
        strengths: non_empty(raw.strengths, fallback.strengths),
        improvements: non_empty(raw.improvements, fallback.improvements),
        extracted_skills,
        missing_keywords,
        detailed_feedback: raw
            .detailed_feedback
            .filter(|f| !f.trim().is_empty())
            .or(fallback.detailed_feedback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::RawSection;
    use crate::llm_client::test_support::{message_body, spawn_stub};

    const RESUME: &str = "Jane Doe\njane@example.com\nEXPERIENCE\n• Cut build time by 40%\nSKILLS\nRust, Python";

    fn fallback() -> AnalysisResult {
        score_resume(
            "Jane Doe\njane@example.com\nSKILLS\nRust, Python",
            None,
            2024,
        )
    }

    #[tokio::test]
    async fn test_heuristic_analyzer_returns_required_sections() {
        let result = HeuristicAnalyzer
            .analyze("Jane Doe\nEXPERIENCE\n• Built 3 things", None)
            .await
            .unwrap();
        for name in REQUIRED_SECTIONS {
            assert!(result.sections.contains_key(*name));
        }
        assert_eq!(HeuristicAnalyzer.backend(), "heuristic");
    }

    #[tokio::test]
    async fn test_llm_failure_falls_back_to_heuristic_report() {
        let (llm, hits) = spawn_stub(vec![(500, "overloaded".to_string())]).await;
        let analyzer = LlmAnalyzer::new(llm);

        let result = analyzer.analyze(RESUME, None).await.unwrap();
        assert_eq!(result, score_resume(RESUME, None, current_year()));
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 3);
        assert_eq!(analyzer.backend(), "llm");
    }

    #[tokio::test]
    async fn test_llm_answer_is_clamped_and_completed() {
        let answer = "```json\n{\"overallScore\": 140, \"atsScore\": -5, \"contentScore\": 77, \
                      \"sections\": {\"skills\": {\"score\": 250, \"message\": \"Broad stack\"}}, \
                      \"strengths\": [\"Quantified impact\"]}\n```";
        let (llm, _) = spawn_stub(vec![(200, message_body(answer))]).await;

        let result = LlmAnalyzer::new(llm).analyze(RESUME, None).await.unwrap();
        assert_eq!(result.overall_score, 100);
        assert_eq!(result.ats_score, 0);
        assert_eq!(result.content_score, 77);
        assert_eq!(result.sections["skills"].score, 100);
        assert_eq!(result.sections["skills"].status, ScoreBand::Good);
        for name in REQUIRED_SECTIONS {
            assert!(result.sections.contains_key(*name), "missing {name}");
        }
        assert_eq!(result.strengths, vec!["Quantified impact"]);
        assert!(!result.improvements.is_empty());
    }

    #[test]
    fn test_merge_clamps_out_of_range_scores() {
        let raw = RawAnalysis {
            overall_score: Some(150.0),
            ats_score: Some(-20.0),
            content_score: Some(f64::NAN),
            ..Default::default()
        };
        let fb = fallback();
        let content = fb.content_score;
        let merged = merge_analysis(raw, fb);
        assert_eq!(merged.overall_score, 100);
        assert_eq!(merged.ats_score, 0);
        assert_eq!(merged.content_score, content);
    }

    #[test]
    fn test_merge_fills_missing_sections_from_fallback() {
        let mut sections = std::collections::HashMap::new();
        sections.insert(
            "Experience".to_string(),
            RawSection {
                score: Some(92.0),
                status: Some("error".to_string()),
                message: Some("Strong bullets".to_string()),
            },
        );
        let raw = RawAnalysis {
            sections,
            ..Default::default()
        };
        let merged = merge_analysis(raw, fallback());

        for name in REQUIRED_SECTIONS {
            assert!(merged.sections.contains_key(*name), "missing {name}");
        }
        // status follows the score, not the model's label
        assert_eq!(merged.sections["experience"].status, ScoreBand::Good);
        assert_eq!(merged.sections["experience"].message, "Strong bullets");
    }

    #[test]
    fn test_merge_keeps_keyword_sets_disjoint() {
        let raw = RawAnalysis {
            extracted_skills: vec!["Rust".to_string(), "rust".to_string()],
            missing_keywords: vec!["RUST".to_string(), "Kafka".to_string()],
            ..Default::default()
        };
        let merged = merge_analysis(raw, fallback());
        assert_eq!(merged.extracted_skills, vec!["Rust"]);
        assert_eq!(merged.missing_keywords, vec!["Kafka"]);
    }

    #[test]
    fn test_merge_empty_lists_use_fallback() {
        let fb = fallback();
        let strengths = fb.strengths.clone();
        let merged = merge_analysis(RawAnalysis::default(), fb);
        assert_eq!(merged.strengths, strengths);
        assert!(!merged.improvements.is_empty());
        assert!(merged.detailed_feedback.is_some());
    }
}
