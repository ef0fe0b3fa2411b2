//! Job matcher backends: pluggable via the `JobMatcher` trait.
//!
//! Default: `KeywordJobMatcher` (JD parser + keyword fit, deterministic).
//! With `ANTHROPIC_API_KEY`: `LlmJobMatcher`, which merges model output over
//! the keyword result and falls back to it on any LLM failure.

use async_trait::async_trait;
use tracing::warn;

use crate::analysis::credentials::{detect_degree, DegreeLevel};
use crate::analysis::models::{clamp_score, ScoreBand};
use crate::analysis::sections::{split_sections, SectionKind};
use crate::analysis::skills::dedupe_case_insensitive;
use crate::analysis::timeline::{current_year, parse_timeline};
use crate::errors::AppError;
use crate::llm_client::{prompts::system_prompt, LlmClient};
use crate::matching::fit_scoring::{compute_keyword_fit, KeywordFit};
use crate::matching::jd_parser::{parse_job_description, ParsedJobDescription};
use crate::matching::models::{DimensionMatch, MatchResult, RawDimension, RawMatch};
use crate::matching::prompts::{build_match_prompt, MATCH_ROLE};

const KEYWORD_WEIGHT: f64 = 0.7;
const EXPERIENCE_WEIGHT: f64 = 0.2;
const EDUCATION_WEIGHT: f64 = 0.1;

#[async_trait]
pub trait JobMatcher: Send + Sync {
    async fn match_job(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<MatchResult, AppError>;

    /// Backend label for logs: "keyword" | "llm".
    fn backend(&self) -> &'static str;
}

pub struct KeywordJobMatcher;

#[async_trait]
impl JobMatcher for KeywordJobMatcher {
    async fn match_job(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<MatchResult, AppError> {
        Ok(keyword_match(resume_text, job_description, current_year()))
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

pub struct LlmJobMatcher {
    llm: LlmClient,
}

impl LlmJobMatcher {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl JobMatcher for LlmJobMatcher {
    async fn match_job(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<MatchResult, AppError> {
        let fallback = keyword_match(resume_text, job_description, current_year());

        let prompt = build_match_prompt(resume_text, job_description);
        match self
            .llm
            .call_json::<RawMatch>(&prompt, &system_prompt(MATCH_ROLE))
            .await
        {
            Ok(raw) => Ok(merge_match(raw, fallback)),
            Err(e) => {
                warn!("LLM job match failed, using keyword result: {e}");
                Ok(fallback)
            }
        }
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Text whose date ranges count as work history: the experience section, or
/// without one, everything outside education and certifications.
fn work_history_text(resume_text: &str) -> String {
    let parsed = split_sections(resume_text);
    if let Some(experience) = parsed.get(SectionKind::Experience) {
        return experience;
    }

    let mut text = parsed.header;
    for (kind, body) in parsed.sections {
        if matches!(kind, SectionKind::Education | SectionKind::Certifications) {
            continue;
        }
        text.push('\n');
        text.push_str(&body);
    }
    text
}

pub fn experience_match(
    resume_text: &str,
    min_years: Option<u32>,
    current_year: i32,
) -> DimensionMatch {
    let years = parse_timeline(&work_history_text(resume_text), current_year).total_years();
    match min_years {
        Some(required) if required > 0 && years < required => DimensionMatch {
            score: years * 100 / required,
            details: format!(
                "Only {years} years of dated experience found; the role asks for {required}+."
            ),
        },
        Some(required) => DimensionMatch {
            score: 100,
            details: format!(
                "{years} years of dated experience found; the role asks for {required}+."
            ),
        },
        None => DimensionMatch {
            score: 100,
            details: format!(
                "No minimum experience stated; {years} years of dated experience found."
            ),
        },
    }
}

pub fn education_match(resume_text: &str, required: Option<DegreeLevel>) -> DimensionMatch {
    let held = detect_degree(resume_text);
    match (required, held) {
        (None, _) => DimensionMatch {
            score: 100,
            details: "No degree requirement stated.".to_string(),
        },
        (Some(req), Some(have)) if have >= req => DimensionMatch {
            score: 100,
            details: format!("Holds a {}; the role asks for a {}.", have.label(), req.label()),
        },
        (Some(req), Some(have)) => DimensionMatch {
            score: 60,
            details: format!(
                "Holds a {} but the role asks for a {}.",
                have.label(),
                req.label()
            ),
        },
        (Some(req), None) => DimensionMatch {
            score: 30,
            details: format!("No degree found; the role asks for a {}.", req.label()),
        },
    }
}

/// Weighted blend of the dimensions the JD actually states. A JD with no
/// recognizable keywords, years, or degree scores 0.
fn blend_score(parsed: &ParsedJobDescription, keyword: u32, exp: u32, edu: u32) -> u32 {
    let mut weighted = 0.0;
    let mut weights = 0.0;
    if !parsed.keyword_inventory.is_empty() {
        weighted += KEYWORD_WEIGHT * keyword as f64;
        weights += KEYWORD_WEIGHT;
    }
    if parsed.min_years.is_some() {
        weighted += EXPERIENCE_WEIGHT * exp as f64;
        weights += EXPERIENCE_WEIGHT;
    }
    if parsed.degree.is_some() {
        weighted += EDUCATION_WEIGHT * edu as f64;
        weights += EDUCATION_WEIGHT;
    }
    if weights > 0.0 {
        (weighted / weights).round().clamp(0.0, 100.0) as u32
    } else {
        0
    }
}

pub fn keyword_match(resume_text: &str, job_description: &str, current_year: i32) -> MatchResult {
    let parsed = parse_job_description(job_description);
    let fit = compute_keyword_fit(resume_text, &parsed);
    let experience = experience_match(resume_text, parsed.min_years, current_year);
    let education = education_match(resume_text, parsed.degree);

    let match_score = blend_score(&parsed, fit.score, experience.score, education.score);
    let exp_short = parsed.min_years.is_some() && experience.score < 100;
    let edu_short = parsed.degree.is_some() && education.score < 100;

    let matched_skills: Vec<String> = fit
        .strong_matches
        .iter()
        .chain(&fit.partial_matches)
        .map(|m| m.keyword.clone())
        .collect();
    let missing_skills: Vec<String> = fit.gaps.iter().map(|g| g.keyword.clone()).collect();
    let keyword_gaps: Vec<String> = fit.partial_matches.iter().map(|m| m.keyword.clone()).collect();

    let summary = format!(
        "{} match at {match_score}/100: {} of {} job keywords found in the resume.",
        match ScoreBand::from_score(match_score) {
            ScoreBand::Good => "Strong",
            ScoreBand::Warning => "Moderate",
            ScoreBand::Bad => "Weak",
        },
        matched_skills.len(),
        parsed.keyword_inventory.len()
    );

    MatchResult {
        match_score,
        matched_skills,
        missing_skills,
        recommendations: build_recommendations(&fit, exp_short),
        action_items: build_action_items(&fit, &parsed, edu_short),
        strengths: build_strengths(&fit, &parsed, exp_short, edu_short, &experience, &education),
        weaknesses: build_weaknesses(&fit, exp_short, edu_short, &experience, &education),
        experience_match: Some(experience),
        education_match: Some(education),
        keyword_gaps,
        summary: Some(summary),
    }
}

fn build_recommendations(fit: &KeywordFit, exp_short: bool) -> Vec<String> {
    let mut recs = vec![fit.recommendation.clone()];
    for partial in fit.partial_matches.iter().take(2) {
        recs.push(format!(
            "Use the exact term \"{}\" so ATS keyword filters recognize it.",
            partial.keyword
        ));
    }
    for gap in fit.gaps.iter().take(3) {
        recs.push(match &gap.related_skill {
            Some(related) => format!(
                "If you have {} experience, add it; otherwise highlight transferable {related} work.",
                gap.keyword
            ),
            None => format!(
                "If you have used {}, add it to your skills section and back it with a bullet.",
                gap.keyword
            ),
        });
    }
    if exp_short {
        recs.push("Emphasize the scope and duration of your most relevant roles.".to_string());
    }
    recs
}

fn build_action_items(
    fit: &KeywordFit,
    parsed: &ParsedJobDescription,
    edu_short: bool,
) -> Vec<String> {
    let mut items: Vec<String> = fit
        .gaps
        .iter()
        .take(3)
        .map(|g| format!("Build a small project or complete a course that uses {}.", g.keyword))
        .collect();
    items.extend(
        fit.strong_matches
            .iter()
            .take(2)
            .map(|m| format!("Quantify an achievement that uses {}.", m.keyword)),
    );
    if edu_short {
        if let Some(degree) = parsed.degree {
            items.push(format!(
                "List certifications or coursework that offset the {} requirement.",
                degree.label()
            ));
        }
    }
    match &parsed.title {
        Some(title) => items.push(format!(
            "Mirror the job title \"{title}\" in your resume headline."
        )),
        None if items.is_empty() => items
            .push("Mirror the wording of the job description in your summary.".to_string()),
        None => {}
    }
    items
}

fn build_strengths(
    fit: &KeywordFit,
    parsed: &ParsedJobDescription,
    exp_short: bool,
    edu_short: bool,
    experience: &DimensionMatch,
    education: &DimensionMatch,
) -> Vec<String> {
    let mut strengths: Vec<String> = fit
        .strong_matches
        .iter()
        .take(3)
        .map(|m| {
            if m.evidence.is_empty() {
                format!("Lists {}", m.keyword)
            } else {
                format!("Direct experience with {}: \"{}\"", m.keyword, m.evidence)
            }
        })
        .collect();
    if parsed.min_years.is_some() && !exp_short {
        strengths.push(experience.details.clone());
    }
    if parsed.degree.is_some() && !edu_short {
        strengths.push(education.details.clone());
    }
    strengths
}

fn build_weaknesses(
    fit: &KeywordFit,
    exp_short: bool,
    edu_short: bool,
    experience: &DimensionMatch,
    education: &DimensionMatch,
) -> Vec<String> {
    let mut weaknesses: Vec<String> = fit
        .gaps
        .iter()
        .take(3)
        .map(|g| format!("No evidence of {} in the resume", g.keyword))
        .collect();
    if exp_short {
        weaknesses.push(experience.details.clone());
    }
    if edu_short {
        weaknesses.push(education.details.clone());
    }
    weaknesses
}

fn merge_dimension(raw: Option<RawDimension>, fallback: Option<DimensionMatch>) -> Option<DimensionMatch> {
    match (raw, fallback) {
        (Some(raw), fallback) => {
            let fallback_score = fallback.as_ref().map(|f| f.score).unwrap_or(50);
            let details = raw
                .details
                .filter(|d| !d.trim().is_empty())
                .or_else(|| fallback.map(|f| f.details))
                .unwrap_or_default();
            Some(DimensionMatch {
                score: clamp_score(raw.score, fallback_score),
                details,
            })
        }
        (None, fallback) => fallback,
    }
}

/// Merges model output over the keyword result: score clamped to 0..=100,
/// matched and missing skills disjoint, recommendations and action items
/// never empty.
pub fn merge_match(raw: RawMatch, fallback: MatchResult) -> MatchResult {
    let non_empty = |items: Vec<String>, fallback: Vec<String>| {
        let items = dedupe_case_insensitive(items);
        if items.is_empty() {
            fallback
        } else {
            items
        }
    };

    let matched_skills = non_empty(raw.matched_skills, fallback.matched_skills);
    let mut missing_skills = non_empty(raw.missing_skills, fallback.missing_skills);
    missing_skills.retain(|m| !matched_skills.iter().any(|s| s.eq_ignore_ascii_case(m)));

    MatchResult {
        match_score: clamp_score(raw.match_score, fallback.match_score),
        matched_skills,
        missing_skills,
        recommendations: non_empty(raw.recommendations, fallback.recommendations),
        action_items: non_empty(raw.action_items, fallback.action_items),
        experience_match: merge_dimension(raw.experience_match, fallback.experience_match),
        education_match: merge_dimension(raw.education_match, fallback.education_match),
        keyword_gaps: non_empty(raw.keyword_gaps, fallback.keyword_gaps),
        strengths: non_empty(raw.strengths, fallback.strengths),
        weaknesses: non_empty(raw.weaknesses, fallback.weaknesses),
        summary: raw
            .summary
            .filter(|s| !s.trim().is_empty())
            .or(fallback.summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::test_support::{message_body, spawn_stub};

    const RESUME: &str = "\
Jane Doe
jane@example.com

EXPERIENCE
Senior Engineer, Acme  2018 - 2024
• Built Rust services on AWS handling 2M requests/day
• Migrated Postgres to a sharded cluster

EDUCATION
BSc Computer Science, 2014

SKILLS
Rust, Python, Docker, PostgreSQL";

    const JD: &str = "\
Senior Rust Engineer

Requirements:
- 5+ years of Rust experience
- Bachelor's degree in Computer Science
- Experience with PostgreSQL and Kafka
";

    #[tokio::test]
    async fn test_llm_matcher_falls_back_to_keyword_result() {
        let (llm, _) = spawn_stub(vec![(503, "unavailable".to_string())]).await;
        let result = LlmJobMatcher::new(llm).match_job(RESUME, JD).await.unwrap();
        assert_eq!(result, keyword_match(RESUME, JD, current_year()));
    }

    #[tokio::test]
    async fn test_llm_matcher_clamps_model_score() {
        let answer = r#"{"matchScore": 180, "matchedSkills": ["Rust", "Kafka"], "missingSkills": ["kafka", "Go"]}"#;
        let (llm, _) = spawn_stub(vec![(200, message_body(answer))]).await;

        let result = LlmJobMatcher::new(llm).match_job(RESUME, JD).await.unwrap();
        assert_eq!(result.match_score, 100);
        assert_eq!(result.missing_skills, vec!["Go"]);
        assert!(!result.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_keyword_matcher_backend() {
        let result = KeywordJobMatcher.match_job(RESUME, JD).await.unwrap();
        assert!(result.match_score <= 100);
        assert_eq!(KeywordJobMatcher.backend(), "keyword");
    }

    #[test]
    fn test_keyword_match_splits_matched_and_missing() {
        let result = keyword_match(RESUME, JD, 2024);
        assert!(result.matched_skills.contains(&"Rust".to_string()));
        assert!(result.matched_skills.contains(&"PostgreSQL".to_string()));
        assert_eq!(result.missing_skills, vec!["Kafka"]);
        for skill in &result.matched_skills {
            assert!(!result.missing_skills.contains(skill));
        }
    }

    #[test]
    fn test_keyword_match_dimensions() {
        let result = keyword_match(RESUME, JD, 2024);
        let exp = result.experience_match.unwrap();
        assert_eq!(exp.score, 100);
        assert!(exp.details.starts_with("6 years"));
        assert_eq!(result.education_match.unwrap().score, 100);
    }

    #[test]
    fn test_keyword_match_lists_are_never_empty() {
        let result = keyword_match(RESUME, JD, 2024);
        assert!(!result.recommendations.is_empty());
        assert!(!result.action_items.is_empty());
        assert!(result
            .action_items
            .iter()
            .any(|a| a.contains("Senior Rust Engineer")));

        let bare = keyword_match("Jane Doe", "we are hiring", 2024);
        assert_eq!(bare.match_score, 0);
        assert!(!bare.recommendations.is_empty());
        assert!(!bare.action_items.is_empty());
    }

    #[test]
    fn test_experience_shortfall_scales_score() {
        let exp = experience_match("Engineer 2021 - 2023", Some(4), 2024);
        assert_eq!(exp.score, 50);
        assert!(exp.details.starts_with("Only 2 years"));
    }

    #[test]
    fn test_education_dates_are_not_work_experience() {
        let resume = "Jane Doe\nEDUCATION\nBSc Computer Science 2016 - 2020\nSKILLS\nRust";
        let exp = experience_match(resume, Some(3), 2024);
        assert_eq!(exp.score, 0);
        assert!(exp.details.starts_with("Only 0 years"));

        let exp = experience_match(RESUME, Some(3), 2024);
        assert_eq!(exp.score, 100);
        assert!(exp.details.starts_with("6 years"));
    }

    #[test]
    fn test_scrum_master_is_not_a_degree() {
        let resume = "Jane Doe\nCertified Scrum Master\nSKILLS\nAgile, Jira";
        let edu = education_match(resume, Some(DegreeLevel::Bachelor));
        assert_eq!(edu.score, 30);

        let jd = parse_job_description("Data Analyst\nRequirements:\n- Mastery of SQL and Python");
        assert_eq!(jd.degree, None);
    }

    #[test]
    fn test_education_levels() {
        assert_eq!(education_match("MSc Physics", Some(DegreeLevel::Bachelor)).score, 100);
        assert_eq!(education_match("BSc Physics", Some(DegreeLevel::Master)).score, 60);
        assert_eq!(education_match("Self taught", Some(DegreeLevel::Bachelor)).score, 30);
        assert_eq!(education_match("Self taught", None).score, 100);
    }

    #[test]
    fn test_merge_clamps_and_keeps_skills_disjoint() {
        let fallback = keyword_match(RESUME, JD, 2024);
        let raw = RawMatch {
            match_score: Some(140.0),
            matched_skills: vec!["Rust".into(), "Kafka".into()],
            missing_skills: vec!["kafka".into(), "Go".into()],
            ..Default::default()
        };
        let merged = merge_match(raw, fallback);
        assert_eq!(merged.match_score, 100);
        assert_eq!(merged.matched_skills, vec!["Rust", "Kafka"]);
        assert_eq!(merged.missing_skills, vec!["Go"]);
    }

    #[test]
    fn test_merge_empty_output_uses_fallback() {
        let fallback = keyword_match(RESUME, JD, 2024);
        let expected = fallback.clone();
        let merged = merge_match(RawMatch::default(), fallback);
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_merge_dimension_clamps_raw_score() {
        let merged = merge_dimension(
            Some(RawDimension {
                score: Some(-5.0),
                details: None,
            }),
            Some(DimensionMatch {
                score: 80,
                details: "fallback".into(),
            }),
        )
        .unwrap();
        assert_eq!(merged.score, 0);
        assert_eq!(merged.details, "fallback");
    }
}
