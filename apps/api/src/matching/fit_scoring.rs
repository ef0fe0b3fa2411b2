//! Keyword fit: measures how well resume text covers a parsed job description.
//!
//! Algorithm:
//! 1. For each keyword in `ParsedJobDescription.keyword_inventory`:
//!    - whole-word mention (any known spelling) → strength 1.0
//!    - loose mention (ambiguous name, or embedded in a longer word) → 0.6
//!    - no mention → 0.0
//! 2. score = Σ(strength × weighted_score) / Σ(weighted_score) × 100
//! 3. Classify: strong (≥0.8), partial (0.4–0.79), gap (<0.4)

use serde::{Deserialize, Serialize};

use crate::analysis::skills::{contains_term, extract_skills, lookup, mentions_skill};
use crate::matching::jd_parser::{KeywordEntry, ParsedJobDescription};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitMatch {
    pub keyword: String,
    /// Resume line that mentions the keyword.
    pub evidence: String,
    pub strength: f32,
}

/// A JD keyword the resume does not cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub keyword: String,
    pub jd_frequency: u32,
    pub weighted_score: f32,
    /// A related skill the resume already lists, if any.
    pub related_skill: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordFit {
    pub score: u32,
    pub strong_matches: Vec<FitMatch>,
    pub partial_matches: Vec<FitMatch>,
    pub gaps: Vec<Gap>,
    pub recommendation: String,
}

const EVIDENCE_MAX_CHARS: usize = 80;

fn keyword_strength(resume_lower: &str, entry: &KeywordEntry) -> f32 {
    let keyword = entry.keyword.to_lowercase();
    let exact = match lookup(&entry.keyword).filter(|_| entry.from_vocabulary) {
        Some(skill) => mentions_skill(resume_lower, skill),
        None => contains_term(resume_lower, &keyword),
    };
    if exact {
        1.0
    } else if contains_term(resume_lower, &keyword)
        || (keyword.chars().count() >= 4 && resume_lower.contains(&keyword))
    {
        0.6
    } else {
        0.0
    }
}

/// First resume line mentioning the keyword or one of its spellings.
fn find_evidence(resume_text: &str, keyword: &str) -> String {
    let mut needles = vec![keyword.to_lowercase()];
    if let Some(skill) = lookup(keyword) {
        needles.extend(skill.aliases.iter().map(|a| a.to_string()));
    }
    resume_text
        .lines()
        .map(str::trim)
        .find(|line| {
            let lower = line.to_lowercase();
            needles.iter().any(|n| lower.contains(n.as_str()))
        })
        .map(|line| line.chars().take(EVIDENCE_MAX_CHARS).collect())
        .unwrap_or_default()
}

/// A resume skill in the same category as a missing vocabulary keyword.
fn related_skill(resume_skills: &[String], keyword: &str) -> Option<String> {
    let category = lookup(keyword)?.category;
    resume_skills
        .iter()
        .find(|s| lookup(s).map_or(false, |skill| skill.category == category))
        .cloned()
}

pub fn compute_keyword_fit(resume_text: &str, parsed_jd: &ParsedJobDescription) -> KeywordFit {
    let keywords = &parsed_jd.keyword_inventory;

    if keywords.is_empty() {
        return KeywordFit {
            score: 0,
            strong_matches: vec![],
            partial_matches: vec![],
            gaps: vec![],
            recommendation: "No recognizable keywords in the job description, so keyword fit \
                could not be scored."
                .to_string(),
        };
    }

    let resume_lower = resume_text.to_lowercase();
    let resume_skills = extract_skills(resume_text);

    let mut strong_matches = Vec::new();
    let mut partial_matches = Vec::new();
    let mut gaps = Vec::new();

    let mut total_weighted = 0.0_f32;
    let mut total_score = 0.0_f32;

    for kw_entry in keywords {
        total_weighted += kw_entry.weighted_score;

        let strength = keyword_strength(&resume_lower, kw_entry);
        total_score += strength * kw_entry.weighted_score;

        if strength >= 0.4 {
            let fit_match = FitMatch {
                keyword: kw_entry.keyword.clone(),
                evidence: find_evidence(resume_text, &kw_entry.keyword),
                strength,
            };
            if strength >= 0.8 {
                strong_matches.push(fit_match);
            } else {
                partial_matches.push(fit_match);
            }
        } else {
            gaps.push(Gap {
                keyword: kw_entry.keyword.clone(),
                jd_frequency: kw_entry.frequency,
                weighted_score: kw_entry.weighted_score,
                related_skill: related_skill(&resume_skills, &kw_entry.keyword),
            });
        }
    }

    let score = if total_weighted > 0.0 {
        ((total_score / total_weighted) * 100.0).round().clamp(0.0, 100.0) as u32
    } else {
        0
    };

    KeywordFit {
        score,
        recommendation: build_recommendation(score, &gaps),
        strong_matches,
        partial_matches,
        gaps,
    }
}

/// Builds a human-readable recommendation string from score and gaps.
pub fn build_recommendation(score: u32, gaps: &[Gap]) -> String {
    let top_gaps: Vec<&str> = gaps.iter().take(3).map(|g| g.keyword.as_str()).collect();

    if score >= 80 {
        "Strong fit. Your resume directly covers the key requirements of this role.".to_string()
    } else if score >= 60 {
        format!(
            "Moderate fit ({score}/100). Add evidence for: {}.",
            top_gaps.join(", ")
        )
    } else {
        format!(
            "Low fit ({score}/100). Significant gaps: {}. Tailor your resume before applying.",
            top_gaps.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_parsed_jd(keywords: Vec<(&str, u32, f32, bool)>) -> ParsedJobDescription {
        ParsedJobDescription {
            keyword_inventory: keywords
                .into_iter()
                .map(|(kw, freq, pw, vocab)| KeywordEntry {
                    keyword: kw.to_string(),
                    frequency: freq,
                    position_weight: pw,
                    weighted_score: freq as f32 * pw,
                    from_vocabulary: vocab,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_whole_word_mentions_score_strong() {
        let resume = "SKILLS\nRust, distributed systems\nEXPERIENCE\n• Ran Postgres clusters";
        let jd = make_parsed_jd(vec![("Rust", 5, 0.8, true), ("PostgreSQL", 3, 0.6, true)]);

        let fit = compute_keyword_fit(resume, &jd);
        assert_eq!(fit.score, 100);
        assert_eq!(fit.strong_matches.len(), 2);
        assert!(fit.gaps.is_empty());
        assert_eq!(fit.strong_matches[1].evidence, "• Ran Postgres clusters");
    }

    #[test]
    fn test_ambiguous_name_scores_partial() {
        // "Go" only counts as exact under the "golang" spelling
        let resume = "Wrote backend services in Go and Python";
        let jd = make_parsed_jd(vec![("Go", 1, 1.0, true)]);

        let fit = compute_keyword_fit(resume, &jd);
        assert_eq!(fit.partial_matches.len(), 1);
        assert!(fit.strong_matches.is_empty());
        assert_eq!(fit.score, 60);
    }

    #[test]
    fn test_no_mention_creates_gap_with_related_skill() {
        let resume = "Skills: Python, Django";
        let jd = make_parsed_jd(vec![("Rust", 5, 0.8, true)]);

        let fit = compute_keyword_fit(resume, &jd);
        assert_eq!(fit.gaps.len(), 1);
        assert_eq!(fit.gaps[0].keyword, "Rust");
        assert_eq!(fit.gaps[0].jd_frequency, 5);
        assert_eq!(fit.gaps[0].related_skill.as_deref(), Some("Python"));
        assert_eq!(fit.score, 0);
    }

    #[test]
    fn test_non_vocabulary_keyword_matches_by_term() {
        let fit = compute_keyword_fit(
            "Migrated tables to DynamoDB",
            &make_parsed_jd(vec![("DynamoDB", 1, 0.8, false)]),
        );
        assert_eq!(fit.strong_matches.len(), 1);
    }

    #[test]
    fn test_empty_keywords_returns_zero_score() {
        let fit = compute_keyword_fit("Rust", &make_parsed_jd(vec![]));
        assert_eq!(fit.score, 0);
        assert!(fit.strong_matches.is_empty());
        assert!(fit.gaps.is_empty());
    }

    #[test]
    fn test_score_weighted_by_position() {
        let jd = make_parsed_jd(vec![("Rust", 3, 1.0, true), ("Kafka", 1, 1.0, true)]);
        let fit = compute_keyword_fit("Rust engineer", &jd);
        assert_eq!(fit.score, 75);
    }

    #[test]
    fn test_recommendation_bands() {
        let gaps = vec![Gap {
            keyword: "Kafka".to_string(),
            jd_frequency: 2,
            weighted_score: 1.6,
            related_skill: None,
        }];
        assert!(build_recommendation(85, &gaps).starts_with("Strong fit"));
        assert!(build_recommendation(65, &gaps).contains("Add evidence for: Kafka"));
        assert!(build_recommendation(30, &gaps).starts_with("Low fit (30/100)"));
    }
}
