//! Heuristic tailoring of structured resume data to a job description.

use crate::analysis::skills::{contains_term, dedupe_case_insensitive, lookup, mentions_skill};
use crate::analysis::timeline::parse_timeline;
use crate::analysis::validation::check_bullet;
use crate::builder::improve::strengthen_opening;
use crate::builder::models::{ExperienceImprovement, ResumeData, TailoredResume};
use crate::builder::render::render_plain_text;
use crate::matching::fit_scoring::compute_keyword_fit;
use crate::matching::jd_parser::parse_job_description;

const MAX_KEYWORDS_TO_ADD: usize = 8;
const MAX_IMPROVEMENTS: usize = 5;
const METRIC_PLACEHOLDER: &str = ", improving [metric] by [X]%";

/// True when the job description names the skill under any known spelling.
fn jd_mentions(jd_lower: &str, skill: &str) -> bool {
    match lookup(skill) {
        Some(known) => mentions_skill(jd_lower, known),
        None => contains_term(jd_lower, &skill.trim().to_lowercase()),
    }
}

/// Years covered by the experience entries' date ranges.
fn experience_years(data: &ResumeData, current_year: i32) -> u32 {
    let ranges: String = data
        .experience
        .iter()
        .map(|e| {
            let end = if e.end_date.trim().is_empty() {
                "Present"
            } else {
                e.end_date.as_str()
            };
            format!("{} - {end}\n", e.start_date)
        })
        .collect();
    parse_timeline(&ranges, current_year).total_years()
}

fn first_sentence(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let end = trimmed.find(". ").map(|i| i + 1).unwrap_or(trimmed.len());
    Some(&trimmed[..end])
}

pub fn tailor_resume(data: &ResumeData, job_description: &str, current_year: i32) -> TailoredResume {
    let parsed = parse_job_description(job_description);
    let fit = compute_keyword_fit(&render_plain_text(data), &parsed);
    let jd_lower = job_description.to_lowercase();

    let keywords_to_add: Vec<String> = fit
        .gaps
        .iter()
        .take(MAX_KEYWORDS_TO_ADD)
        .map(|g| g.keyword.clone())
        .collect();

    let mut skills_to_highlight: Vec<String> = data
        .skills
        .iter()
        .filter(|s| jd_mentions(&jd_lower, s))
        .cloned()
        .collect();
    skills_to_highlight.extend(fit.strong_matches.iter().map(|m| m.keyword.clone()));
    let skills_to_highlight = dedupe_case_insensitive(skills_to_highlight);

    let experience_improvements: Vec<ExperienceImprovement> = data
        .experience
        .iter()
        .flat_map(|e| e.achievements.iter())
        .filter(|a| !a.trim().is_empty())
        .filter_map(|achievement| {
            let check = check_bullet(achievement);
            if check.quantified && check.starts_with_action_verb {
                return None;
            }
            let mut improved = strengthen_opening(achievement, Some("Delivered"));
            let reason = match (check.starts_with_action_verb, check.quantified) {
                (false, false) => {
                    improved.push_str(METRIC_PLACEHOLDER);
                    "Opens weakly and has no measurable result."
                }
                (true, false) => {
                    improved.push_str(METRIC_PLACEHOLDER);
                    "No measurable result."
                }
                _ => "Opens without an action verb.",
            };
            Some(ExperienceImprovement {
                original: achievement.trim().to_string(),
                improved,
                reason: reason.to_string(),
            })
        })
        .take(MAX_IMPROVEMENTS)
        .collect();

    let tailored_summary = build_summary(data, &parsed.title, &skills_to_highlight, current_year);
    let additional_sections = suggest_sections(data, &jd_lower, &keywords_to_add);

    let overall_strategy = format!(
        "Your resume currently covers {}% of the weighted job keywords. {} {}",
        fit.score,
        fit.recommendation,
        match (skills_to_highlight.first(), keywords_to_add.first()) {
            (Some(skill), Some(gap)) => format!(
                "Lead with {skill}, and work {gap} into your experience bullets wherever it is truthful."
            ),
            (Some(skill), None) => format!("Lead with {skill} and quantify every bullet that uses it."),
            (None, Some(gap)) => format!(
                "Start by adding {gap} to your skills and a bullet that shows it in use."
            ),
            (None, None) => "Mirror the posting's wording in your summary and skills.".to_string(),
        }
    );

    TailoredResume {
        tailored_summary,
        keywords_to_add,
        experience_improvements,
        skills_to_highlight,
        additional_sections,
        overall_strategy,
    }
}

fn build_summary(
    data: &ResumeData,
    target_title: &Option<String>,
    skills: &[String],
    current_year: i32,
) -> String {
    let headline = data
        .experience
        .first()
        .map(|e| e.title.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or("Professional");
    let years = experience_years(data, current_year);

    let mut summary = if years > 0 {
        format!("{headline} with {years}+ years of experience")
    } else {
        headline.to_string()
    };
    if !skills.is_empty() {
        let top: Vec<&str> = skills.iter().take(3).map(String::as_str).collect();
        summary.push_str(&format!(" in {}", top.join(", ")));
    }
    if let Some(title) = target_title {
        summary.push_str(&format!(", targeting the {title} role"));
    }
    summary.push('.');
    if let Some(sentence) = first_sentence(&data.summary) {
        summary.push(' ');
        summary.push_str(sentence);
    }
    summary
}

fn suggest_sections(data: &ResumeData, jd_lower: &str, gaps: &[String]) -> Vec<String> {
    let mut sections = Vec::new();
    if data.certifications.is_empty() && jd_lower.contains("certif") {
        sections.push("Certifications".to_string());
    }
    if let Some(gap) = gaps.first() {
        sections.push(format!("Projects section demonstrating {gap}"));
    }
    if jd_lower.contains("portfolio") || jd_lower.contains("github") {
        sections.push("Portfolio or GitHub link".to_string());
    }
    if sections.is_empty() {
        sections.push("Key Achievements section highlighting your top 3 quantified results".to_string());
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::models::ExperienceEntry;

    const JD: &str = "\
Senior Rust Engineer

Requirements:
- 5+ years of Rust and PostgreSQL
- Experience with Kafka and Kubernetes
- AWS certification preferred
";

    fn data() -> ResumeData {
        ResumeData {
            name: "Jane Doe".into(),
            summary: "Backend engineer who likes hard problems. Based in Berlin.".into(),
            experience: vec![ExperienceEntry {
                title: "Backend Engineer".into(),
                company: "Acme".into(),
                start_date: "2018".into(),
                end_date: "2024".into(),
                achievements: vec![
                    "Responsible for the Rust billing service".into(),
                    "Reduced p99 latency by 40%".into(),
                    "Led the Postgres migration".into(),
                ],
            }],
            skills: vec!["Rust".into(), "PostgreSQL".into(), "Figma".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_keywords_to_add_are_jd_gaps() {
        let tailored = tailor_resume(&data(), JD, 2024);
        assert!(tailored.keywords_to_add.contains(&"Kafka".to_string()));
        assert!(tailored.keywords_to_add.contains(&"Kubernetes".to_string()));
        assert!(!tailored.keywords_to_add.contains(&"Rust".to_string()));
    }

    #[test]
    fn test_skills_to_highlight_are_named_by_jd() {
        let tailored = tailor_resume(&data(), JD, 2024);
        assert_eq!(tailored.skills_to_highlight[..2], ["Rust", "PostgreSQL"]);
        assert!(!tailored.skills_to_highlight.contains(&"Figma".to_string()));
    }

    #[test]
    fn test_weak_achievements_are_rewritten() {
        let tailored = tailor_resume(&data(), JD, 2024);
        let improvements = &tailored.experience_improvements;
        assert_eq!(improvements.len(), 2);
        assert_eq!(
            improvements[0].improved,
            "Owned the Rust billing service, improving [metric] by [X]%"
        );
        assert_eq!(improvements[1].original, "Led the Postgres migration");
        assert_eq!(improvements[1].reason, "No measurable result.");
    }

    #[test]
    fn test_summary_and_sections() {
        let tailored = tailor_resume(&data(), JD, 2024);
        assert_eq!(
            tailored.tailored_summary,
            "Backend Engineer with 6+ years of experience in Rust, PostgreSQL, targeting the \
             Senior Rust Engineer role. Backend engineer who likes hard problems."
        );
        assert_eq!(tailored.additional_sections[0], "Certifications");
        assert!(tailored.additional_sections[1].starts_with("Projects section demonstrating"));
        assert!(tailored.overall_strategy.contains("Lead with Rust"));
    }

    #[test]
    fn test_empty_resume_data_still_produces_guidance() {
        let tailored = tailor_resume(&ResumeData::default(), "Data Analyst\nSQL and Tableau", 2024);
        assert!(tailored.skills_to_highlight.is_empty());
        assert!(tailored.tailored_summary.starts_with("Professional, targeting the Data Analyst role."));
        assert!(!tailored.additional_sections.is_empty());
        assert!(!tailored.overall_strategy.is_empty());
    }
}
