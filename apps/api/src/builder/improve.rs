//! Heuristic section improvement: rewrites weak openings, marks where a
//! metric is missing, and tightens filler.

use crate::analysis::sections::statements;
use crate::analysis::validation::{check_bullet, starts_with_action_verb, summarize_bullets};
use crate::builder::models::SectionImprovement;

/// Vague openings and the verb that replaces them. Longest phrases first so
/// "helped with" wins over "helped".
const OPENING_REWRITES: &[(&str, &str)] = &[
    ("was responsible for", "Owned"),
    ("responsible for", "Owned"),
    ("duties included", "Handled"),
    ("was involved in", "Drove"),
    ("involved in", "Drove"),
    ("participated in", "Contributed to"),
    ("helped with", "Contributed to"),
    ("helped to", "Helped"),
    ("assisted with", "Supported"),
    ("assisted in", "Supported"),
    ("tasked with", "Executed"),
    ("worked on", "Built"),
    ("helped", "Contributed to"),
    ("assisted", "Supported"),
];

const FILLER_WORDS: &[&str] = &["successfully", "various", "several", "really", "very", "basically"];

const METRIC_PLACEHOLDER: &str = ", improving [metric] by [X]%";

pub const MAX_SUGGESTIONS: usize = 3;
const MAX_TIPS: usize = 5;

/// Replaces a vague opening with an action verb, or prefixes `default_verb`
/// when the statement opens with something else that is not an action verb.
pub fn strengthen_opening(statement: &str, default_verb: Option<&str>) -> String {
    let trimmed = statement.trim().trim_end_matches('.');
    let lower = trimmed.to_lowercase();

    for (vague, verb) in OPENING_REWRITES {
        if lower.starts_with(vague) {
            let rest = trimmed.get(vague.len()..).unwrap_or_default().trim_start();
            if rest.is_empty() {
                return verb.to_string();
            }
            return format!("{verb} {rest}");
        }
    }

    if starts_with_action_verb(trimmed) {
        return capitalize(trimmed);
    }
    match default_verb {
        Some(verb) => format!("{verb} {}", lowercase_first(trimmed)),
        None => capitalize(trimmed),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first word unless it looks like an acronym or proper noun
/// with more capitals in it (`AWS`, `GraphQL`).
fn lowercase_first(text: &str) -> String {
    let first_word = text.split_whitespace().next().unwrap_or_default();
    if first_word.chars().filter(|c| c.is_uppercase()).count() > 1 {
        return text.to_string();
    }
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn remove_filler(text: &str) -> String {
    text.split_whitespace()
        .filter(|w| {
            let bare = w.trim_matches(|c: char| !c.is_alphabetic()).to_lowercase();
            !FILLER_WORDS.contains(&bare.as_str())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn default_verb_for(section_type: &str) -> Option<&'static str> {
    match section_type.trim().to_lowercase().as_str() {
        "experience" | "work experience" | "employment" => Some("Delivered"),
        "projects" | "project" => Some("Built"),
        _ => None,
    }
}

fn is_prose(section_type: &str) -> bool {
    matches!(
        section_type.trim().to_lowercase().as_str(),
        "summary" | "profile" | "objective" | "about"
    )
}

fn section_tip(section_type: &str) -> &'static str {
    match section_type.trim().to_lowercase().as_str() {
        "summary" | "profile" | "objective" | "about" => {
            "Keep the summary to 2 to 4 sentences that name your target role."
        }
        "skills" => "Group skills by category and mirror the job description's wording.",
        "experience" | "work experience" | "employment" => {
            "Order bullets by impact, most impressive first."
        }
        "education" => "Include graduation year and any relevant honors or coursework.",
        _ => "Keep each line focused on one accomplishment.",
    }
}

fn assemble(lines: &[String], prose: bool) -> String {
    if prose {
        lines
            .iter()
            .map(|l| format!("{}.", l.trim_end_matches('.')))
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        lines
            .iter()
            .map(|l| format!("• {l}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn improve_section(section_text: &str, section_type: &str) -> SectionImprovement {
    let mut lines = statements(section_text);
    if lines.is_empty() {
        lines = section_text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
    }
    let prose = is_prose(section_type);
    let verb = default_verb_for(section_type);

    let strengthened: Vec<String> = lines.iter().map(|l| strengthen_opening(l, verb)).collect();
    let with_metrics: Vec<String> = strengthened
        .iter()
        .map(|l| {
            if prose || check_bullet(l).quantified {
                l.clone()
            } else {
                format!("{l}{METRIC_PLACEHOLDER}")
            }
        })
        .collect();
    let concise: Vec<String> = strengthened.iter().map(|l| remove_filler(l)).collect();

    let mut suggestions: Vec<String> = Vec::new();
    for variant in [&strengthened, &with_metrics, &concise] {
        let text = assemble(variant, prose);
        if !text.is_empty() && !suggestions.contains(&text) {
            suggestions.push(text);
        }
    }
    suggestions.truncate(MAX_SUGGESTIONS);

    SectionImprovement {
        suggestions,
        tips: build_tips(&lines, section_type),
    }
}

fn build_tips(lines: &[String], section_type: &str) -> Vec<String> {
    let impact = summarize_bullets(lines);
    let mut tips = Vec::new();

    if impact.total > 0 && impact.quantified_ratio() < 0.5 {
        tips.push(
            "Add numbers to at least half of your statements: percentages, amounts, or time saved."
                .to_string(),
        );
    }
    if impact.total > 0 && impact.action_ratio() < 0.8 && !is_prose(section_type) {
        tips.push("Start each bullet with a strong action verb such as Led, Built or Reduced.".to_string());
    }
    if !impact.vague_terms.is_empty() {
        tips.push(format!(
            "Replace vague wording: {}.",
            impact.vague_terms.join(", ")
        ));
    }
    tips.push(section_tip(section_type).to_string());
    tips.push("Use the exact keywords from the job posting you are targeting.".to_string());
    tips.truncate(MAX_TIPS);
    tips
}
