//! JD Parser: extracts weighted keywords, requirement lines, minimum years
//! and degree level from a raw job description. Pure heuristics, no LLM call.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::credentials::{detect_degree, DegreeLevel};
use crate::analysis::sections::bullet_lines;
use crate::analysis::skills::{contains_term, mentions_skill, VOCABULARY};

lazy_static::lazy_static! {
    static ref YEARS_RE: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s*\+?\s*(?:(?:-|–|to)\s*\d{1,2}\s*\+?\s*)?(?:years?|yrs?)\b"
    )
    .unwrap();
}

/// Region of the posting a line belongs to. Drives keyword position weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Title,
    Requirements,
    Responsibilities,
    Preferred,
    About,
    Other,
}

impl Zone {
    /// title=1.0, requirements=0.8, responsibilities=0.6, preferred/other=0.5, about=0.3
    pub fn weight(&self) -> f32 {
        match self {
            Zone::Title => 1.0,
            Zone::Requirements => 0.8,
            Zone::Responsibilities => 0.6,
            Zone::Preferred | Zone::Other => 0.5,
            Zone::About => 0.3,
        }
    }
}

// Checked in order: "preferred qualifications" must land in Preferred.
const ZONE_MARKERS: &[(Zone, &[&str])] = &[
    (
        Zone::Preferred,
        &["preferred", "nice to have", "nice-to-have", "bonus", "pluses"],
    ),
    (
        Zone::Requirements,
        &[
            "requirements",
            "required",
            "qualifications",
            "must have",
            "must-have",
            "what you need",
            "what you bring",
            "who you are",
        ],
    ),
    (
        Zone::Responsibilities,
        &[
            "responsibilities",
            "what you will do",
            "what you'll do",
            "you will",
            "the role",
            "duties",
        ],
    ),
    (
        Zone::About,
        &["about us", "about the company", "who we are", "benefits", "perks", "about"],
    ),
];

/// Non-vocabulary acronyms that are almost never skills.
const ACRONYM_STOPLIST: &[&str] = &[
    "US", "USA", "UK", "EU", "EEO", "PTO", "CEO", "CTO", "HR", "OR", "AND", "THE", "WE", "YOU",
    "OUR", "IT", "FAQ", "ASAP", "TBD", "AI",
];

/// A requirement line extracted from the JD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub text: String,
    pub is_required: bool,
}

/// A single keyword from the JD, weighted by position and frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    /// Number of lines that mention the keyword.
    pub frequency: u32,
    /// Highest zone weight among those lines.
    pub position_weight: f32,
    /// frequency * position_weight
    pub weighted_score: f32,
    /// True when the keyword comes from the skill vocabulary rather than
    /// acronym / camel-case detection.
    pub from_vocabulary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedJobDescription {
    pub title: Option<String>,
    pub requirements: Vec<Requirement>,
    pub keyword_inventory: Vec<KeywordEntry>,
    pub min_years: Option<u32>,
    pub degree: Option<DegreeLevel>,
}

/// Classifies a heading-like line (or the label of `Label: content`).
fn zone_for_label(label: &str) -> Option<Zone> {
    let lower = label.trim().trim_end_matches(':').to_lowercase();
    // bullets are content, never headings
    let starts_like_heading = lower.chars().next().map_or(false, char::is_alphanumeric);
    if !starts_like_heading || lower.split_whitespace().count() > 6 || lower.len() > 60 {
        return None;
    }
    ZONE_MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| lower.contains(m)))
        .map(|(zone, _)| *zone)
}

/// Splits a line into an optional zone switch and the content to scan.
fn classify_line(line: &str) -> (Option<Zone>, &str) {
    if let Some((label, rest)) = line.split_once(':') {
        let rest = rest.trim();
        if !rest.is_empty() {
            if let Some(zone) = zone_for_label(label) {
                return (Some(zone), rest);
            }
        }
    }
    match zone_for_label(line) {
        Some(zone) => (Some(zone), ""),
        None => (None, line),
    }
}

/// A line-level cue overrides the surrounding zone.
fn inline_zone(line_lower: &str, zone: Zone) -> Zone {
    if line_lower.contains("required") || line_lower.contains("must have") {
        Zone::Requirements
    } else if line_lower.contains("preferred")
        || line_lower.contains("nice to have")
        || line_lower.contains("a plus")
        || line_lower.contains("bonus")
    {
        Zone::Preferred
    } else {
        zone
    }
}

/// Tokens that look like tool names: acronyms (`SAP`, `HIPAA`), camel case
/// (`GraphQL`, `DynamoDB`) or alphanumerics (`S3`, `EC2`).
fn tool_like_tokens(line: &str) -> Vec<String> {
    line.split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '(' | ')' | '/' | ':'))
        .map(|t| t.trim_matches(|c: char| matches!(c, '.' | '-' | '"' | '\'')))
        .filter(|t| t.len() >= 2 && t.len() <= 20)
        .filter(|t| t.chars().next().map_or(false, |c| c.is_ascii_uppercase()))
        .filter(|t| t.chars().all(|c| c.is_ascii_alphanumeric()))
        .filter(|t| {
            let upper = t.chars().filter(|c| c.is_ascii_uppercase()).count();
            let digits = t.chars().filter(|c| c.is_ascii_digit()).count();
            let acronym = upper == t.len() && t.len() <= 6;
            let camel = upper >= 2 && upper < t.len();
            (acronym || camel || (digits > 0 && upper > 0)) && !ACRONYM_STOPLIST.contains(t)
        })
        .map(String::from)
        .collect()
}

pub fn parse_job_description(text: &str) -> ParsedJobDescription {
    let mut parsed = ParsedJobDescription {
        min_years: YEARS_RE
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok()),
        degree: detect_degree(text),
        ..Default::default()
    };

    // keyword -> (frequency, best weight, from_vocabulary)
    let mut counts: HashMap<String, (u32, f32, bool)> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    let mut record = |keyword: String, weight: f32, from_vocabulary: bool| {
        let entry = counts.entry(keyword.clone()).or_insert_with(|| {
            order.push(keyword);
            (0, 0.0, from_vocabulary)
        });
        entry.0 += 1;
        entry.1 = entry.1.max(weight);
    };

    let mut zone = Zone::Other;
    let mut seen_title = false;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let (switch, content) = classify_line(line);
        let line_zone = if let Some(z) = switch {
            zone = z;
            z
        } else if !seen_title && line.split_whitespace().count() <= 12 {
            parsed.title = Some(line.to_string());
            Zone::Title
        } else {
            zone
        };
        seen_title = true;

        if content.is_empty() {
            continue;
        }
        let content_lower = content.to_lowercase();
        let effective = if line_zone == Zone::Title {
            Zone::Title
        } else {
            inline_zone(&content_lower, line_zone)
        };

        if matches!(effective, Zone::Requirements | Zone::Preferred) {
            let text = bullet_lines(content)
                .into_iter()
                .next()
                .unwrap_or_else(|| content.to_string());
            parsed.requirements.push(Requirement {
                text,
                is_required: effective == Zone::Requirements,
            });
        }

        let mut vocabulary_hits: Vec<&str> = Vec::new();
        for skill in VOCABULARY {
            if mentions_skill(&content_lower, skill) {
                vocabulary_hits.push(skill.name);
                record(skill.name.to_string(), effective.weight(), true);
            }
        }
        if effective != Zone::About {
            for token in tool_like_tokens(content) {
                let lower = token.to_lowercase();
                let covered = vocabulary_hits.iter().any(|name| {
                    crate::analysis::skills::lookup(name)
                        .map(|s| s.aliases.iter().any(|a| contains_term(a, &lower)))
                        .unwrap_or(false)
                });
                if !covered {
                    record(token, effective.weight(), false);
                }
            }
        }
    }

    let mut inventory: Vec<KeywordEntry> = order
        .into_iter()
        .filter_map(|keyword| {
            let (frequency, weight, from_vocabulary) = counts.get(&keyword).copied()?;
            Some(KeywordEntry {
                weighted_score: frequency as f32 * weight,
                keyword,
                frequency,
                position_weight: weight,
                from_vocabulary,
            })
        })
        .collect();
    inventory.sort_by(|a, b| {
        b.weighted_score
            .partial_cmp(&a.weighted_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    parsed.keyword_inventory = inventory;

    parsed
}
