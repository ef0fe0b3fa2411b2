//! Heuristic resume scoring: the deterministic backend behind `/api/analyze`.
//!
//! Scores:
//! - `atsScore`: parseable structure (standard headings, contact channels, no
//!   layout artifacts, enough text) blended with JD keyword coverage when a
//!   job description is supplied.
//! - `contentScore`: quantified achievements, action-verb openings, skill
//!   breadth, minus vague phrasing.
//! - `formatScore`: length window, bullet usage, line length, heading count.
//! - `overallScore = round(0.35·ats + 0.40·content + 0.25·format)`.

use std::collections::BTreeMap;

use crate::analysis::credentials::detect_degree;
use crate::analysis::models::{AnalysisResult, ScoreBand, SectionReport};
use crate::analysis::sections::{bullet_lines, split_sections, statements, ParsedResume, SectionKind};
use crate::analysis::skills::{dedupe_case_insensitive, extract_skills, HIGH_VALUE_KEYWORDS};
use crate::analysis::timeline::{parse_timeline, Timeline};
use crate::analysis::validation::{summarize_bullets, ImpactSummary};
use crate::pdf::contact::{extract_contact_info, ContactInfo};

const ATS_WEIGHT: f64 = 0.35;
const CONTENT_WEIGHT: f64 = 0.40;
const FORMAT_WEIGHT: f64 = 0.25;

const RECENCY_WINDOW_YEARS: i32 = 2;
const LONG_LINE_CHARS: usize = 120;
const MAX_LIST_ITEMS: usize = 5;
const MAX_MISSING_KEYWORDS: usize = 10;

/// Layout characters left behind by tables, text boxes and icon fonts.
const ARTIFACT_CHARS: &[char] = &['│', '┃', '■', '□', '\t', '\u{fffd}', '\u{f0b7}'];

/// Everything the scorers read, collected in one pass over the text.
#[derive(Debug, Clone)]
pub struct ResumeSignals {
    pub parsed: ParsedResume,
    pub contact: ContactInfo,
    pub word_count: usize,
    pub bullet_count: usize,
    pub impact: ImpactSummary,
    pub skills: Vec<String>,
    pub timeline: Timeline,
    pub long_line_ratio: f64,
    pub artifact_ratio: f64,
}

pub fn collect_signals(text: &str, current_year: i32) -> ResumeSignals {
    let parsed = split_sections(text);

    let mut achievement_text = parsed.get(SectionKind::Experience).unwrap_or_default();
    if let Some(projects) = parsed.get(SectionKind::Projects) {
        achievement_text.push('\n');
        achievement_text.push_str(&projects);
    }
    let impact = summarize_bullets(&statements(&achievement_text));

    let timeline_source = parsed
        .get(SectionKind::Experience)
        .unwrap_or_else(|| text.to_string());
    let timeline = parse_timeline(&timeline_source, current_year);

    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let long_lines = lines
        .iter()
        .filter(|l| l.chars().count() > LONG_LINE_CHARS)
        .count();
    let total_chars = text.chars().count();
    let artifacts = text.chars().filter(|c| ARTIFACT_CHARS.contains(c)).count();

    ResumeSignals {
        contact: extract_contact_info(text),
        word_count: text.split_whitespace().count(),
        bullet_count: bullet_lines(text).len(),
        impact,
        skills: extract_skills(text),
        timeline,
        long_line_ratio: fraction(long_lines, lines.len()),
        artifact_ratio: fraction(artifacts, total_chars),
        parsed,
    }
}

fn fraction(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

fn to_score(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Section scorers
// ────────────────────────────────────────────────────────────────────────────

pub fn score_contact(contact: &ContactInfo, header: &str) -> SectionReport {
    let mut score = 0;
    let mut missing = Vec::new();

    if !header.trim().is_empty() {
        score += 25;
    }
    match contact.email {
        Some(_) => score += 35,
        None => missing.push("email"),
    }
    match contact.phone {
        Some(_) => score += 25,
        None => missing.push("phone number"),
    }
    match contact.linkedin {
        Some(_) => score += 15,
        None => missing.push("LinkedIn URL"),
    }

    let message = if missing.is_empty() {
        "Email, phone and LinkedIn profile present".to_string()
    } else {
        format!("Missing {}", missing.join(", "))
    };
    SectionReport::new(score, message)
}

pub fn score_summary(parsed: &ParsedResume) -> SectionReport {
    let Some(summary) = parsed.get(SectionKind::Summary) else {
        return SectionReport::new(
            35,
            "No professional summary found; add 2-4 sentences at the top",
        );
    };

    match summary.split_whitespace().count() {
        0..=14 => SectionReport::new(55, "Summary is very short; expand it to 2-4 sentences"),
        15..=90 => SectionReport::new(90, "Concise professional summary present"),
        _ => SectionReport::new(68, "Summary is long; trim it to 2-4 sentences"),
    }
}

pub fn score_experience(signals: &ResumeSignals, current_year: i32) -> SectionReport {
    if !signals.parsed.has(SectionKind::Experience) {
        return SectionReport::new(25, "No experience section found");
    }

    let impact = &signals.impact;
    if impact.total == 0 {
        return SectionReport::new(45, "Experience listed without achievement bullets");
    }

    let recent = signals
        .timeline
        .is_recent(current_year, RECENCY_WINDOW_YEARS);
    let score = 45.0
        + 30.0 * impact.quantified_ratio()
        + 15.0 * impact.action_ratio()
        + if recent { 10.0 } else { 0.0 };

    let mut message = format!(
        "{} of {} achievements quantified",
        impact.quantified, impact.total
    );
    if !recent {
        message.push_str("; no role in the last two years");
    }
    SectionReport::new(to_score(score), message)
}

pub fn score_education(parsed: &ParsedResume) -> SectionReport {
    match parsed.get(SectionKind::Education) {
        None => SectionReport::new(40, "No education section found"),
        Some(body) if detect_degree(&body).is_some() => {
            SectionReport::new(90, "Degree and institution listed")
        }
        Some(_) => SectionReport::new(70, "Education listed but the degree is unclear"),
    }
}

pub fn score_skills(parsed: &ParsedResume, skills: &[String]) -> SectionReport {
    let count = skills.len();
    let base: u32 = match count {
        10.. => 95,
        6..=9 => 82,
        3..=5 => 65,
        1..=2 => 50,
        0 => 30,
    };

    if parsed.has(SectionKind::Skills) {
        SectionReport::new(base, format!("{count} recognized skills listed"))
    } else {
        SectionReport::new(
            base.saturating_sub(15),
            format!("No dedicated skills section; {count} skills found in the text"),
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate scorers
// ────────────────────────────────────────────────────────────────────────────

/// `jd_coverage` is the fraction of JD skills the resume mentions, when a JD
/// with recognizable skills was supplied.
pub fn ats_score(signals: &ResumeSignals, jd_coverage: Option<f64>) -> u32 {
    let mut structure: f64 = 100.0;

    for kind in [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
    ] {
        if !signals.parsed.has(kind) {
            structure -= 15.0;
        }
    }
    if signals.contact.email.is_none() {
        structure -= 15.0;
    }
    if signals.contact.phone.is_none() {
        structure -= 10.0;
    }
    if signals.artifact_ratio > 0.01 {
        structure -= 10.0;
    }
    if signals.word_count < 150 {
        structure -= 20.0;
    }
    let structure = structure.clamp(0.0, 100.0);

    match jd_coverage {
        Some(coverage) => to_score(0.7 * structure + 0.3 * coverage.clamp(0.0, 1.0) * 100.0),
        None => to_score(structure),
    }
}

pub fn content_score(signals: &ResumeSignals) -> u32 {
    let impact = &signals.impact;
    let vague_penalty = (3 * impact.vague_terms.len()).min(15) as f64;
    let no_statements_penalty = if impact.total == 0 { 10.0 } else { 0.0 };

    to_score(
        40.0 + 35.0 * impact.quantified_ratio() + 15.0 * impact.action_ratio()
            + signals.skills.len().min(10) as f64
            - vague_penalty
            - no_statements_penalty,
    )
}

pub fn format_score(signals: &ResumeSignals) -> u32 {
    let length = match signals.word_count {
        300..=1000 => 40,
        150..=299 | 1001..=1400 => 25,
        _ => 10,
    };
    let bullets = match signals.bullet_count {
        5.. => 25,
        1..=4 => 15,
        0 => 0,
    };
    let lines = if signals.long_line_ratio <= 0.1 { 20 } else { 10 };
    let headings = 5 * signals.parsed.heading_count().min(3) as u32;

    (length + bullets + lines + headings).min(100)
}

pub fn overall_score(ats: u32, content: u32, format: u32) -> u32 {
    to_score(ATS_WEIGHT * ats as f64 + CONTENT_WEIGHT * content as f64 + FORMAT_WEIGHT * format as f64)
}

// ────────────────────────────────────────────────────────────────────────────
// Full report
// ────────────────────────────────────────────────────────────────────────────

/// Scores a resume. `job_description`, when present, drives keyword coverage
/// and the missing-keyword list.
pub fn score_resume(text: &str, job_description: Option<&str>, current_year: i32) -> AnalysisResult {
    let signals = collect_signals(text, current_year);

    let mut sections = BTreeMap::new();
    sections.insert(
        "contact".to_string(),
        score_contact(&signals.contact, &signals.parsed.header),
    );
    sections.insert("summary".to_string(), score_summary(&signals.parsed));
    sections.insert(
        "experience".to_string(),
        score_experience(&signals, current_year),
    );
    sections.insert("education".to_string(), score_education(&signals.parsed));
    sections.insert(
        "skills".to_string(),
        score_skills(&signals.parsed, &signals.skills),
    );
    if signals.parsed.has(SectionKind::Projects) {
        sections.insert(
            "projects".to_string(),
            SectionReport::new(85, "Projects section adds concrete evidence"),
        );
    }
    if signals.parsed.has(SectionKind::Certifications) {
        sections.insert(
            "certifications".to_string(),
            SectionReport::new(90, "Certifications listed"),
        );
    }

    let jd_skills = job_description
        .filter(|jd| !jd.trim().is_empty())
        .map(extract_skills);
    let mut missing_keywords = absent_keywords(&signals.skills, jd_skills.as_deref());
    let jd_coverage = jd_skills
        .as_ref()
        .filter(|skills| !skills.is_empty())
        .map(|skills| 1.0 - missing_keywords.len() as f64 / skills.len() as f64);
    missing_keywords.truncate(MAX_MISSING_KEYWORDS);

    let ats = ats_score(&signals, jd_coverage);
    let content = content_score(&signals);
    let format = format_score(&signals);
    let overall = overall_score(ats, content, format);

    let strengths = build_strengths(&sections, &signals, ats);
    let improvements = build_improvements(&sections, &signals, jd_skills.is_some(), &missing_keywords);
    let detailed_feedback = build_feedback(overall, ats, content, format, &sections, jd_coverage);

    AnalysisResult {
        overall_score: overall,
        ats_score: ats,
        content_score: content,
        format_score: format,
        sections,
        strengths,
        improvements,
        extracted_skills: signals.skills,
        missing_keywords,
        detailed_feedback: Some(detailed_feedback),
    }
}

/// JD skills absent from the resume, or the general high-value keywords when
/// there is no JD. Never overlaps `resume_skills`.
pub fn missing_keywords(resume_skills: &[String], jd_skills: Option<&[String]>) -> Vec<String> {
    let mut missing = absent_keywords(resume_skills, jd_skills);
    missing.truncate(MAX_MISSING_KEYWORDS);
    missing
}

fn absent_keywords(resume_skills: &[String], jd_skills: Option<&[String]>) -> Vec<String> {
    let has = |k: &str| resume_skills.iter().any(|s| s.eq_ignore_ascii_case(k));

    let candidates: Vec<String> = match jd_skills {
        Some(jd) => jd.to_vec(),
        None => HIGH_VALUE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
    };

    let mut missing = dedupe_case_insensitive(candidates);
    missing.retain(|k| !has(k));
    missing
}

fn build_strengths(
    sections: &BTreeMap<String, SectionReport>,
    signals: &ResumeSignals,
    ats: u32,
) -> Vec<String> {
    let mut ranked: Vec<(&String, &SectionReport)> = sections
        .iter()
        .filter(|(_, s)| s.status == ScoreBand::Good)
        .collect();
    ranked.sort_by(|a, b| b.1.score.cmp(&a.1.score));

    let mut strengths: Vec<String> = ranked
        .into_iter()
        .filter_map(|(name, _)| match name.as_str() {
            "contact" => Some("Complete contact information makes you easy to reach".to_string()),
            "summary" => Some("Clear, concise professional summary".to_string()),
            "experience" => Some("Experience bullets show measurable results".to_string()),
            "education" => Some("Education credentials are clearly stated".to_string()),
            "skills" => Some(format!(
                "Broad skill set with {} recognized skills",
                signals.skills.len()
            )),
            "projects" => Some("Projects provide concrete evidence of your skills".to_string()),
            "certifications" => Some("Certifications add third-party validation".to_string()),
            _ => None,
        })
        .collect();

    if ats >= 80 {
        strengths.push("Structure is easy for ATS software to parse".to_string());
    }
    if strengths.is_empty() {
        strengths.push("Resume text is machine-readable, so ATS software can parse it".to_string());
    }
    strengths.truncate(MAX_LIST_ITEMS);
    strengths
}

fn build_improvements(
    sections: &BTreeMap<String, SectionReport>,
    signals: &ResumeSignals,
    has_jd: bool,
    missing_keywords: &[String],
) -> Vec<String> {
    let mut ranked: Vec<(&String, &SectionReport)> = sections
        .iter()
        .filter(|(_, s)| s.status != ScoreBand::Good)
        .collect();
    ranked.sort_by(|a, b| a.1.score.cmp(&b.1.score));

    let mut improvements: Vec<String> = ranked
        .into_iter()
        .filter_map(|(name, _)| match name.as_str() {
            "contact" => {
                Some("Add complete contact details: email, phone and a LinkedIn URL".to_string())
            }
            "summary" => Some("Add or tighten a 2-4 sentence professional summary".to_string()),
            "experience" => Some(
                "Quantify achievements with numbers, percentages or time saved".to_string(),
            ),
            "education" => Some("List your degree, institution and graduation year".to_string()),
            "skills" => Some("Add a dedicated skills section with the tools you use".to_string()),
            _ => None,
        })
        .collect();

    if let Some(term) = signals.impact.vague_terms.first() {
        improvements.push(format!(
            "Replace vague phrases like '{term}' with strong action verbs"
        ));
    }
    if signals.word_count < 300 {
        improvements.push("Expand the resume; it is under 300 words".to_string());
    } else if signals.word_count > 1000 {
        improvements.push("Trim the resume to two pages or less".to_string());
    }
    if has_jd && !missing_keywords.is_empty() {
        let top: Vec<&str> = missing_keywords.iter().take(3).map(String::as_str).collect();
        improvements.push(format!(
            "Work these job keywords into your resume: {}",
            top.join(", ")
        ));
    }
    if improvements.is_empty() {
        improvements.push("Tailor your keywords to each job description you apply for".to_string());
    }

    let mut improvements = dedupe_case_insensitive(improvements);
    improvements.truncate(MAX_LIST_ITEMS);
    improvements
}

fn build_feedback(
    overall: u32,
    ats: u32,
    content: u32,
    format: u32,
    sections: &BTreeMap<String, SectionReport>,
    jd_coverage: Option<f64>,
) -> String {
    let best = sections.iter().max_by_key(|(_, s)| s.score);
    let worst = sections.iter().min_by_key(|(_, s)| s.score);

    let mut feedback = format!(
        "Overall score {overall}/100 ({}). The resume scores {ats} for ATS compatibility, \
         {content} for content and {format} for formatting.",
        ScoreBand::from_score(overall).label()
    );
    if let (Some((best_name, best)), Some((worst_name, worst))) = (best, worst) {
        if best_name != worst_name {
            feedback.push_str(&format!(
                " The strongest section is {best_name} ({}); the weakest is {worst_name} ({}): {}.",
                best.score,
                worst.score,
                worst.message.to_lowercase()
            ));
        }
    }
    if let Some(coverage) = jd_coverage {
        feedback.push_str(&format!(
            " It covers {}% of the skills named in the job description.",
            (coverage * 100.0).round() as u32
        ));
    }
    feedback
}
