//! Splits extracted resume text into named sections by heading detection.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl SectionKind {
    pub fn key(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
        }
    }
}

const HEADINGS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Summary,
        &[
            "summary",
            "professional summary",
            "profile",
            "professional profile",
            "objective",
            "career objective",
            "about me",
            "about",
        ],
    ),
    (
        SectionKind::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment",
            "employment history",
            "work history",
            "career history",
            "relevant experience",
        ],
    ),
    (
        SectionKind::Education,
        &[
            "education",
            "academic background",
            "education and training",
            "qualifications",
        ],
    ),
    (
        SectionKind::Skills,
        &[
            "skills",
            "technical skills",
            "core skills",
            "key skills",
            "core competencies",
            "competencies",
            "technologies",
            "skills and tools",
            "tools and technologies",
        ],
    ),
    (
        SectionKind::Projects,
        &["projects", "personal projects", "key projects", "selected projects"],
    ),
    (
        SectionKind::Certifications,
        &[
            "certifications",
            "certificates",
            "licenses and certifications",
            "certifications and licenses",
        ],
    ),
];

/// Resume text split into a header (everything before the first heading)
/// and the recognized sections, in document order.
#[derive(Debug, Clone, Default)]
pub struct ParsedResume {
    pub header: String,
    pub sections: Vec<(SectionKind, String)>,
}

impl ParsedResume {
    /// Body of a section. Repeated headings of the same kind are joined.
    pub fn get(&self, kind: SectionKind) -> Option<String> {
        let bodies: Vec<&str> = self
            .sections
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, body)| body.as_str())
            .collect();
        if bodies.is_empty() {
            None
        } else {
            Some(bodies.join("\n"))
        }
    }

    pub fn has(&self, kind: SectionKind) -> bool {
        self.sections.iter().any(|(k, _)| *k == kind)
    }

    pub fn heading_count(&self) -> usize {
        self.sections.len()
    }
}

/// Classifies a line as a section heading.
pub fn detect_heading(line: &str) -> Option<SectionKind> {
    let trimmed = line.trim().trim_end_matches(':').trim();
    if trimmed.is_empty() || trimmed.len() > 40 {
        return None;
    }

    let normalized: String = trimmed
        .to_lowercase()
        .replace('&', " and ")
        .chars()
        .map(|c| if c.is_alphabetic() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    HEADINGS
        .iter()
        .find(|(_, aliases)| aliases.contains(&normalized.as_str()))
        .map(|(kind, _)| *kind)
}

pub fn split_sections(text: &str) -> ParsedResume {
    let mut parsed = ParsedResume::default();
    let mut current: Option<SectionKind> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some(kind) = detect_heading(line) {
            flush(&mut parsed, current, &mut buffer);
            current = Some(kind);
            continue;
        }
        buffer.push(line);
    }
    flush(&mut parsed, current, &mut buffer);

    parsed
}

fn flush(parsed: &mut ParsedResume, current: Option<SectionKind>, buffer: &mut Vec<&str>) {
    let body = buffer.join("\n").trim().to_string();
    buffer.clear();
    match current {
        Some(kind) => parsed.sections.push((kind, body)),
        None => parsed.header = body,
    }
}

const BULLET_MARKERS: &[char] = &['•', '-', '*', '▪', '●', '◦', '–', '·', '➢', '►'];

/// Returns bullet lines with their markers stripped.
pub fn bullet_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| {
            let first = line.chars().next()?;
            if BULLET_MARKERS.contains(&first) {
                let rest = line[first.len_utf8()..].trim();
                (!rest.is_empty()).then(|| rest.to_string())
            } else {
                None
            }
        })
        .collect()
}

/// Achievement statements of a section: its bullets, or, for resumes written
/// without bullet markers, every line long enough to be a sentence.
pub fn statements(text: &str) -> Vec<String> {
    let bullets = bullet_lines(text);
    if !bullets.is_empty() {
        return bullets;
    }
    text.lines()
        .map(str::trim)
        .filter(|line| line.split_whitespace().count() >= 6)
        .map(String::from)
        .collect()
}
