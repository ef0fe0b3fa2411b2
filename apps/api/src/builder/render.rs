//! Plain-text rendering of `ResumeData`. Single-column, standard headings, no
//! tables, so the output survives any ATS parser.

use crate::builder::models::{ExperienceEntry, ResumeData};

const RULE_WIDTH: usize = 60;

fn heading(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
}

/// `"2019 - Present"`, `"2019"`, or empty.
fn date_range(entry: &ExperienceEntry) -> String {
    let start = entry.start_date.trim();
    let end = entry.end_date.trim();
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} - {end}"),
        (false, true) => format!("{start} - Present"),
        (true, false) => end.to_string(),
        (true, true) => String::new(),
    }
}

fn join_non_empty<'a>(parts: impl IntoIterator<Item = &'a str>, sep: &str) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

pub fn render_plain_text(data: &ResumeData) -> String {
    let mut out = String::new();

    if !data.name.trim().is_empty() {
        out.push_str(&data.name.trim().to_uppercase());
        out.push('\n');
    }
    let contact = join_non_empty(
        [
            data.email.as_str(),
            data.phone.as_str(),
            data.location.as_deref().unwrap_or_default(),
        ],
        " | ",
    );
    if !contact.is_empty() {
        out.push_str(&contact);
        out.push('\n');
    }

    if !data.summary.trim().is_empty() {
        heading(&mut out, "PROFESSIONAL SUMMARY");
        out.push_str(data.summary.trim());
        out.push('\n');
    }

    if !data.experience.is_empty() {
        heading(&mut out, "EXPERIENCE");
        for (i, entry) in data.experience.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let role = join_non_empty([entry.title.as_str(), entry.company.as_str()], ", ");
            let dates = date_range(entry);
            out.push_str(&join_non_empty([role.as_str(), dates.as_str()], "  "));
            out.push('\n');
            for achievement in entry.achievements.iter().filter(|a| !a.trim().is_empty()) {
                out.push_str("• ");
                out.push_str(achievement.trim());
                out.push('\n');
            }
        }
    }

    if !data.education.is_empty() {
        heading(&mut out, "EDUCATION");
        for entry in &data.education {
            let line = join_non_empty(
                [entry.degree.as_str(), entry.institution.as_str(), entry.year.as_str()],
                ", ",
            );
            if !line.is_empty() {
                out.push_str(&line);
                out.push('\n');
            }
        }
    }

    let skills = join_non_empty(data.skills.iter().map(String::as_str), ", ");
    if !skills.is_empty() {
        heading(&mut out, "SKILLS");
        out.push_str(&skills);
        out.push('\n');
    }

    if data.certifications.iter().any(|c| !c.trim().is_empty()) {
        heading(&mut out, "CERTIFICATIONS");
        for cert in data.certifications.iter().filter(|c| !c.trim().is_empty()) {
            out.push_str("• ");
            out.push_str(cert.trim());
            out.push('\n');
        }
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sections::{split_sections, SectionKind};
    use crate::builder::models::EducationEntry;

    fn sample() -> ResumeData {
        ResumeData {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: "555-123-4567".into(),
            location: Some("Berlin".into()),
            summary: "Backend engineer focused on Rust.".into(),
            experience: vec![ExperienceEntry {
                title: "Senior Engineer".into(),
                company: "Acme".into(),
                start_date: "2019".into(),
                end_date: String::new(),
                achievements: vec!["Cut p99 latency by 40%".into(), "  ".into()],
            }],
            education: vec![EducationEntry {
                degree: "BSc Computer Science".into(),
                institution: "TU Berlin".into(),
                year: "2014".into(),
            }],
            skills: vec!["Rust".into(), "PostgreSQL".into()],
            certifications: vec![],
        }
    }

    #[test]
    fn test_render_layout() {
        let text = render_plain_text(&sample());
        assert!(text.starts_with("JANE DOE\njane@example.com | 555-123-4567 | Berlin\n"));
        assert!(text.contains("Senior Engineer, Acme  2019 - Present\n• Cut p99 latency by 40%"));
        assert!(text.contains("BSc Computer Science, TU Berlin, 2014"));
        assert!(text.ends_with("Rust, PostgreSQL"));
        assert!(!text.contains("CERTIFICATIONS"));
        assert!(!text.contains("•  "));
    }

    #[test]
    fn test_rendered_text_parses_back_into_sections() {
        let parsed = split_sections(&render_plain_text(&sample()));
        for kind in [
            SectionKind::Summary,
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Skills,
        ] {
            assert!(parsed.has(kind), "missing {kind:?}");
        }
    }

    #[test]
    fn test_render_empty_data() {
        assert_eq!(render_plain_text(&ResumeData::default()), "");
    }
}
