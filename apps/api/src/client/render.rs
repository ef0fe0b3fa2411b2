//! Terminal rendering of analysis and match results.

use console::{style, StyledObject};

use crate::analysis::models::{AnalyzeResponse, ScoreBand, REQUIRED_SECTIONS};
use crate::matching::models::MatchResult;

/// Colors a score by its band: green good, yellow warning, red bad.
pub fn styled_score(score: u32) -> StyledObject<String> {
    let text = format!("{score}/100");
    match ScoreBand::from_score(score) {
        ScoreBand::Good => style(text).green().bold(),
        ScoreBand::Warning => style(text).yellow().bold(),
        ScoreBand::Bad => style(text).red().bold(),
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn push_list(out: &mut String, heading: &str, items: &[String], marker: &str) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{}\n", style(heading).bold()));
    for item in items {
        out.push_str(&format!("  {marker} {item}\n"));
    }
}

pub fn render_analysis(response: &AnalyzeResponse) -> String {
    let analysis = &response.analysis;
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n\n",
        style("Resume analysis:").bold(),
        response.filename
    ));
    out.push_str(&format!("  Overall  {}\n", styled_score(analysis.overall_score)));
    out.push_str(&format!("  ATS      {}\n", styled_score(analysis.ats_score)));
    out.push_str(&format!("  Content  {}\n", styled_score(analysis.content_score)));
    out.push_str(&format!("  Format   {}\n", styled_score(analysis.format_score)));

    out.push_str(&format!("\n{}\n", style("Sections").bold()));
    let ordered = REQUIRED_SECTIONS
        .iter()
        .filter_map(|name| analysis.sections.get_key_value(*name))
        .chain(
            analysis
                .sections
                .iter()
                .filter(|(name, _)| !REQUIRED_SECTIONS.contains(&name.as_str())),
        );
    for (name, section) in ordered {
        out.push_str(&format!(
            "  {:<15} {}  {}\n",
            title_case(name),
            styled_score(section.score),
            section.message
        ));
    }

    push_list(&mut out, "Strengths", &analysis.strengths, "+");
    push_list(&mut out, "Improvements", &analysis.improvements, "-");
    if !analysis.extracted_skills.is_empty() {
        out.push_str(&format!(
            "\n{} {}\n",
            style("Skills found:").bold(),
            analysis.extracted_skills.join(", ")
        ));
    }
    if !analysis.missing_keywords.is_empty() {
        out.push_str(&format!(
            "{} {}\n",
            style("Missing keywords:").bold(),
            analysis.missing_keywords.join(", ")
        ));
    }
    if let Some(feedback) = &analysis.detailed_feedback {
        out.push_str(&format!("\n{feedback}\n"));
    }
    out
}

pub fn render_match(result: &MatchResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n",
        style("Job match:").bold(),
        styled_score(result.match_score)
    ));
    if let Some(summary) = &result.summary {
        out.push_str(&format!("{summary}\n"));
    }
    if let Some(exp) = &result.experience_match {
        out.push_str(&format!("  Experience  {}  {}\n", styled_score(exp.score), exp.details));
    }
    if let Some(edu) = &result.education_match {
        out.push_str(&format!("  Education   {}  {}\n", styled_score(edu.score), edu.details));
    }

    if !result.matched_skills.is_empty() {
        out.push_str(&format!(
            "\n{} {}\n",
            style("Matched skills:").green().bold(),
            result.matched_skills.join(", ")
        ));
    }
    if !result.missing_skills.is_empty() {
        out.push_str(&format!(
            "{} {}\n",
            style("Missing skills:").red().bold(),
            result.missing_skills.join(", ")
        ));
    }

    push_list(&mut out, "Recommendations", &result.recommendations, "-");
    push_list(&mut out, "Action items", &result.action_items, "[ ]");
    out
}
