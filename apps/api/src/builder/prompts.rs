// LLM prompt templates for tailoring and section improvement.

use crate::llm_client::prompts::GROUNDING_INSTRUCTION;

pub const COACH_ROLE: &str = "You are a professional resume writer who rewrites resumes \
    for specific roles without inventing experience.";

pub const TAILOR_PROMPT_TEMPLATE: &str = r#"Given this resume data and job description, provide tailored suggestions.

RESUME DATA:
{resume_json}

JOB DESCRIPTION:
{job_description}

Return a JSON object with this EXACT schema:
{
  "tailoredSummary": "Rewritten professional summary",
  "keywordsToAdd": ["..."],
  "experienceImprovements": [
    {"original": "...", "improved": "...", "reason": "..."}
  ],
  "skillsToHighlight": ["..."],
  "additionalSections": ["..."],
  "overallStrategy": "Paragraph explaining the tailoring strategy"
}

RULES:
1. {grounding}
2. "original" must quote an achievement from the resume data verbatim."#;

pub const IMPROVE_PROMPT_TEMPLATE: &str = r#"Improve this {section_type} section of a resume.

CURRENT TEXT:
{section_text}

Provide 3 improved versions with strong action verbs, quantifiable achievements,
a professional tone and ATS-friendly keywords. Where a number is unknown, use a
bracketed placeholder such as [X]% rather than inventing one.

Return a JSON object with this EXACT schema:
{
  "suggestions": ["version 1", "version 2", "version 3"],
  "tips": ["tip 1", "tip 2", "tip 3"]
}"#;

pub fn build_tailor_prompt(resume_json: &str, job_description: &str) -> String {
    TAILOR_PROMPT_TEMPLATE
        .replace("{resume_json}", resume_json)
        .replace("{job_description}", job_description)
        .replace("{grounding}", GROUNDING_INSTRUCTION)
}

pub fn build_improve_prompt(section_text: &str, section_type: &str) -> String {
    IMPROVE_PROMPT_TEMPLATE
        .replace("{section_type}", section_type)
        .replace("{section_text}", section_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tailor_prompt_placeholders_filled() {
        let prompt = build_tailor_prompt(r#"{"name":"Jane"}"#, "Rust role");
        for placeholder in ["{resume_json}", "{job_description}", "{grounding}"] {
            assert!(!prompt.contains(placeholder), "{placeholder} left in prompt");
        }
        assert!(prompt.contains(r#"{"name":"Jane"}"#));
    }

    #[test]
    fn test_improve_prompt_names_section() {
        let prompt = build_improve_prompt("Worked on APIs", "experience");
        assert!(prompt.starts_with("Improve this experience section"));
        assert!(prompt.contains("CURRENT TEXT:\nWorked on APIs"));
    }
}
