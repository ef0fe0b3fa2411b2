// LLM prompt templates for resume-to-job matching.

use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, SCORE_RANGE_INSTRUCTION};

pub const MATCH_ROLE: &str = "You are an expert technical recruiter who compares resumes \
    against job descriptions and explains the fit honestly.";

pub const MATCH_PROMPT_TEMPLATE: &str = r#"Compare this resume against the job description and assess the match.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Return a JSON object with this EXACT schema:
{
  "matchScore": 0,
  "matchedSkills": ["..."],
  "missingSkills": ["..."],
  "experienceMatch": {"score": 0, "details": "..."},
  "educationMatch": {"score": 0, "details": "..."},
  "keywordGaps": ["..."],
  "recommendations": ["..."],
  "strengths": ["..."],
  "weaknesses": ["..."],
  "actionItems": ["..."],
  "summary": "Two sentences"
}

RULES:
1. {score_rules}
2. {grounding}
3. A skill is either matched or missing, never both.
4. recommendations and actionItems: at least one concrete item each."#;

pub fn build_match_prompt(resume_text: &str, job_description: &str) -> String {
    MATCH_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description)
        .replace("{score_rules}", SCORE_RANGE_INSTRUCTION)
        .replace("{grounding}", GROUNDING_INSTRUCTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_fills_all_placeholders() {
        let prompt = build_match_prompt("Jane Doe, Rust", "Senior Rust Engineer");
        assert!(prompt.contains("RESUME:\nJane Doe, Rust"));
        assert!(prompt.contains("JOB DESCRIPTION:\nSenior Rust Engineer"));
        for placeholder in ["{resume_text}", "{job_description}", "{score_rules}", "{grounding}"] {
            assert!(!prompt.contains(placeholder), "{placeholder} left in prompt");
        }
    }
}
