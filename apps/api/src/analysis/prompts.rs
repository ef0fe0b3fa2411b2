// LLM prompt templates for resume analysis.

use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, SCORE_RANGE_INSTRUCTION};

pub const ANALYSIS_ROLE: &str = "You are an expert resume reviewer and applicant tracking \
    system (ATS) specialist. You evaluate resumes the way recruiters and ATS parsers do.";

/// Analysis prompt template. Replace `{resume_text}` and `{jd_context}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this resume and provide a comprehensive evaluation.{jd_context}

RESUME CONTENT:
{resume_text}

Return a JSON object with this EXACT schema:
{
  "overallScore": 0,
  "atsScore": 0,
  "contentScore": 0,
  "formatScore": 0,
  "sections": {
    "contact": {"score": 0, "status": "good|warning|bad", "message": "..."},
    "summary": {"score": 0, "status": "good|warning|bad", "message": "..."},
    "experience": {"score": 0, "status": "good|warning|bad", "message": "..."},
    "education": {"score": 0, "status": "good|warning|bad", "message": "..."},
    "skills": {"score": 0, "status": "good|warning|bad", "message": "..."}
  },
  "strengths": ["..."],
  "improvements": ["..."],
  "missingKeywords": ["..."],
  "extractedSkills": ["..."],
  "detailedFeedback": "One paragraph"
}

RULES:
1. {score_rules}
2. {grounding}
3. strengths and improvements: 3 to 5 items each, most important first.
4. missingKeywords must not repeat anything in extractedSkills."#;

pub fn build_analysis_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    let jd_context = job_description
        .filter(|jd| !jd.trim().is_empty())
        .map(|jd| format!("\n\nTARGET JOB DESCRIPTION:\n{jd}"))
        .unwrap_or_default();

    ANALYSIS_PROMPT_TEMPLATE
        .replace("{jd_context}", &jd_context)
        .replace("{resume_text}", resume_text)
        .replace("{score_rules}", SCORE_RANGE_INSTRUCTION)
        .replace("{grounding}", GROUNDING_INSTRUCTION)
}
