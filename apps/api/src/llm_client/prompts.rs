// Shared prompt fragments. Each service that calls the LLM keeps its own
// prompts.rs next to it; this file holds the cross-cutting pieces.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Scoring rules appended to every prompt that asks for 0-100 scores.
pub const SCORE_RANGE_INSTRUCTION: &str = "\
    All scores are integers between 0 and 100 inclusive. \
    80 or above means the area is strong, 60 to 79 means it needs attention, \
    below 60 means it is a problem.";

/// Instruction that keeps feedback grounded in the supplied resume text.
pub const GROUNDING_INSTRUCTION: &str = "\
    Base every statement on the resume text provided. \
    Do NOT invent employers, degrees, dates or metrics that are not present. \
    When something is missing, say it is missing.";

/// Builds a system prompt for a given role, always ending in the JSON-only rule.
pub fn system_prompt(role: &str) -> String {
    format!("{role} {JSON_ONLY_SYSTEM}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_keeps_json_rule() {
        let prompt = system_prompt("You are an ATS expert.");
        assert!(prompt.starts_with("You are an ATS expert."));
        assert!(prompt.contains("valid JSON only"));
    }
}
