use serde::{Deserialize, Serialize};

/// Body of `POST /api/match-job`.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

/// Score and explanation for one secondary match dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionMatch {
    pub score: u32,
    pub details: String,
}

/// Resume-to-job fit report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub match_score: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
    pub action_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_match: Option<DimensionMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_match: Option<DimensionMatch>,
    #[serde(default)]
    pub keyword_gaps: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub success: bool,
    pub r#match: MatchResult,
}

/// Loose shape for model output; merged over the keyword result.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMatch {
    pub match_score: Option<f64>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
    pub action_items: Vec<String>,
    pub experience_match: Option<RawDimension>,
    pub education_match: Option<RawDimension>,
    pub keyword_gaps: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawDimension {
    pub score: Option<f64>,
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_response_uses_match_key() {
        let response = MatchResponse {
            success: true,
            r#match: MatchResult {
                match_score: 72,
                matched_skills: vec!["Rust".into()],
                missing_skills: vec!["Kafka".into()],
                recommendations: vec!["Add Kafka".into()],
                action_items: vec!["Build a Kafka demo".into()],
                experience_match: None,
                education_match: None,
                keyword_gaps: vec![],
                strengths: vec![],
                weaknesses: vec![],
                summary: None,
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["match"]["matchScore"], 72);
        assert_eq!(value["match"]["missingSkills"][0], "Kafka");
        assert!(value["match"].get("experienceMatch").is_none());
    }

    #[test]
    fn test_request_missing_fields_default_to_empty() {
        let req: MatchRequest = serde_json::from_str(r#"{"resume_text": "Jane"}"#).unwrap();
        assert_eq!(req.resume_text, "Jane");
        assert!(req.job_description.is_empty());
    }

    #[test]
    fn test_raw_match_tolerates_partial_output() {
        let raw: RawMatch =
            serde_json::from_str(r#"{"matchScore": 88.4, "experienceMatch": {"score": 70}}"#)
                .unwrap();
        assert_eq!(raw.match_score, Some(88.4));
        assert_eq!(raw.experience_match.unwrap().score, Some(70.0));
        assert!(raw.matched_skills.is_empty());
    }
}
