use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Three-way quality band shared by section statuses and score rendering.
/// 80 and above is good, 60 and above a warning, anything lower is bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Warning,
    #[serde(alias = "error")]
    Bad,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => ScoreBand::Good,
            s if s >= 60 => ScoreBand::Warning,
            _ => ScoreBand::Bad,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Good => "good",
            ScoreBand::Warning => "warning",
            ScoreBand::Bad => "bad",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionReport {
    pub status: ScoreBand,
    pub message: String,
    pub score: u32,
}

impl SectionReport {
    pub fn new(score: u32, message: impl Into<String>) -> Self {
        let score = score.min(100);
        Self {
            status: ScoreBand::from_score(score),
            message: message.into(),
            score,
        }
    }
}

/// Sections every analysis reports on, in display order.
pub const REQUIRED_SECTIONS: &[&str] = &["contact", "summary", "experience", "education", "skills"];

/// Structured resume-quality report returned by `/api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u32,
    pub ats_score: u32,
    pub content_score: u32,
    pub format_score: u32,
    pub sections: BTreeMap<String, SectionReport>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub extracted_skills: Vec<String>,
    pub missing_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_feedback: Option<String>,
}

/// Response envelope for `POST /api/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis_id: Uuid,
    pub filename: String,
    pub extracted_text: String,
    pub analysis: AnalysisResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Loose shapes for model output. Everything is optional so a partially
// conforming answer can still be merged with the heuristic result.
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAnalysis {
    pub overall_score: Option<f64>,
    pub ats_score: Option<f64>,
    pub content_score: Option<f64>,
    pub format_score: Option<f64>,
    pub sections: HashMap<String, RawSection>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub extracted_skills: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub detailed_feedback: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSection {
    pub score: Option<f64>,
    pub status: Option<String>,
    pub message: Option<String>,
}

/// Clamps a loosely typed score into `0..=100`. NaN and missing values fall
/// back to `fallback`.
pub fn clamp_score(value: Option<f64>, fallback: u32) -> u32 {
    match value {
        Some(v) if v.is_finite() => v.round().clamp(0.0, 100.0) as u32,
        _ => fallback.min(100),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Warning);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::Warning);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::Bad);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Bad);
    }

    #[test]
    fn test_band_accepts_error_alias() {
        let band: ScoreBand = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(band, ScoreBand::Bad);
        assert_eq!(serde_json::to_string(&band).unwrap(), "\"bad\"");
    }

    #[test]
    fn test_section_report_caps_score() {
        let report = SectionReport::new(140, "over the top");
        assert_eq!(report.score, 100);
        assert_eq!(report.status, ScoreBand::Good);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(Some(104.2), 50), 100);
        assert_eq!(clamp_score(Some(-3.0), 50), 0);
        assert_eq!(clamp_score(Some(72.6), 50), 73);
        assert_eq!(clamp_score(Some(f64::NAN), 50), 50);
        assert_eq!(clamp_score(None, 61), 61);
    }

    #[test]
    fn test_analysis_result_wire_names() {
        let result = AnalysisResult {
            overall_score: 70,
            ats_score: 71,
            content_score: 72,
            format_score: 73,
            sections: BTreeMap::from([("skills".to_string(), SectionReport::new(65, "ok"))]),
            strengths: vec![],
            improvements: vec![],
            extracted_skills: vec!["Rust".to_string()],
            missing_keywords: vec![],
            detailed_feedback: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["overallScore"], 70);
        assert_eq!(json["sections"]["skills"]["status"], "warning");
        assert_eq!(json["extractedSkills"][0], "Rust");
        assert!(json.get("detailedFeedback").is_none());
    }

    #[test]
    fn test_raw_analysis_tolerates_partial_output() {
        let raw: RawAnalysis =
            serde_json::from_str(r#"{"overallScore": 88.5, "sections": {"contact": {"score": 90}}}"#)
                .unwrap();
        assert_eq!(raw.overall_score, Some(88.5));
        assert!(raw.strengths.is_empty());
        assert_eq!(raw.sections["contact"].score, Some(90.0));
    }
}
