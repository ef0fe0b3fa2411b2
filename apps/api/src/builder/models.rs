use serde::{Deserialize, Deserializer, Serialize};

/// Structured resume as submitted by a resume-builder form. Every field is
/// optional on the wire and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    #[serde(alias = "start_date", deserialize_with = "string_or_number")]
    pub start_date: String,
    #[serde(alias = "end_date", deserialize_with = "string_or_number")]
    pub end_date: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
}

/// Form inputs send years as either `2020` or `"2020"`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
        Nothing(()),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) => s,
        Loose::Number(n) => n.to_string(),
        Loose::Nothing(()) => String::new(),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct TailorRequest {
    #[serde(default)]
    pub resume_data: ResumeData,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceImprovement {
    pub original: String,
    pub improved: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailoredResume {
    pub tailored_summary: String,
    pub keywords_to_add: Vec<String>,
    pub experience_improvements: Vec<ExperienceImprovement>,
    pub skills_to_highlight: Vec<String>,
    pub additional_sections: Vec<String>,
    pub overall_strategy: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TailorResponse {
    pub success: bool,
    pub tailored_resume: TailoredResume,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImproveSectionRequest {
    #[serde(default)]
    pub section_text: String,
    #[serde(default)]
    pub section_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionImprovement {
    pub suggestions: Vec<String>,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResumeResponse {
    pub success: bool,
    pub message: String,
    pub data: ResumeData,
    pub formatted: String,
}

// Loose shapes for model output.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTailoredResume {
    pub tailored_summary: Option<String>,
    pub keywords_to_add: Vec<String>,
    pub experience_improvements: Vec<RawExperienceImprovement>,
    pub skills_to_highlight: Vec<String>,
    pub additional_sections: Vec<String>,
    pub overall_strategy: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawExperienceImprovement {
    pub original: Option<String>,
    pub improved: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSectionImprovement {
    pub suggestions: Vec<String>,
    pub tips: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_data_tolerates_loose_input() {
        let data: ResumeData = serde_json::from_str(
            r#"{
                "name": "Jane Doe",
                "experience": [{"title": "Engineer", "start_date": 2019, "endDate": "Present"}],
                "education": [{"degree": "BSc", "year": 2014}],
                "favoriteColor": "green"
            }"#,
        )
        .unwrap();
        assert_eq!(data.name, "Jane Doe");
        assert_eq!(data.experience[0].start_date, "2019");
        assert_eq!(data.experience[0].end_date, "Present");
        assert!(data.experience[0].achievements.is_empty());
        assert_eq!(data.education[0].year, "2014");
        assert!(data.certifications.is_empty());
    }

    #[test]
    fn test_null_year_becomes_empty() {
        let entry: EducationEntry = serde_json::from_str(r#"{"degree": "BA", "year": null}"#).unwrap();
        assert_eq!(entry.year, "");
    }

    #[test]
    fn test_tailored_resume_is_camel_case() {
        let tailored = TailoredResume {
            tailored_summary: "s".into(),
            keywords_to_add: vec!["Kafka".into()],
            experience_improvements: vec![],
            skills_to_highlight: vec![],
            additional_sections: vec![],
            overall_strategy: "o".into(),
        };
        let value = serde_json::to_value(&tailored).unwrap();
        assert_eq!(value["keywordsToAdd"][0], "Kafka");
        assert_eq!(value["overallStrategy"], "o");
    }
}
