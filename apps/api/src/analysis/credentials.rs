use serde::{Deserialize, Serialize};

use crate::analysis::skills::contains_term;

/// Highest academic degree mentioned, ordered so that `>=` means "meets".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeLevel {
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

impl DegreeLevel {
    pub fn label(&self) -> &'static str {
        match self {
            DegreeLevel::Associate => "associate degree",
            DegreeLevel::Bachelor => "bachelor's degree",
            DegreeLevel::Master => "master's degree",
            DegreeLevel::Doctorate => "doctorate",
        }
    }
}

const DEGREE_TERMS: &[(DegreeLevel, &[&str])] = &[
    (
        DegreeLevel::Doctorate,
        &["phd", "ph.d", "doctorate", "doctor of philosophy"],
    ),
    (
        DegreeLevel::Master,
        &["master", "masters", "master's", "msc", "m.sc", "m.s.", "mba", "meng", "m.eng", "ma in"],
    ),
    (
        DegreeLevel::Bachelor,
        &[
            "bachelor",
            "bachelors",
            "bachelor's",
            "bsc",
            "b.sc",
            "b.s.",
            "ba in",
            "b.a.",
            "beng",
            "b.eng",
            "b.tech",
            "btech",
            "undergraduate degree",
        ],
    ),
    (
        DegreeLevel::Associate,
        &["associate degree", "associate's", "associates degree", "a.a.", "a.s."],
    ),
];

/// Titles and jargon that contain a degree word without naming a degree.
const NON_DEGREE_PHRASES: &[&str] = &[
    "scrum master",
    "master of ceremonies",
    "master data",
    "master branch",
    "master class",
    "masterclass",
];

/// Returns the highest degree level mentioned in `text`.
pub fn detect_degree(text: &str) -> Option<DegreeLevel> {
    let mut lower = text.to_lowercase();
    for phrase in NON_DEGREE_PHRASES {
        lower = lower.replace(phrase, " ");
    }

    DEGREE_TERMS
        .iter()
        .find(|(_, terms)| terms.iter().any(|term| contains_term(&lower, term)))
        .map(|(level, _)| *level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_highest_degree() {
        let text = "B.Sc. Computer Science, 2014\nM.Sc. Machine Learning, 2016";
        assert_eq!(detect_degree(text), Some(DegreeLevel::Master));
    }

    #[test]
    fn test_detects_phd() {
        assert_eq!(detect_degree("PhD in Physics"), Some(DegreeLevel::Doctorate));
    }

    #[test]
    fn test_bachelor_in_job_description() {
        assert_eq!(
            detect_degree("Bachelor's degree in Computer Science or equivalent"),
            Some(DegreeLevel::Bachelor)
        );
    }

    #[test]
    fn test_ignores_terms_inside_words() {
        assert_eq!(detect_degree("Embassy liaison"), None);
        assert_eq!(detect_degree("Worked at Ambassador Labs"), None);
    }

    #[test]
    fn test_ignores_degree_words_used_as_verbs_or_titles() {
        assert_eq!(detect_degree("Certified Scrum Master (CSM)"), None);
        assert_eq!(detect_degree("Mastery of SQL and Python"), None);
        assert_eq!(detect_degree("Mastered Kubernetes operations"), None);
        assert_eq!(detect_degree("Merged the fix into the master branch"), None);
    }

    #[test]
    fn test_scrum_master_does_not_hide_a_real_degree() {
        let text = "Certified Scrum Master\nBSc Computer Science, 2014";
        assert_eq!(detect_degree(text), Some(DegreeLevel::Bachelor));
        assert_eq!(
            detect_degree("Master's degree in Statistics"),
            Some(DegreeLevel::Master)
        );
    }

    #[test]
    fn test_ordering_means_meets() {
        assert!(DegreeLevel::Master >= DegreeLevel::Bachelor);
        assert!(DegreeLevel::Associate < DegreeLevel::Bachelor);
    }
}
