use serde::{Deserialize, Serialize};

/// Result of checking one achievement statement for measurable impact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletCheck {
    pub bullet: String,
    pub quantified: bool,
    pub starts_with_action_verb: bool,
    /// Vague verbs and scale words found in an unquantified bullet.
    pub vague_terms: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Aggregate over a section's bullets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub total: usize,
    pub quantified: usize,
    pub action_led: usize,
    pub vague_terms: Vec<String>,
}

impl ImpactSummary {
    pub fn quantified_ratio(&self) -> f64 {
        ratio(self.quantified, self.total)
    }

    pub fn action_ratio(&self) -> f64 {
        ratio(self.action_led, self.total)
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

pub const VAGUE_VERBS: &[&str] = &[
    "responsible for",
    "worked on",
    "helped",
    "assisted",
    "involved in",
    "participated",
    "duties included",
    "tasked with",
];

const VAGUE_SCALE_WORDS: &[&str] = &[
    "significant",
    "significantly",
    "various",
    "numerous",
    "many",
    "several",
    "large",
    "huge",
    "substantial",
];

pub const ACTION_VERBS: &[&str] = &[
    "achieved",
    "architected",
    "automated",
    "built",
    "created",
    "cut",
    "delivered",
    "designed",
    "developed",
    "drove",
    "engineered",
    "established",
    "generated",
    "grew",
    "implemented",
    "improved",
    "increased",
    "launched",
    "led",
    "managed",
    "mentored",
    "migrated",
    "optimized",
    "owned",
    "reduced",
    "redesigned",
    "resolved",
    "saved",
    "scaled",
    "shipped",
    "spearheaded",
    "streamlined",
    "trained",
];

/// True when the statement carries a measurable outcome: a number, a
/// percentage, a currency amount, or an `~N` estimate.
pub fn is_quantified(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        || text.contains('%')
        || text.contains('$')
        || text.contains('€')
        || text.contains('£')
}

pub fn starts_with_action_verb(text: &str) -> bool {
    let first = text
        .split_whitespace()
        .next()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphabetic())
                .to_lowercase()
        })
        .unwrap_or_default();
    ACTION_VERBS.contains(&first.as_str())
}

/// Checks a single bullet for quantified impact and vague phrasing.
pub fn check_bullet(text: &str) -> BulletCheck {
    let lower = text.to_lowercase();
    let quantified = is_quantified(text);
    let starts_with_action_verb = starts_with_action_verb(text);

    let mut vague_terms = Vec::new();
    let mut suggestions = Vec::new();

    if let Some(verb) = VAGUE_VERBS.iter().find(|v| lower.contains(*v)) {
        vague_terms.push(verb.to_string());
        suggestions.push(format!(
            "Replace '{verb}' with a strong action verb that states what you did."
        ));
    }

    if !quantified {
        if let Some(word) = VAGUE_SCALE_WORDS
            .iter()
            .find(|w| lower.split(|c: char| !c.is_alphabetic()).any(|t| t == **w))
        {
            vague_terms.push(word.to_string());
            suggestions.push(format!(
                "Replace '{word}' with a specific number, e.g. '5x', '40%', '3 weeks'."
            ));
        }
        suggestions.push(
            "Add a measurable result: a number, percentage, amount, or time saved.".to_string(),
        );
    }

    if !starts_with_action_verb && vague_terms.is_empty() {
        suggestions.push("Open with an action verb such as 'Built', 'Led' or 'Reduced'.".to_string());
    }

    BulletCheck {
        bullet: text.to_string(),
        quantified,
        starts_with_action_verb,
        vague_terms,
        suggestions,
    }
}

/// Checks every bullet and aggregates the counts.
pub fn summarize_bullets(bullets: &[String]) -> ImpactSummary {
    let mut summary = ImpactSummary {
        total: bullets.len(),
        ..Default::default()
    };

    for bullet in bullets {
        let check = check_bullet(bullet);
        if check.quantified {
            summary.quantified += 1;
        }
        if check.starts_with_action_verb {
            summary.action_led += 1;
        }
        for term in check.vague_terms {
            if !summary.vague_terms.contains(&term) {
                summary.vague_terms.push(term);
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantified_with_percentage() {
        assert!(check_bullet("Reduced latency by 40% through caching").quantified);
    }

    #[test]
    fn test_quantified_with_currency() {
        assert!(check_bullet("Saved $50,000 annually by optimizing queries").quantified);
        assert!(check_bullet("Generated €200k in new revenue").quantified);
    }

    #[test]
    fn test_quantified_with_count() {
        assert!(check_bullet("Trained 15 engineers on the release process").quantified);
    }

    #[test]
    fn test_unquantified_vague_verb_is_flagged() {
        let check = check_bullet("Responsible for the user experience");
        assert!(!check.quantified);
        assert_eq!(check.vague_terms, vec!["responsible for"]);
        assert!(check.suggestions.iter().any(|s| s.contains("action verb")));
    }

    #[test]
    fn test_unquantified_scale_word_is_flagged() {
        let check = check_bullet("Delivered significant performance improvements");
        assert!(check.vague_terms.contains(&"significant".to_string()));
        assert!(check.starts_with_action_verb);
    }

    #[test]
    fn test_scale_word_inside_other_word_is_ignored() {
        let check = check_bullet("Built a manygrams parser");
        assert!(check.vague_terms.is_empty());
    }

    #[test]
    fn test_action_verb_detection_ignores_punctuation() {
        assert!(starts_with_action_verb("Led, coached and hired a team"));
        assert!(!starts_with_action_verb("Team player"));
        assert!(!starts_with_action_verb(""));
    }

    #[test]
    fn test_summarize_mixed_bullets() {
        let bullets = vec![
            "Reduced latency by 40%".to_string(),
            "Helped the team deliver projects".to_string(),
            "Built 3 microservices".to_string(),
        ];
        let summary = summarize_bullets(&bullets);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.quantified, 2);
        assert_eq!(summary.action_led, 2);
        assert_eq!(summary.vague_terms, vec!["helped"]);
        assert!((summary.quantified_ratio() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize_bullets(&[]);
        assert_eq!(summary.quantified_ratio(), 0.0);
        assert_eq!(summary.action_ratio(), 0.0);
    }
}
