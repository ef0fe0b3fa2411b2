use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").unwrap();
    static ref PHONE_RE: Regex =
        Regex::new(r"(?:\+\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}\b").unwrap();
    static ref LINKEDIN_RE: Regex = Regex::new(r"(?i)linkedin\.com/in/[\w-]+").unwrap();
    static ref GITHUB_RE: Regex = Regex::new(r"(?i)github\.com/[\w-]+").unwrap();
}

/// Contact details found in the resume header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

impl ContactInfo {
    /// Number of channels present, out of email / phone / linkedin.
    pub fn core_channels(&self) -> usize {
        [&self.email, &self.phone, &self.linkedin]
            .iter()
            .filter(|c| c.is_some())
            .count()
    }
}

/// Extracts the first email, phone number and profile links found in `text`.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    let first = |re: &Regex| re.find(text).map(|m| m.as_str().to_string());

    ContactInfo {
        email: first(&EMAIL_RE),
        phone: first(&PHONE_RE),
        linkedin: first(&LINKEDIN_RE),
        github: first(&GITHUB_RE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_all_channels() {
        let text = "Jane Doe\njane.doe@example.com | (555) 123-4567\nlinkedin.com/in/jane-doe · github.com/janed";
        let info = extract_contact_info(text);
        assert_eq!(info.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(info.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(info.linkedin.as_deref(), Some("linkedin.com/in/jane-doe"));
        assert_eq!(info.github.as_deref(), Some("github.com/janed"));
        assert_eq!(info.core_channels(), 3);
    }

    #[test]
    fn test_international_phone() {
        let info = extract_contact_info("Call +1-555-987-6543 anytime");
        assert_eq!(info.phone.as_deref(), Some("+1-555-987-6543"));
    }

    #[test]
    fn test_missing_everything() {
        let info = extract_contact_info("Just a name");
        assert_eq!(info, ContactInfo::default());
        assert_eq!(info.core_channels(), 0);
    }
}
