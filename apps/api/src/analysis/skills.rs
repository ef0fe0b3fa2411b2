//! Skill vocabulary and whole-word term matching shared by analysis and matching.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Language,
    Framework,
    Data,
    Cloud,
    Practice,
    Soft,
}

pub struct Skill {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub category: SkillCategory,
}

const fn skill(
    name: &'static str,
    aliases: &'static [&'static str],
    category: SkillCategory,
) -> Skill {
    Skill {
        name,
        aliases,
        category,
    }
}

use SkillCategory::*;

/// Canonical skill names with the spellings recruiters and ATS parsers treat
/// as equivalent. Order here is the order skills are reported in.
pub const VOCABULARY: &[Skill] = &[
    skill("Python", &["python"], Language),
    skill("Java", &["java"], Language),
    skill("JavaScript", &["javascript", "js", "ecmascript"], Language),
    skill("TypeScript", &["typescript"], Language),
    skill("Rust", &["rust"], Language),
    skill("Go", &["golang"], Language),
    skill("C++", &["c++", "cpp"], Language),
    skill("C#", &["c#", "csharp"], Language),
    skill("Ruby", &["ruby"], Language),
    skill("PHP", &["php"], Language),
    skill("Kotlin", &["kotlin"], Language),
    skill("Swift", &["swift"], Language),
    skill("Scala", &["scala"], Language),
    skill("SQL", &["sql"], Language),
    skill("HTML", &["html", "html5"], Language),
    skill("CSS", &["css", "css3"], Language),
    skill("React", &["react", "reactjs", "react.js"], Framework),
    skill("Angular", &["angular", "angularjs"], Framework),
    skill("Vue", &["vue", "vue.js", "vuejs"], Framework),
    skill("Node.js", &["node.js", "nodejs", "node"], Framework),
    skill("Django", &["django"], Framework),
    skill("Flask", &["flask"], Framework),
    skill("FastAPI", &["fastapi"], Framework),
    skill("Spring Boot", &["spring boot", "springboot"], Framework),
    skill(".NET", &[".net", "dotnet", "asp.net"], Framework),
    skill("Ruby on Rails", &["ruby on rails", "rails"], Framework),
    skill("GraphQL", &["graphql"], Framework),
    skill("REST APIs", &["restful", "rest api", "rest apis"], Framework),
    skill("PostgreSQL", &["postgresql", "postgres"], Data),
    skill("MySQL", &["mysql"], Data),
    skill("MongoDB", &["mongodb", "mongo"], Data),
    skill("Redis", &["redis"], Data),
    skill("Elasticsearch", &["elasticsearch"], Data),
    skill("Kafka", &["kafka"], Data),
    skill("Spark", &["spark", "pyspark"], Data),
    skill("Pandas", &["pandas"], Data),
    skill("NumPy", &["numpy"], Data),
    skill("TensorFlow", &["tensorflow"], Data),
    skill("PyTorch", &["pytorch"], Data),
    skill("Machine Learning", &["machine learning", "ml"], Data),
    skill("Data Analysis", &["data analysis", "data analytics"], Data),
    skill("Tableau", &["tableau"], Data),
    skill("Power BI", &["power bi", "powerbi"], Data),
    skill("Excel", &["microsoft excel", "ms excel", "spreadsheets"], Data),
    skill("AWS", &["aws", "amazon web services"], Cloud),
    skill("Azure", &["azure"], Cloud),
    skill("GCP", &["gcp", "google cloud"], Cloud),
    skill("Docker", &["docker"], Cloud),
    skill("Kubernetes", &["kubernetes", "k8s"], Cloud),
    skill("Terraform", &["terraform"], Cloud),
    skill("Linux", &["linux"], Cloud),
    skill("CI/CD", &["ci/cd", "continuous integration", "continuous delivery"], Cloud),
    skill("Jenkins", &["jenkins"], Cloud),
    skill("Git", &["git", "github", "gitlab"], Practice),
    skill("Agile", &["agile", "scrum", "kanban"], Practice),
    skill("Microservices", &["microservices", "microservice"], Practice),
    skill("Testing", &["unit testing", "test automation", "tdd", "testing"], Practice),
    skill("System Design", &["system design", "distributed systems"], Practice),
    skill("Project Management", &["project management", "pmp"], Practice),
    skill("Product Management", &["product management", "roadmap"], Practice),
    skill("Leadership", &["leadership", "led a team", "team lead", "mentoring", "mentored"], Soft),
    skill("Communication", &["communication", "presentation", "stakeholder"], Soft),
    skill("Collaboration", &["collaboration", "collaborated", "cross-functional"], Soft),
    skill("Problem Solving", &["problem solving", "problem-solving", "troubleshooting"], Soft),
];

/// Keywords most recruiters scan for regardless of role. Used as the
/// missing-keyword baseline when no job description is supplied.
pub const HIGH_VALUE_KEYWORDS: &[&str] = &[
    "Leadership",
    "Communication",
    "Collaboration",
    "Problem Solving",
    "Project Management",
    "Agile",
    "Data Analysis",
];

pub fn lookup(name: &str) -> Option<&'static Skill> {
    VOCABULARY
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
}

/// True when `term` occurs in `haystack` with no alphanumeric character
/// directly before or after it. Both arguments must already be lowercase.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    haystack.match_indices(term).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + term.len()..].chars().next();
        let boundary = |c: Option<char>| c.map_or(true, |c| !c.is_alphanumeric());
        // "c++" must not match the front of a longer symbol run
        let after_ok = boundary(after) && !matches!(after, Some('+') | Some('#'));
        boundary(before) && after_ok
    })
}

/// True when the text mentions the skill under any of its spellings.
/// Only aliases are matched so that ambiguous names like "Go" need an
/// unambiguous spelling ("golang").
pub fn mentions_skill(text_lower: &str, skill: &Skill) -> bool {
    skill.aliases.iter().any(|a| contains_term(text_lower, a))
}

/// Returns the canonical names of every vocabulary skill mentioned in `text`,
/// in vocabulary order.
pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    VOCABULARY
        .iter()
        .filter(|s| mentions_skill(&lower, s))
        .map(|s| s.name.to_string())
        .collect()
}

/// Removes case-insensitive duplicates and blank entries, keeping first occurrence.
pub fn dedupe_case_insensitive(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .collect()
}
