//! Skill/Entity Extractor: fixed-vocabulary keyword matching plus an email pattern.
//!
//! `ORG`, `PERSON`, `GPE` and `EDU` are part of the output shape but this
//! strategy never fills them. That is a known precision gap of keyword matching.

use std::collections::{BTreeSet, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Built-in vocabulary, in scan order. Canonical casing is what ends up in `SKILL`.
pub const DEFAULT_SKILLS: &[&str] = &[
    "Python",
    "Java",
    "C++",
    "JavaScript",
    "React",
    "Flask",
    "Django",
    "Machine Learning",
    "Deep Learning",
    "NLP",
    "SQL",
    "NoSQL",
    "MongoDB",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "Git",
    "CI/CD",
    "Project Management",
    "Communication",
    "Leadership",
    "Next.js",
    "Tailwind CSS",
    "TypeScript",
];

const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

/// Categorized entities for one document. Every category is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBag {
    #[serde(rename = "SKILL")]
    pub skill: Vec<String>,
    #[serde(rename = "ORG")]
    pub org: Vec<String>,
    #[serde(rename = "PERSON")]
    pub person: Vec<String>,
    #[serde(rename = "GPE")]
    pub gpe: Vec<String>,
    #[serde(rename = "EDU")]
    pub edu: Vec<String>,
    #[serde(rename = "EMAIL")]
    pub email: Vec<String>,
}

struct SkillTerm {
    canonical: String,
    pattern: Regex,
}

/// Compiled vocabulary and email pattern. Built once at startup and shared
/// read-only (`Arc<EntityExtractor>` in `AppState`).
pub struct EntityExtractor {
    terms: Vec<SkillTerm>,
    email: Regex,
}

impl EntityExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_extra_skills(&[])
    }

    /// Built-in vocabulary followed by `extra`, dropping case-insensitive duplicates.
    pub fn with_extra_skills(extra: &[String]) -> Result<Self, regex::Error> {
        let mut seen = HashSet::new();
        let mut terms = Vec::new();

        let candidates = DEFAULT_SKILLS
            .iter()
            .map(|s| s.to_string())
            .chain(extra.iter().map(|s| s.trim().to_string()));

        for canonical in candidates {
            if canonical.is_empty() || !seen.insert(canonical.to_lowercase()) {
                continue;
            }
            let pattern = whole_word_pattern(&canonical)?;
            terms.push(SkillTerm { canonical, pattern });
        }

        Ok(Self {
            terms,
            email: Regex::new(EMAIL_PATTERN)?,
        })
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.canonical.as_str())
    }

    /// Scans cleaned text and returns a fresh `EntityBag`. Never fails.
    pub fn extract(&self, text: &str) -> EntityBag {
        let text_lower = text.to_lowercase();

        let skill = self
            .terms
            .iter()
            .filter(|t| t.pattern.is_match(&text_lower))
            .map(|t| t.canonical.clone())
            .collect();

        let email: BTreeSet<&str> = self.email.find_iter(text).map(|m| m.as_str()).collect();

        EntityBag {
            skill,
            email: email.into_iter().map(String::from).collect(),
            ..EntityBag::default()
        }
    }
}

/// Case-insensitive whole-word pattern. Boundaries are any non-word character or
/// the ends of the text, so terms that start or end in a symbol (`C++`) still match.
fn whole_word_pattern(term: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?:^|[^\w]){}(?:$|[^\w])",
        regex::escape(&term.to_lowercase())
    ))
}
