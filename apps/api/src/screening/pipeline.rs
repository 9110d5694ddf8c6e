//! Pure pipeline entry points: resume processing and job posting processing.
//! Ranking lives in `matching::ranking`.

use serde::Serialize;

use crate::nlp::cleaner::{normalize_for_embedding, NormalizedText};
use crate::nlp::extractor::{EntityBag, EntityExtractor};

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedResume {
    pub entities: EntityBag,
    pub normalized_text: NormalizedText,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedJob {
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub embedding_ready_text: String,
}

/// Normalizes raw resume text and extracts entities from its display form.
pub fn process_resume_document(raw_text: &str, extractor: &EntityExtractor) -> ProcessedResume {
    let normalized_text = NormalizedText::from_raw(Some(raw_text));
    let entities = extractor.extract(&normalized_text.display);
    ProcessedResume {
        entities,
        normalized_text,
    }
}

/// Builds the embedding input for a job from `"{title} {description}"`.
/// Required skills are trimmed and blank entries dropped; casing is kept.
pub fn process_job_posting(
    title: &str,
    description: &str,
    required_skills: &[String],
) -> ProcessedJob {
    let embedding_ready_text = normalize_for_embedding(&format!("{title} {description}"));
    ProcessedJob {
        title: title.trim().to_string(),
        description: description.trim().to_string(),
        required_skills: required_skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        embedding_ready_text,
    }
}
