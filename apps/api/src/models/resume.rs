use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::nlp::extractor::EntityBag;

/// A stored resume without its embedding, which stays server-side.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub filename: String,
    pub upload_date: DateTime<Utc>,
    pub text_raw: String,
    pub text_clean: String,
    pub skills: Vec<String>,
    pub entities: Json<EntityBag>,
    pub embedding_degraded: bool,
}

/// Candidate list view: no raw text, no embedding.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateListItem {
    pub id: Uuid,
    pub filename: String,
    pub upload_date: DateTime<Utc>,
    pub skills: Vec<String>,
    pub entities: Json<EntityBag>,
    pub embedding_degraded: bool,
}

/// The columns ranking needs.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateScoringRow {
    pub id: Uuid,
    pub filename: String,
    pub skills: Vec<String>,
    pub embedding: Vec<f32>,
}

/// Insert payload for a processed resume.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub filename: String,
    pub text_raw: String,
    pub text_clean: String,
    pub entities: EntityBag,
    pub embedding: Vec<f32>,
    pub embedding_degraded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_row_json_has_no_embedding() {
        let row = ResumeRow {
            id: Uuid::nil(),
            filename: "cv.txt".to_string(),
            upload_date: Utc::now(),
            text_raw: "Python".to_string(),
            text_clean: "python".to_string(),
            skills: vec!["Python".to_string()],
            entities: Json(EntityBag::default()),
            embedding_degraded: false,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("embedding").is_none());
        assert_eq!(json["skills"][0], "Python");
    }
}
