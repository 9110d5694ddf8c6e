//! Axum route handlers for the screening API.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine::MatchWeights;
use crate::models::job::JobRow;
use crate::models::resume::{CandidateListItem, ResumeRow};
use crate::nlp::parser::{DocumentFormat, ALLOWED_EXTENSIONS};
use crate::screening::analytics::{skill_distribution, AnalyticsReport, TOP_SKILLS};
use crate::screening::service::{self, MatchResults};
use crate::screening::store;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub message: String,
    pub id: Uuid,
    pub extracted_skills: Vec<String>,
    pub degraded: Vec<String>,
}

/// Title and description are optional at the serde level so that a missing
/// field is reported as a 400 validation error rather than a 422 rejection.
#[derive(Debug, Deserialize)]
pub struct AddJobRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AddJobResponse {
    pub message: String,
    pub id: Uuid,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeightQuery {
    pub similarity_weight: Option<f64>,
    pub skill_weight: Option<f64>,
}

impl WeightQuery {
    fn resolve(&self, defaults: MatchWeights) -> Result<MatchWeights, AppError> {
        Ok(MatchWeights {
            similarity: self.similarity_weight.unwrap_or(defaults.similarity),
            skills: self.skill_weight.unwrap_or(defaults.skills),
        }
        .validate()?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/upload-resume
///
/// Multipart upload with a `file` field (.pdf, .docx or .txt).
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResumeResponse>), AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(secure_filename)
            .unwrap_or_default();
        if filename.is_empty() {
            return Err(AppError::Validation("No selected file".to_string()));
        }
        if DocumentFormat::from_filename(&filename).is_err() {
            return Err(AppError::Validation(format!(
                "File type not allowed (expected one of: {})",
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }

        let bytes = field.bytes().await?;
        let ingested = service::ingest_resume(&state, filename, &bytes).await?;

        return Ok((
            StatusCode::CREATED,
            Json(UploadResumeResponse {
                message: "Resume processed successfully".to_string(),
                id: ingested.id,
                extracted_skills: ingested.extracted_skills,
                degraded: ingested.degraded,
            }),
        ));
    }

    Err(AppError::Validation("No file part".to_string()))
}

/// POST /api/add-job
pub async fn handle_add_job(
    State(state): State<AppState>,
    Json(request): Json<AddJobRequest>,
) -> Result<(StatusCode, Json<AddJobResponse>), AppError> {
    let title = request.title.as_deref().unwrap_or("").trim();
    let description = request.description.as_deref().unwrap_or("").trim();
    if title.is_empty() || description.is_empty() {
        return Err(AppError::Validation(
            "Title and description are required".to_string(),
        ));
    }

    let id = service::create_job(&state, title, description, &request.required_skills).await?;
    Ok((
        StatusCode::CREATED,
        Json(AddJobResponse {
            message: "Job added successfully".to_string(),
            id,
        }),
    ))
}

/// GET /api/match-candidates/:job_id
///
/// Optional `similarity_weight` / `skill_weight` query params override the
/// configured weights for this request.
pub async fn handle_match_candidates(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(query): Query<WeightQuery>,
) -> Result<Json<MatchResults>, AppError> {
    let weights = query.resolve(state.config.weights)?;
    let results = service::match_candidates(&state, job_id, weights).await?;
    Ok(Json(results))
}

/// GET /api/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateListItem>>, AppError> {
    Ok(Json(store::list_candidates(&state.db).await?))
}

/// GET /api/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = store::get_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;
    Ok(Json(resume))
}

/// GET /api/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobRow>>, AppError> {
    Ok(Json(store::list_jobs(&state.db).await?))
}

/// GET /api/analytics
pub async fn handle_analytics(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsReport>, AppError> {
    let skill_lists = store::all_skill_lists(&state.db).await?;
    let total_jobs = store::count_jobs(&state.db).await?;
    Ok(Json(AnalyticsReport {
        skill_distribution: skill_distribution(&skill_lists, TOP_SKILLS),
        total_candidates: skill_lists.len(),
        total_jobs,
    }))
}

/// Base name only, restricted to ASCII alphanumerics, `.`, `-` and `_`.
/// Spaces become underscores; leading dots are dropped.
fn secure_filename(raw: &str) -> String {
    let base = raw.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or("");
    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_filename_strips_path_and_symbols() {
        assert_eq!(secure_filename("../../etc/passwd"), "passwd");
        assert_eq!(secure_filename("C:\\Users\\jane\\My CV (1).pdf"), "My_CV_1.pdf");
        assert_eq!(secure_filename(".hidden.txt"), "hidden.txt");
        assert_eq!(secure_filename("résumé.docx"), "rsum.docx");
    }

    #[test]
    fn test_weight_query_overrides_and_validates() {
        let defaults = MatchWeights::default();
        let weights = WeightQuery {
            similarity_weight: Some(0.5),
            skill_weight: None,
        }
        .resolve(defaults)
        .unwrap();
        assert_eq!(weights.similarity, 0.5);
        assert_eq!(weights.skills, 0.3);

        let err = WeightQuery {
            similarity_weight: None,
            skill_weight: Some(-1.0),
        }
        .resolve(defaults)
        .unwrap_err();
        assert!(matches!(err, AppError::Scoring(_)));
    }
}
