//! Orchestration behind the HTTP handlers.
//!
//! Resume flow: parse → normalize + extract → embed (fallback on failure) → store.
//! Job flow:    normalize "{title} {description}" → embed → store.
//! Match flow:  fetch job + all resumes → rank on the blocking pool → attach metadata.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine::{MatchWeights, ScoreBreakdown};
use crate::matching::ranking::{rank_candidates, Candidate};
use crate::models::job::NewJob;
use crate::models::resume::NewResume;
use crate::nlp::embedder::embed_or_fallback;
use crate::nlp::parser::{parse_document_blocking, DocumentFormat};
use crate::screening::pipeline::{process_job_posting, process_resume_document};
use crate::screening::store;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeIngested {
    pub id: Uuid,
    pub extracted_skills: Vec<String>,
    /// Reasons for any fallback used while processing this upload.
    pub degraded: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchedCandidate {
    pub candidate_id: Uuid,
    pub filename: String,
    pub skills: Vec<String>,
    pub match_score: f64,
    pub details: ScoreBreakdown,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct MatchResults {
    pub job_title: String,
    pub candidates: Vec<MatchedCandidate>,
}

pub async fn ingest_resume(
    state: &AppState,
    filename: String,
    bytes: &[u8],
) -> Result<ResumeIngested, AppError> {
    let format = DocumentFormat::from_filename(&filename)?;
    let mut degraded = Vec::new();

    let parsed = parse_document_blocking(bytes.to_vec(), format).await;
    if let Some(reason) = parsed.reason() {
        degraded.push(format!("parser: {reason}"));
    }
    let text_raw = parsed.into_value();

    let processed = process_resume_document(&text_raw, &state.extractor);
    let embedding = embed_or_fallback(
        state.embedder.as_ref(),
        &processed.normalized_text.embedding_ready,
        state.config.embedding_fallback,
    )
    .await;
    if let Some(reason) = embedding.reason() {
        degraded.push(format!("embedding: {reason}"));
    }
    let embedding_degraded = embedding.is_degraded();

    let extracted_skills = processed.entities.skill.clone();
    let id = store::insert_resume(
        &state.db,
        &NewResume {
            filename,
            text_raw,
            text_clean: processed.normalized_text.display,
            entities: processed.entities,
            embedding: embedding.into_value().into_inner(),
            embedding_degraded,
        },
    )
    .await?;

    info!(
        "Resume {id} ingested: {} skills, {} degraded step(s)",
        extracted_skills.len(),
        degraded.len()
    );

    Ok(ResumeIngested {
        id,
        extracted_skills,
        degraded,
    })
}

pub async fn create_job(
    state: &AppState,
    title: &str,
    description: &str,
    required_skills: &[String],
) -> Result<Uuid, AppError> {
    let job = process_job_posting(title, description, required_skills);
    let embedding = embed_or_fallback(
        state.embedder.as_ref(),
        &job.embedding_ready_text,
        state.config.embedding_fallback,
    )
    .await;
    if let Some(reason) = embedding.reason() {
        warn!("Job '{}' stored with a fallback embedding: {reason}", job.title);
    }

    let id = store::insert_job(
        &state.db,
        &NewJob {
            title: job.title,
            description: job.description,
            required_skills: job.required_skills,
            embedding: embedding.into_value().into_inner(),
        },
    )
    .await?;
    Ok(id)
}

pub async fn match_candidates(
    state: &AppState,
    job_id: Uuid,
    weights: MatchWeights,
) -> Result<MatchResults, AppError> {
    let job = store::get_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let rows = store::candidates_for_scoring(&state.db).await?;
    let mut metadata: HashMap<Uuid, (String, Vec<String>)> = HashMap::with_capacity(rows.len());
    let candidates: Vec<Candidate> = rows
        .into_iter()
        .map(|row| {
            metadata.insert(row.id, (row.filename, row.skills.clone()));
            Candidate {
                id: row.id,
                skills: row.skills,
                embedding: row.embedding,
            }
        })
        .collect();

    let job_skills = job.required_skills.clone();
    let job_embedding = job.embedding;
    let ranked = tokio::task::spawn_blocking(move || {
        rank_candidates(&job_embedding, &job_skills, &candidates, &weights)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    info!(
        "Matched {} candidates against job {job_id} ({})",
        ranked.len(),
        job.title
    );

    let candidates = ranked
        .into_iter()
        .map(|r| {
            let (filename, skills) = metadata.remove(&r.candidate_id).unwrap_or_default();
            MatchedCandidate {
                candidate_id: r.candidate_id,
                filename,
                skills,
                match_score: r.breakdown.total_score,
                details: r.breakdown,
                summary: r.summary,
            }
        })
        .collect();

    Ok(MatchResults {
        job_title: job.title,
        candidates,
    })
}
