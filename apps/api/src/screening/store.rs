//! Document store: resumes and jobs in PostgreSQL.

use sqlx::types::Json;
use sqlx::{PgPool, Result};
use tracing::info;
use uuid::Uuid;

use crate::models::job::{JobRow, NewJob};
use crate::models::resume::{CandidateListItem, CandidateScoringRow, NewResume, ResumeRow};

pub async fn insert_resume(pool: &PgPool, resume: &NewResume) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO resumes
            (id, filename, text_raw, text_clean, skills, entities, embedding, embedding_degraded)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(&resume.filename)
    .bind(&resume.text_raw)
    .bind(&resume.text_clean)
    .bind(&resume.entities.skill)
    .bind(Json(&resume.entities))
    .bind(&resume.embedding)
    .bind(resume.embedding_degraded)
    .execute(pool)
    .await?;

    info!("Stored resume {id} ({})", resume.filename);
    Ok(id)
}

pub async fn get_resume(pool: &PgPool, id: Uuid) -> Result<Option<ResumeRow>> {
    Ok(
        sqlx::query_as::<_, ResumeRow>(
            r#"
            SELECT id, filename, upload_date, text_raw, text_clean, skills, entities,
                   embedding_degraded
            FROM resumes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?,
    )
}

pub async fn list_candidates(pool: &PgPool) -> Result<Vec<CandidateListItem>> {
    Ok(sqlx::query_as::<_, CandidateListItem>(
        r#"
        SELECT id, filename, upload_date, skills, entities, embedding_degraded
        FROM resumes
        ORDER BY upload_date ASC
        "#,
    )
    .fetch_all(pool)
    .await?)
}

pub async fn candidates_for_scoring(pool: &PgPool) -> Result<Vec<CandidateScoringRow>> {
    Ok(sqlx::query_as::<_, CandidateScoringRow>(
        "SELECT id, filename, skills, embedding FROM resumes ORDER BY upload_date ASC",
    )
    .fetch_all(pool)
    .await?)
}

/// Skill lists of every resume, oldest first.
pub async fn all_skill_lists(pool: &PgPool) -> Result<Vec<Vec<String>>> {
    Ok(
        sqlx::query_scalar::<_, Vec<String>>("SELECT skills FROM resumes ORDER BY upload_date ASC")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn insert_job(pool: &PgPool, job: &NewJob) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO jobs (id, title, description, required_skills, embedding)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.required_skills)
    .bind(&job.embedding)
    .execute(pool)
    .await?;

    info!("Stored job {id} ({})", job.title);
    Ok(id)
}

pub async fn get_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>> {
    Ok(sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

pub async fn list_jobs(pool: &PgPool) -> Result<Vec<JobRow>> {
    Ok(
        sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn count_jobs(pool: &PgPool) -> Result<i64> {
    Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await?)
}
