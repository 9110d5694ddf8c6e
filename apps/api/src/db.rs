use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Tables backing the document store. Idempotent; run on every startup.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS resumes (
        id                 UUID PRIMARY KEY,
        filename           TEXT NOT NULL,
        upload_date        TIMESTAMPTZ NOT NULL DEFAULT now(),
        text_raw           TEXT NOT NULL,
        text_clean         TEXT NOT NULL,
        skills             TEXT[] NOT NULL DEFAULT '{}',
        entities           JSONB NOT NULL,
        embedding          REAL[] NOT NULL,
        embedding_degraded BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS jobs (
        id              UUID PRIMARY KEY,
        title           TEXT NOT NULL,
        description     TEXT NOT NULL,
        required_skills TEXT[] NOT NULL DEFAULT '{}',
        embedding       REAL[] NOT NULL,
        created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
];

/// Creates a PostgreSQL connection pool and makes sure the schema exists.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    ensure_schema(&pool).await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("failed to apply schema")?;
    }
    Ok(())
}
