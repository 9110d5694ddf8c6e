mod config;
mod db;
mod errors;
mod matching;
mod models;
mod nlp;
mod outcome;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::nlp::embedder::HuggingFaceEmbedder;
use crate::nlp::extractor::EntityExtractor;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Compile the skill vocabulary once; shared read-only from here on
    let extractor = Arc::new(EntityExtractor::with_extra_skills(&config.extra_skills)?);
    info!(
        "Entity extractor initialized ({} skill terms)",
        extractor.vocabulary().count()
    );

    // Initialize embedding provider
    let embedder = Arc::new(HuggingFaceEmbedder::new(
        config.embedding_api_url.clone(),
        config.huggingface_api_key.clone(),
        Duration::from_secs(config.embedding_timeout_secs),
    )?);
    if config.huggingface_api_key.is_empty() {
        info!(
            "HUGGINGFACE_API_KEY not set; embeddings will likely use the {:?} fallback",
            config.embedding_fallback
        );
    }
    info!(
        "Scoring weights: similarity={} skills={}",
        config.weights.similarity, config.weights.skills
    );

    // Build app state
    let state = AppState {
        db,
        embedder,
        extractor,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
