use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::nlp::embedder::EmbeddingProvider;
use crate::nlp::extractor::EntityExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable embedding backend. Default: HuggingFaceEmbedder.
    pub embedder: Arc<dyn EmbeddingProvider>,
    /// Skill vocabulary and patterns, compiled once at startup.
    pub extractor: Arc<EntityExtractor>,
    pub config: Config,
}
