//! Embedding provider: text in, 384-dimensional vector out.
//!
//! The provider is an external collaborator. Its failures never block ingestion:
//! `embed_or_fallback` swaps in a placeholder vector and reports `Outcome::Degraded`.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::matching::similarity::{Embedding, EMBEDDING_DIM};
use crate::outcome::Outcome;

pub const DEFAULT_EMBEDDING_URL: &str = "https://api-inference.huggingface.co/pipeline/feature-extraction/sentence-transformers/all-MiniLM-L6-v2";

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error("Expected {expected} dimensions, got {actual}")]
    Dimension { expected: usize, actual: usize },
}

/// Placeholder used when the provider fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Independent uniform values in [0, 1).
    #[default]
    Random,
    Zero,
}

impl FallbackPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "random" => Some(FallbackPolicy::Random),
            "zero" => Some(FallbackPolicy::Zero),
            _ => None,
        }
    }

    pub fn placeholder(self) -> Embedding {
        match self {
            FallbackPolicy::Zero => Embedding::zeros(),
            FallbackPolicy::Random => {
                let mut rng = rand::thread_rng();
                Embedding::from_fixed((0..EMBEDDING_DIM).map(|_| rng.gen::<f32>()).collect())
            }
        }
    }
}

/// Swappable embedding backend. Carried in `AppState` as `Arc<dyn EmbeddingProvider>`.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;
}

/// Embeds `text`, masking provider failures with the fallback vector.
/// Empty text skips the provider entirely and yields the zero vector.
pub async fn embed_or_fallback(
    provider: &dyn EmbeddingProvider,
    text: &str,
    fallback: FallbackPolicy,
) -> Outcome<Embedding> {
    if text.is_empty() {
        return Outcome::fresh(Embedding::zeros());
    }
    match provider.embed(text).await {
        Ok(embedding) => Outcome::fresh(embedding),
        Err(e) => {
            warn!("Embedding provider failed, using {fallback:?} fallback vector: {e}");
            Outcome::degraded(fallback.placeholder(), e.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a str,
    options: FeatureExtractionOptions,
}

#[derive(Debug, Serialize)]
struct FeatureExtractionOptions {
    wait_for_model: bool,
}

/// The inference API answers with either one vector or a batch of one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeatureExtractionResponse {
    Single(Vec<f32>),
    Batched(Vec<Vec<f32>>),
}

impl FeatureExtractionResponse {
    fn into_vector(self) -> Result<Vec<f32>, EmbeddingError> {
        match self {
            FeatureExtractionResponse::Single(v) => Ok(v),
            FeatureExtractionResponse::Batched(rows) => rows
                .into_iter()
                .next()
                .ok_or_else(|| EmbeddingError::Shape("empty batch".to_string())),
        }
    }
}

/// Hugging Face inference client for `sentence-transformers/all-MiniLM-L6-v2`.
#[derive(Clone)]
pub struct HuggingFaceEmbedder {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HuggingFaceEmbedder {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for HuggingFaceEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let body = FeatureExtractionRequest {
            inputs: text,
            options: FeatureExtractionOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        let vector = decode_response(&raw)?;
        debug!("Embedding received ({} dims)", vector.len());
        Ok(vector)
    }
}

fn decode_response(raw: &str) -> Result<Embedding, EmbeddingError> {
    let parsed: FeatureExtractionResponse =
        serde_json::from_str(raw).map_err(|e| EmbeddingError::Shape(e.to_string()))?;
    let vector = parsed.into_vector()?;
    Embedding::try_from(vector).map_err(|actual| EmbeddingError::Dimension {
        expected: EMBEDDING_DIM,
        actual,
    })
}
