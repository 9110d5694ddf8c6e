// Matching & scoring: cosine similarity, weighted aggregation, summaries, ranking.
// Everything in here is pure and safe to run from any number of threads.

pub mod engine;
pub mod ranking;
pub mod similarity;
pub mod summary;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("Vector dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),
}
