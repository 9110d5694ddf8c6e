use anyhow::{Context, Result};

use crate::matching::engine::MatchWeights;
use crate::nlp::embedder::{FallbackPolicy, DEFAULT_EMBEDDING_URL};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub embedding_api_url: String,
    /// Empty is allowed: requests still go out and fall back on rejection.
    pub huggingface_api_key: String,
    pub embedding_timeout_secs: u64,
    pub embedding_fallback: FallbackPolicy,
    pub weights: MatchWeights,
    pub extra_skills: Vec<String>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let embedding_fallback = match std::env::var("EMBEDDING_FALLBACK") {
            Ok(v) => FallbackPolicy::parse(&v)
                .with_context(|| format!("EMBEDDING_FALLBACK must be 'random' or 'zero', got '{v}'"))?,
            Err(_) => FallbackPolicy::default(),
        };

        let defaults = MatchWeights::default();
        let weights = MatchWeights {
            similarity: parse_env_or("SIMILARITY_WEIGHT", defaults.similarity)?,
            skills: parse_env_or("SKILL_WEIGHT", defaults.skills)?,
        }
        .validate()?;

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            embedding_api_url: std::env::var("EMBEDDING_API_URL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_URL.to_string()),
            huggingface_api_key: std::env::var("HUGGINGFACE_API_KEY").unwrap_or_default(),
            embedding_timeout_secs: parse_env_or("EMBEDDING_TIMEOUT_SECS", 30)?,
            embedding_fallback,
            weights,
            extra_skills: std::env::var("EXTRA_SKILLS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
            max_upload_bytes: parse_env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            port: parse_env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{v}'")),
        Err(_) => Ok(default),
    }
}

/// Comma-separated list, blanks dropped.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_drops_blanks() {
        assert_eq!(split_list(" Rust, ,Go ,"), vec!["Rust", "Go"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_parse_env_or_default_when_unset() {
        let port: u16 = parse_env_or("SCREENER_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }
}
