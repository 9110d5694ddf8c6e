pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/upload-resume",
            post(handlers::handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/add-job", post(handlers::handle_add_job))
        .route(
            "/api/match-candidates/:job_id",
            get(handlers::handle_match_candidates),
        )
        .route("/api/candidates", get(handlers::handle_list_candidates))
        .route("/api/candidates/:id", get(handlers::handle_get_candidate))
        .route("/api/jobs", get(handlers::handle_list_jobs))
        .route("/api/analytics", get(handlers::handle_analytics))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::matching::engine::MatchWeights;
    use crate::nlp::embedder::{FallbackPolicy, HuggingFaceEmbedder};
    use crate::nlp::extractor::EntityExtractor;

    /// State whose pool points at a closed port: every query fails to connect.
    fn test_state() -> AppState {
        let config = Config {
            database_url: "postgres://screener@127.0.0.1:9/screener_test".to_string(),
            embedding_api_url: "http://127.0.0.1:9/embed".to_string(),
            huggingface_api_key: String::new(),
            embedding_timeout_secs: 1,
            embedding_fallback: FallbackPolicy::Zero,
            weights: MatchWeights::default(),
            extra_skills: vec![],
            max_upload_bytes: 1024 * 1024,
            port: 0,
            rust_log: "info".to_string(),
        };
        AppState {
            db: PgPoolOptions::new()
                .acquire_timeout(Duration::from_secs(2))
                .connect_lazy(&config.database_url)
                .unwrap(),
            embedder: Arc::new(
                HuggingFaceEmbedder::new(
                    config.embedding_api_url.clone(),
                    String::new(),
                    Duration::from_secs(1),
                )
                .unwrap(),
            ),
            extractor: Arc::new(EntityExtractor::new().unwrap()),
            config,
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/upload-resume")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router(test_state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_add_job_requires_title_and_description() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/add-job")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title": "  ", "required_skills": ["Python"]}"#))
            .unwrap();
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "VALIDATION_ERROR"
        );
    }

    #[tokio::test]
    async fn test_upload_without_file_part() {
        let body = "--XBOUNDARY\r\n\
                    Content-Disposition: form-data; name=\"note\"\r\n\r\n\
                    hello\r\n\
                    --XBOUNDARY--\r\n";
        let response = build_router(test_state())
            .oneshot(multipart_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "No file part"
        );
    }

    #[tokio::test]
    async fn test_upload_rejects_disallowed_extension() {
        let body = "--XBOUNDARY\r\n\
                    Content-Disposition: form-data; name=\"file\"; filename=\"cv.rtf\"\r\n\
                    Content-Type: application/rtf\r\n\r\n\
                    {\\rtf1 Python}\r\n\
                    --XBOUNDARY--\r\n";
        let response = build_router(test_state())
            .oneshot(multipart_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("File type not allowed"));
    }

    #[tokio::test]
    async fn test_match_candidates_rejects_negative_weight() {
        let request = Request::builder()
            .uri("/api/match-candidates/00000000-0000-0000-0000-000000000001?skill_weight=-0.5")
            .body(Body::empty())
            .unwrap();
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "SCORING_ERROR");
    }

    #[tokio::test]
    async fn test_unreachable_database_reports_database_error() {
        let response = build_router(test_state())
            .oneshot(Request::builder().uri("/api/jobs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"]["code"], "DATABASE_ERROR");
    }
}
