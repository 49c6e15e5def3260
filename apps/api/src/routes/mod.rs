pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/evaluate", post(handlers::handle_evaluate_upload))
        .route("/api/v1/evaluate", post(handlers::handle_evaluate_text))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::embedding::HashEmbedder;
    use crate::scoring::{FitPipeline, ScoringConfig};

    const BOUNDARY: &str = "fitscore-test-boundary";

    fn app() -> Router {
        let pipeline =
            FitPipeline::new(Arc::new(HashEmbedder::new(128)), ScoringConfig::default()).unwrap();
        build_router(AppState {
            pipeline: Arc::new(pipeline),
            config: Config::default(),
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(filename: &str, file: &[u8], job_description: &str) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file);
        body.extend_from_slice(
            format!(
                "\r\n--{BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"job_description\"\r\n\r\n{job_description}\r\n--{BOUNDARY}--\r\n"
            )
            .as_bytes(),
        );

        Request::builder()
            .method("POST")
            .uri("/evaluate")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_loaded_model() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["ml_model_loaded"], true);
        assert_eq!(body["embedder"], "hash");
        assert_eq!(body["skill_strategy"], "substring");
    }

    #[tokio::test]
    async fn test_text_evaluation_returns_contract_fields() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/evaluate",
                json!({
                    "resume_text": "Python developer with 3 years of experience",
                    "job_description_text": "Looking for 5+ years experience with Python"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["experience_match_score"], 0.6);
        assert_eq!(body["missing_skills"], json!([]));
        assert!(body["matched_skills"]
            .as_array()
            .unwrap()
            .contains(&json!("python")));
        let fit = body["fit_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&fit));
        assert!(body["explanation"]
            .as_str()
            .unwrap()
            .starts_with("Semantic match score is"));
    }

    #[tokio::test]
    async fn test_text_evaluation_rejects_blank_job_description() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/evaluate",
                json!({"resume_text": "Python", "job_description_text": "   "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf_filename() {
        let response = app()
            .oneshot(multipart_request("resume.docx", b"hello", "Rust engineer"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Uploaded file is not a valid PDF");
    }

    #[tokio::test]
    async fn test_upload_rejects_blank_job_description() {
        let response = app()
            .oneshot(multipart_request("resume.pdf", b"%PDF-1.4", " "))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Job description cannot be empty");
    }

    #[tokio::test]
    async fn test_upload_rejects_bytes_that_are_not_pdf() {
        let response = app()
            .oneshot(multipart_request("resume.pdf", b"just text", "Rust engineer"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_requires_resume_part() {
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\n\
             Rust engineer\r\n--{BOUNDARY}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/evaluate")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
