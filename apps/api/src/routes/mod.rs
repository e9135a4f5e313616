pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/parse-resume",
            post(handlers::handle_parse_resume).layer(upload_limit),
        )
        .route(
            "/generate-question",
            post(handlers::handle_generate_question),
        )
        .route("/validate-answer", post(handlers::handle_validate_answer))
        .route("/tts", post(handlers::handle_tts))
        .layer(cors)
        .with_state(state)
}

/// Browser access for the configured origins only. Credentials are allowed,
/// so methods and headers are mirrored rather than wildcarded.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::StubProvider;

    const BOUNDARY: &str = "interview-test-boundary";

    fn router(provider: StubProvider) -> Router {
        router_with(Arc::new(provider))
    }

    fn router_with(provider: Arc<StubProvider>) -> Router {
        router_with_config(provider, Config::default())
    }

    fn router_with_config(provider: Arc<StubProvider>, config: Config) -> Router {
        build_router(AppState { provider, config })
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/parse-resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(StubProvider::empty())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_parse_resume_returns_selected_skills() {
        let provider = Arc::new(StubProvider::text(
            r#"{"skills": [{"name": "Python", "category": "technical"}, {"name": "Leadership", "category": "soft"}]}"#,
        ));
        let response = router_with(provider.clone())
            .oneshot(multipart_request("file", "resume.pdf", "application/pdf", b"%PDF-1.4"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!([
                {"id": "skill-0", "name": "Python", "category": "technical", "selected": true},
                {"id": "skill-1", "name": "Leadership", "category": "soft", "selected": true}
            ])
        );

        let (_, request) = provider.last_request();
        assert_eq!(
            request["contents"][0]["parts"][0]["inlineData"]["mimeType"],
            "application/pdf"
        );
    }

    #[tokio::test]
    async fn test_parse_resume_without_text_returns_empty_list() {
        let response = router(StubProvider::empty())
            .oneshot(multipart_request("file", "resume.pdf", "application/pdf", b"%PDF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_parse_resume_requires_file_field() {
        let provider = Arc::new(StubProvider::empty());
        let response = router_with(provider.clone())
            .oneshot(multipart_request("attachment", "resume.pdf", "application/pdf", b"%PDF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_parse_resume_oversized_upload_is_413() {
        let provider = Arc::new(StubProvider::empty());
        let config = Config {
            max_upload_bytes: 16,
            ..Config::default()
        };
        let response = router_with_config(provider.clone(), config)
            .oneshot(multipart_request("file", "resume.pdf", "application/pdf", &[b'x'; 1000]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_parse_resume_truncated_multipart_is_400() {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"resume.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             %PDF-1.4 cut off before the closing boundary"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/parse-resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        let provider = Arc::new(StubProvider::empty());
        let response = router_with(provider.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_validate_answer_float_score_is_accepted() {
        let response = router(StubProvider::text(r#"{"score": 7.0, "feedback": "ok"}"#))
            .oneshot(json_request(
                "/validate-answer",
                json!({"question": "What is a closure?", "answer": "A captured scope"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"score": 7, "feedback": "ok"}));
    }

    #[tokio::test]
    async fn test_parse_resume_provider_failure_is_500_with_detail() {
        let response = router(StubProvider::failing("RESOURCE_EXHAUSTED"))
            .oneshot(multipart_request("file", "resume.pdf", "application/pdf", b"%PDF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("RESOURCE_EXHAUSTED"));
    }

    #[tokio::test]
    async fn test_generate_question_end_to_end() {
        let response = router(StubProvider::text(
            "  How would you use a decorator to cache function results in Python?\n",
        ))
        .oneshot(json_request(
            "/generate-question",
            json!({
                "selected_skills": [
                    {"id": "skill-0", "name": "Python", "category": "technical", "selected": true}
                ],
                "previous_questions": ["What is a closure?"]
            }),
        ))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let question = body_json(response).await["question"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(!question.is_empty());
        assert_ne!(question, "What is a closure?");
        assert_eq!(
            question,
            "How would you use a decorator to cache function results in Python?"
        );
    }

    #[tokio::test]
    async fn test_generate_question_fallback() {
        let response = router(StubProvider::empty())
            .oneshot(json_request(
                "/generate-question",
                json!({"selected_skills": [], "previous_questions": []}),
            ))
            .await
            .unwrap();
        assert_eq!(
            body_json(response).await,
            json!({"question": "Could not generate question."})
        );
    }

    #[tokio::test]
    async fn test_generate_question_rejects_missing_fields() {
        let response = router(StubProvider::empty())
            .oneshot(json_request("/generate-question", json!({"selected_skills": []})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_validate_answer_defaults() {
        let response = router(StubProvider::text("{}"))
            .oneshot(json_request(
                "/validate-answer",
                json!({"question": "What is a closure?", "answer": "No idea"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"score": 0, "feedback": "No feedback provided."})
        );
    }

    #[tokio::test]
    async fn test_validate_answer_provider_failure_is_500() {
        let response = router(StubProvider::failing("deadline exceeded"))
            .oneshot(json_request(
                "/validate-answer",
                json!({"question": "q", "answer": "a"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_tts_failure_is_null_audio() {
        let response = router(StubProvider::failing("unsupported modality"))
            .oneshot(json_request("/tts", json!({"text": "Hello"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"audio": null}));
    }

    #[tokio::test]
    async fn test_tts_returns_base64_audio() {
        let pcm = b"\x00\x01RIFF\xff".to_vec();
        let response = router(StubProvider::body(json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "audio/wav", "data": STANDARD.encode(&pcm)}}
            ]}}]
        })))
        .oneshot(json_request("/tts", json!({"text": "Hello"})))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let audio = body_json(response).await["audio"]
            .as_str()
            .unwrap()
            .to_string();
        assert_eq!(STANDARD.decode(audio).unwrap(), pcm);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_dev_origin() {
        let response = router(StubProvider::empty())
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/tts")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_cors_ignores_unknown_origin() {
        let response = router(StubProvider::empty())
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/tts")
                    .header(header::ORIGIN, "http://evil.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
