pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::health_handler))
        .route("/health", get(health::health_handler))
        // Resume uploads (multipart `file`)
        .route("/api/v1/resume/parse", post(handlers::handle_parse))
        .route("/api/v1/resume/analyze", post(handlers::handle_analyze))
        .route("/api/v1/resume/insights", post(handlers::handle_insights))
        .route("/api/v1/resume/match", post(handlers::handle_match))
        // Generators (JSON)
        .route("/api/v1/cover-letter", post(handlers::handle_cover_letter))
        .route("/api/v1/resume-summary", post(handlers::handle_resume_summary))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::Orchestrator;
    use crate::config::Config;
    use crate::knowledge::KnowledgeBase;
    use crate::research::{QueryExecutor, ResearchDispatcher, RetryPolicy};
    use crate::testing::{ScriptedLlm, ScriptedResearch};

    const BOUNDARY: &str = "resume-insight-test-boundary";

    fn app(llm: Arc<ScriptedLlm>) -> Router {
        app_with_env(llm, &[])
    }

    fn app_with_env(llm: Arc<ScriptedLlm>, env: &[(&str, &str)]) -> Router {
        let mut vars: Vec<(String, String)> = vec![("ANTHROPIC_API_KEY".into(), "test-key".into())];
        vars.extend(env.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        let config = Config::from_lookup(|key| {
            vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
        .unwrap();
        let policy = RetryPolicy {
            max_attempts: 1,
            attempt_timeout: Duration::from_secs(5),
            retry_delay: Duration::ZERO,
        };
        let executor = QueryExecutor::new(Arc::new(ScriptedResearch::new()), policy);
        let orchestrator = Orchestrator::new(llm.clone(), ResearchDispatcher::new(executor, 2));

        build_router(AppState {
            llm,
            knowledge_base: Arc::new(KnowledgeBase::seeded()),
            orchestrator,
            config,
        })
    }

    /// One multipart part: (field name, optional (file name, content type), payload).
    type Part<'a> = (&'a str, Option<(&'a str, &'a str)>, &'a [u8]);

    fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, file, payload) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file {
                Some((file_name, content_type)) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(payload);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    /// Single-page PDF whose only content stream is empty.
    fn blank_pdf() -> Vec<u8> {
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>",
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>",
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << >> /Contents 4 0 R >>",
            "<< /Length 0 >>\nstream\n\nendstream",
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref_offset = pdf.len();
        let entries = objects.len() + 1;
        pdf.extend_from_slice(format!("xref\n0 {entries}\n0000000000 65535 f \n").as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!("trailer\n<< /Size {entries} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n")
                .as_bytes(),
        );
        pdf
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let (status, body) = send(
            app(Arc::new(ScriptedLlm::new())),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["knowledge_base_documents"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_root_serves_status() {
        let (status, body) = send(
            app(Arc::new(ScriptedLlm::new())),
            Request::get("/").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_non_pdf_upload_rejected_before_any_model_call() {
        let llm = Arc::new(ScriptedLlm::new().fallback("unused"));
        let request = multipart_request(
            "/api/v1/resume/analyze",
            &[("file", Some(("resume.txt", "text/plain")), b"plain text resume".as_slice())],
        );

        let (status, body) = send(app(llm.clone()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_empty_pdf_rejected() {
        let llm = Arc::new(ScriptedLlm::new().fallback("unused"));
        let request = multipart_request(
            "/api/v1/resume/parse",
            &[("file", Some(("resume.pdf", "application/pdf")), b"".as_slice())],
        );

        let (status, _) = send(app(llm.clone()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_field_rejected() {
        let request = multipart_request(
            "/api/v1/resume/insights",
            &[("job_description", None, b"Rust engineer".as_slice())],
        );

        let (status, body) = send(app(Arc::new(ScriptedLlm::new())), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("file"));
    }

    #[tokio::test]
    async fn test_match_requires_job_description() {
        let llm = Arc::new(ScriptedLlm::new().fallback("unused"));
        let request = multipart_request(
            "/api/v1/resume/match",
            &[("file", Some(("resume.pdf", "application/pdf")), b"%PDF-1.4 not really".as_slice())],
        );

        let (status, body) = send(app(llm.clone()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("job_description"));
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_unprocessable() {
        let llm = Arc::new(ScriptedLlm::new().fallback("unused"));
        let request = multipart_request(
            "/api/v1/resume/parse",
            &[(
                "file",
                Some(("resume.pdf", "application/pdf")),
                b"definitely not a pdf".as_slice(),
            )],
        );

        let (status, body) = send(app(llm.clone()), request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "PDF_ERROR");
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_pdf_without_text_is_unprocessable_before_any_model_call() {
        let llm = Arc::new(ScriptedLlm::new().fallback("unused"));
        let pdf = blank_pdf();
        let request = multipart_request(
            "/api/v1/resume/parse",
            &[("file", Some(("blank.pdf", "application/pdf")), pdf.as_slice())],
        );

        let (status, body) = send(app(llm.clone()), request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_upload_over_body_limit_is_payload_too_large() {
        let llm = Arc::new(ScriptedLlm::new().fallback("unused"));
        let oversized = vec![b'%'; 8 * 1024];
        let request = multipart_request(
            "/api/v1/resume/parse",
            &[("file", Some(("big.pdf", "application/pdf")), oversized.as_slice())],
        );

        let (status, body) = send(
            app_with_env(llm.clone(), &[("MAX_UPLOAD_BYTES", "1024")]),
            request,
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_cover_letter_missing_field_uses_error_envelope() {
        let llm = Arc::new(ScriptedLlm::new().fallback("unused"));
        let request = json_request(
            "/api/v1/cover-letter",
            serde_json::json!({
                "resume_text": "Rust developer",
                "job_description": "Rust backend role",
                "job_title": "Engineer"
            }),
        );

        let (status, body) = send(app(llm.clone()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("company"));
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_resume_summary_malformed_json_uses_error_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/resume-summary")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(app(Arc::new(ScriptedLlm::new())), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_cover_letter_endpoint() {
        let llm = Arc::new(ScriptedLlm::new().on("cover letter", "Dear hiring team,"));
        let request = json_request(
            "/api/v1/cover-letter",
            serde_json::json!({
                "resume_text": "Rust developer",
                "job_description": "Rust backend role",
                "company": "Acme",
                "job_title": "Engineer"
            }),
        );

        let (status, body) = send(app(llm), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cover_letter"], "Dear hiring team,");
    }

    #[tokio::test]
    async fn test_resume_summary_blank_field_is_bad_request() {
        let request = json_request(
            "/api/v1/resume-summary",
            serde_json::json!({"resume_text": "Rust developer", "job_description": " "}),
        );

        let (status, body) = send(app(Arc::new(ScriptedLlm::new())), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_resume_summary_endpoint() {
        let llm = Arc::new(ScriptedLlm::new().on("Professional Summary", "Backend engineer."));
        let request = json_request(
            "/api/v1/resume-summary",
            serde_json::json!({"resume_text": "Rust developer", "job_description": "Rust role"}),
        );

        let (status, body) = send(app(llm), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume_summary"], "Backend engineer.");
    }

    #[tokio::test]
    async fn test_model_outage_maps_to_bad_gateway() {
        let llm = Arc::new(ScriptedLlm::new().fail_on("cover letter"));
        let request = json_request(
            "/api/v1/cover-letter",
            serde_json::json!({
                "resume_text": "Rust developer",
                "job_description": "Rust backend role",
                "company": "Acme",
                "job_title": "Engineer"
            }),
        );

        let (status, body) = send(app(llm), request).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
    }
}
