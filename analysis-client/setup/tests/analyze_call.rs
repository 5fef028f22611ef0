use std::sync::Arc;

use analysis_configuration::AppConfig;
use analysis_domain::{AnalysisOptions, AnalysisPayload, AnalysisPort, AnalysisResponse, DomainError};
use analysis_setup::{AnalyzeError, Application};
use async_trait::async_trait;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

struct FixedPort {
    status: u16,
    body: &'static str,
}

#[async_trait]
impl AnalysisPort for FixedPort {
    async fn submit(&self, _payload: &AnalysisPayload) -> Result<AnalysisResponse, DomainError> {
        Ok(AnalysisResponse::new(self.status, self.body))
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.api.token = "test-token".to_string();
    config.api.project_id = "proj-test".to_string();
    config
}

async fn spawn_ok_endpoint() -> String {
    let app = Router::new().route(
        "/pubchat/api/analize",
        post(|Json(payload): Json<Value>| async move {
            Json(json!({
                "result": "ok",
                "client_id": payload["client_id"],
                "summary": "العميل طلب متابعة",
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock endpoint");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/pubchat/api/analize")
}

#[tokio::test]
async fn end_to_end_success_prints_payload_and_results() {
    let mut config = test_config();
    config.api.endpoint = spawn_ok_endpoint().await;
    let app = Application::new(config).expect("application builds");
    let mut out = Vec::new();

    let result = app
        .run(
            "https://cdn.example/call-cut.mp3",
            AnalysisOptions::new().with_client_id("addjo30-2er3fvd"),
            &mut out,
        )
        .await
        .expect("analysis succeeds");

    assert_eq!(result["result"], "ok");
    assert_eq!(result["client_id"], "addjo30-2er3fvd");

    let printed = String::from_utf8(out).expect("utf-8");
    assert!(printed.starts_with("request payload:\n{"));
    assert!(printed.contains("\"project_id\":\"proj-test\""));
    assert!(printed.contains("results:\n{\n  \""));
    assert!(printed.contains("العميل طلب متابعة"));
}

#[tokio::test]
async fn server_error_prints_body_and_fails_with_status() {
    let app = Application::with_port(
        test_config(),
        Arc::new(FixedPort {
            status: 500,
            body: "Internal Server Error",
        }),
    );
    let mut out = Vec::new();

    let err = app
        .run("https://cdn.example/call.mp3", AnalysisOptions::new(), &mut out)
        .await
        .expect_err("500 fails");

    assert_eq!(err.api_status(), Some(500));
    assert!(err.to_string().contains("500"));
    let printed = String::from_utf8(out).expect("utf-8");
    assert!(printed.ends_with("Internal Server Error\n"));
    assert!(!printed.contains("results:"));
}

#[tokio::test]
async fn missing_recording_fails_after_payload_is_shown() {
    let app = Application::with_port(
        test_config(),
        Arc::new(FixedPort {
            status: 200,
            body: "{}",
        }),
    );
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("call-cut.mp3");
    let mut out = Vec::new();

    let err = app
        .run(path.to_str().expect("utf-8 path"), AnalysisOptions::new(), &mut out)
        .await
        .expect_err("file does not exist");

    assert!(matches!(err, AnalyzeError::Application(_)));
    assert_eq!(err.api_status(), None);
    let printed = String::from_utf8(out).expect("utf-8");
    assert!(printed.starts_with("request payload:"));
    assert!(!printed.contains("results:"));
}
