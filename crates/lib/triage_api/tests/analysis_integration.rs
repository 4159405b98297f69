//! Integration tests for the analysis routes, with a canned completion provider.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use triage_api::config::ApiConfig;
use triage_api::{AppState, router};
use triage_core::analysis::{AnalysisError, CompletionProvider};

/// Provider returning a fixed answer and recording the prompts it saw.
struct CannedProvider {
    answer: Result<String, String>,
    prompts: Mutex<Vec<(String, String, f32)>>,
}

impl CannedProvider {
    fn ok(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(answer.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(reason.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CompletionProvider for CannedProvider {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, AnalysisError> {
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string(), temperature));
        self.answer.clone().map_err(AnalysisError::Provider)
    }
}

fn app_with(provider: Arc<CannedProvider>) -> axum::Router {
    let state = AppState::with_provider(
        ApiConfig::with_webhook("http://127.0.0.1:9/unused"),
        reqwest::Client::new(),
        provider,
    );
    router(state)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

#[tokio::test]
async fn analyze_returns_classification() {
    let provider = CannedProvider::ok("Category: technical-issue\nUrgency: high\nHuman attention: no");
    let app = app_with(provider.clone());

    let resp = app
        .oneshot(post_json(
            "/analyze-support-request",
            r#"{"message": "Database is down"}"#,
        ))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let json = read_json(resp).await;
    assert_eq!(json["category"], "technical-issue");
    assert_eq!(json["urgency"], "high");
    assert_eq!(json["needs_human"], false);
    assert!(json["raw_analysis"].as_str().unwrap().contains("Urgency: high"));

    let prompts = provider.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].1, "Database is down");
    assert!((prompts[0].2 - 0.1).abs() < f32::EPSILON);
}

#[tokio::test]
async fn analyze_without_body_is_rejected() {
    let app = app_with(CannedProvider::ok("unused"));
    let resp = app
        .oneshot(post_json("/analyze-support-request", ""))
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(resp).await["error"], "No JSON data provided");
}

#[tokio::test]
async fn analyze_without_message_is_rejected() {
    let provider = CannedProvider::ok("unused");
    let app = app_with(provider.clone());
    let resp = app
        .oneshot(post_json("/analyze-support-request", r#"{"message": ""}"#))
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(resp).await["error"], "No message provided");
    assert!(provider.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn provider_failure_is_500_with_reason() {
    let app = app_with(CannedProvider::failing("rate limited"));
    let resp = app
        .oneshot(post_json("/analyze-support-request", r#"{"message": "hi"}"#))
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(resp).await["error"], "Provider error: rate limited");
}

#[tokio::test]
async fn generate_response_builds_triage_response() {
    let provider = CannedProvider::ok("Sorry about that, we will refund you.");
    let app = app_with(provider.clone());

    let resp = app
        .oneshot(post_json(
            "/generate-response",
            r#"{"message": "Charged twice", "category": "billing-question", "urgency": "low", "email": "a@b.c"}"#,
        ))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let json = read_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["details"]["category"], "Billing Question");
    assert_eq!(json["details"]["urgency"], "low");
    assert_eq!(json["details"]["ticketInfo"]["created"], true);
    assert_eq!(
        json["details"]["suggestedReply"],
        "Sorry about that, we will refund you."
    );
    assert!(json["metadata"]["timestamp"].is_string());

    let prompts = provider.prompts.lock().unwrap();
    assert!(prompts[0].0.contains("billing-question"));
    assert!((prompts[0].2 - 0.7).abs() < f32::EPSILON);
}

#[tokio::test]
async fn generate_response_defaults_category_and_urgency() {
    let app = app_with(CannedProvider::ok("Hello"));
    let resp = app
        .oneshot(post_json("/generate-response", r#"{"message": "Question"}"#))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let json = read_json(resp).await;
    assert_eq!(json["details"]["category"], "General Inquiry");
    assert_eq!(json["details"]["urgency"], "medium");
}

#[tokio::test]
async fn generate_response_without_message_is_rejected() {
    let app = app_with(CannedProvider::ok("unused"));
    let resp = app
        .oneshot(post_json("/generate-response", r#"{"category": "billing-question"}"#))
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(resp).await, json!({"error": "No message provided"}));
}
