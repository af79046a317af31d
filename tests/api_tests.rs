use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use policy_simplifier::domain::model::Prompt;
use policy_simplifier::domain::ports::CompletionService;
use policy_simplifier::server::{self, AppState};
use policy_simplifier::{Result, SimplifierEngine, SimplifyError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::util::ServiceExt;

enum FakeMode {
    Raw(String),
    UpstreamFailure,
}

struct FakeCompletion {
    mode: FakeMode,
    calls: AtomicUsize,
}

impl FakeCompletion {
    fn returning(raw: &str) -> Arc<Self> {
        Arc::new(Self {
            mode: FakeMode::Raw(raw.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            mode: FakeMode::UpstreamFailure,
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionService for FakeCompletion {
    async fn complete(&self, _prompt: &Prompt) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            FakeMode::Raw(raw) => Ok(raw.clone()),
            FakeMode::UpstreamFailure => Err(SimplifyError::UpstreamStatus {
                status: 500,
                body: "upstream broke".to_string(),
            }),
        }
    }
}

fn router_with(service: Arc<FakeCompletion>, max_input_chars: usize) -> axum::Router {
    let engine = SimplifierEngine::new(service, max_input_chars);
    server::build_router(
        AppState::new(engine),
        server::body_limit_bytes(max_input_chars),
    )
}

fn summarize_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/summarize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_valid_request_returns_canonical_shape() {
    let service = FakeCompletion::returning(
        r#"{"summary":"- Short","pros":["- a"],"cons":null,"eligibility":"Everyone","actionSteps":[]}"#,
    );
    let app = router_with(service.clone(), 32_000);

    let response = app
        .oneshot(summarize_request(r#"{"text":"A policy document"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["summary"], "Short");
    assert_eq!(json["pros"], serde_json::json!(["a"]));
    assert_eq!(json["cons"], serde_json::json!([]));
    assert_eq!(json["eligibility"], serde_json::json!(["Everyone"]));
    assert_eq!(json["actionSteps"], serde_json::json!([]));
    assert_eq!(service.call_count(), 1);
}

#[tokio::test]
async fn test_empty_text_is_rejected_before_upstream() {
    let service = FakeCompletion::returning("{}");
    let app = router_with(service.clone(), 32_000);

    let response = app
        .oneshot(summarize_request(r#"{"text":"   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Please paste some text to simplify.");
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_missing_text_field_is_rejected_before_upstream() {
    let service = FakeCompletion::returning("{}");
    let app = router_with(service.clone(), 32_000);

    let response = app
        .oneshot(summarize_request(r#"{"document":"wrong key"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Missing 'text' (string)");
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_non_string_text_is_rejected_before_upstream() {
    let service = FakeCompletion::returning("{}");
    let app = router_with(service.clone(), 32_000);

    let response = app
        .oneshot(summarize_request(r#"{"text": 42}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_oversized_text_is_rejected_before_upstream() {
    let service = FakeCompletion::returning("{}");
    let app = router_with(service.clone(), 10);

    let response = app
        .oneshot(summarize_request(r#"{"text":"thirteen chars"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Try a shorter excerpt"));
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_get_method_is_not_allowed_and_never_calls_upstream() {
    let service = FakeCompletion::returning("{}");
    let app = router_with(service.clone(), 32_000);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/summarize")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Method not allowed");
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_upstream_failure_returns_failure_envelope() {
    let service = FakeCompletion::failing();
    let app = router_with(service, 32_000);

    let response = app
        .oneshot(summarize_request(r#"{"text":"A policy document"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Summarization failed.");
    assert!(json.get("summary").is_none());
    // The raw upstream body never reaches the client.
    assert!(!json.to_string().contains("upstream broke"));
}

#[tokio::test]
async fn test_unusable_model_output_maps_to_parse_guidance() {
    let service = FakeCompletion::returning("{\"summary\": \"truncated mid-str");
    let app = router_with(service, 32_000);

    let response = app
        .oneshot(summarize_request(r#"{"text":"A policy document"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = response_json(response).await;
    assert_eq!(
        json["error"],
        "Couldn't get a structured response. Try a shorter excerpt."
    );
}

#[tokio::test]
async fn test_cors_preflight_is_permissive() {
    let service = FakeCompletion::returning("{}");
    let app = router_with(service.clone(), 32_000);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/summarize")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_transport_body_limit_applies() {
    let service = FakeCompletion::returning("{}");
    let app = router_with(service.clone(), 100);

    let huge = "x".repeat(10_000);
    let response = app
        .oneshot(summarize_request(&format!(r#"{{"text":"{}"}}"#, huge)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Request body too large");
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let service = FakeCompletion::returning("{}");
    let app = router_with(service, 32_000);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_freeform_upstream_text_degrades_to_summary_only() {
    let service = FakeCompletion::returning("Plain prose answer with no braces at all.");
    let app = router_with(service, 32_000);

    let response = app
        .oneshot(summarize_request(r#"{"text":"A policy document"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["summary"], "Plain prose answer with no braces at all.");
    assert_eq!(json["pros"], serde_json::json!([]));
    assert_eq!(json["actionSteps"], serde_json::json!([]));
}
