use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ai_assistant_backend::config::Config;
use ai_assistant_backend::error::DispatchError;
use ai_assistant_backend::message::DispatchResult;
use ai_assistant_backend::routes::create_router;
use ai_assistant_backend::services::completion::{ChatCompletionRequest, ChatMessage, CompletionClient, GatewayClient};
use ai_assistant_backend::state::AppState;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tower::util::ServiceExt;

/// Stand-in for the chat-completion gateway.
#[derive(Clone)]
struct StubGateway {
    status: StatusCode,
    body: String,
    delay: Duration,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

impl StubGateway {
    fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn completion(content: &str) -> Self {
        let body = serde_json::json!({
            "id": "cmpl-1",
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
        });
        Self::new(StatusCode::OK, body.to_string())
    }
}

async fn completions(State(stub): State<StubGateway>, headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let auth = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()).map(str::to_string);
    stub.seen.lock().unwrap().push((auth, body));

    if !stub.delay.is_zero() {
        tokio::time::sleep(stub.delay).await;
    }

    (stub.status, [(header::CONTENT_TYPE, "application/json")], stub.body.clone())
}

/// Serve the stub on an ephemeral port and return its completions URL.
async fn spawn(stub: StubGateway) -> String {
    let app = Router::new().route("/v1/chat/completions", post(completions)).with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/v1/chat/completions")
}

fn request() -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: "google/gemini-3-flash-preview".to_string(),
        messages: vec![ChatMessage::system("be brief"), ChatMessage::user("vegan bakery")],
    }
}

#[tokio::test]
async fn test_success_returns_first_choice() {
    let stub = StubGateway::completion("#vegan #bakery #plantbased");
    let seen = stub.seen.clone();
    let url = spawn(stub).await;

    let client = GatewayClient::new(url, Duration::from_secs(5)).unwrap();
    let content = client.complete("test-key", &request()).await.unwrap();
    assert_eq!(content, "#vegan #bakery #plantbased");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(body["model"], "google/gemini-3-flash-preview");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "be brief");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "vegan bakery");
}

#[tokio::test]
async fn test_empty_choices_yield_empty_content() {
    let url = spawn(StubGateway::new(StatusCode::OK, r#"{"choices": []}"#)).await;

    let client = GatewayClient::new(url, Duration::from_secs(5)).unwrap();
    assert_eq!(client.complete("k", &request()).await.unwrap(), "");
}

#[tokio::test]
async fn test_429_is_rate_limited() {
    let url = spawn(StubGateway::new(StatusCode::TOO_MANY_REQUESTS, r#"{"error":"slow down"}"#)).await;

    let client = GatewayClient::new(url, Duration::from_secs(5)).unwrap();
    let err = client.complete("k", &request()).await.unwrap_err();
    assert!(matches!(err, DispatchError::RateLimited));
}

#[tokio::test]
async fn test_402_is_payment_required() {
    let url = spawn(StubGateway::new(StatusCode::PAYMENT_REQUIRED, r#"{"error":"no credits"}"#)).await;

    let client = GatewayClient::new(url, Duration::from_secs(5)).unwrap();
    let err = client.complete("k", &request()).await.unwrap_err();
    assert!(matches!(err, DispatchError::PaymentRequired));
}

#[tokio::test]
async fn test_other_status_is_generic_upstream_error() {
    let url = spawn(StubGateway::new(StatusCode::BAD_GATEWAY, "bad gateway")).await;

    let client = GatewayClient::new(url, Duration::from_secs(5)).unwrap();
    match client.complete("k", &request()).await.unwrap_err() {
        DispatchError::Upstream { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "bad gateway");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let url = spawn(StubGateway::new(StatusCode::OK, "<html>maintenance</html>")).await;

    let client = GatewayClient::new(url, Duration::from_secs(5)).unwrap();
    let err = client.complete("k", &request()).await.unwrap_err();
    assert!(matches!(err, DispatchError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mut stub = StubGateway::completion("late");
    stub.delay = Duration::from_secs(2);
    let url = spawn(stub).await;

    let client = GatewayClient::new(url, Duration::from_millis(100)).unwrap();
    let err = client.complete("k", &request()).await.unwrap_err();
    assert!(matches!(err, DispatchError::Transport(_)));
}

#[tokio::test]
async fn test_unreachable_gateway_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GatewayClient::new(format!("http://{addr}/v1/chat/completions"), Duration::from_secs(5)).unwrap();
    let err = client.complete("k", &request()).await.unwrap_err();
    assert!(matches!(err, DispatchError::Transport(_)));
}

#[tokio::test]
async fn test_end_to_end_lead_score() {
    let reply = r#"{"score": 77, "reason": "ok", "priority": "medium"}"#;
    let stub = StubGateway::completion(reply);
    let seen = stub.seen.clone();
    let url = spawn(stub).await;

    let vars: HashMap<&str, String> = HashMap::from([
        ("AI_GATEWAY_API_KEY", "e2e-key".to_string()),
        ("AI_GATEWAY_URL", url),
        ("AI_MODEL", "e2e-model".to_string()),
    ]);
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let app = create_router().with_state(Arc::new(AppState::from_config(&config).unwrap()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ai-assistant")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"type": "lead_score", "leadData": {"name": "Ada", "company": "Acme", "source": "referral", "value": 2500}}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let result: DispatchResult = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(result.content, reply);
    assert_eq!(result.kind, "lead_score");

    let seen = seen.lock().unwrap();
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer e2e-key"));
    assert_eq!(body["model"], "e2e-model");
    let user_prompt = body["messages"][1]["content"].as_str().unwrap();
    assert!(user_prompt.contains("Name: Ada, Company: Acme, Source: referral, Potential Value: $2500."));
}

#[tokio::test]
async fn test_end_to_end_rate_limit_passthrough() {
    let url = spawn(StubGateway::new(StatusCode::TOO_MANY_REQUESTS, "{}")).await;

    let vars: HashMap<&str, String> = HashMap::from([("AI_GATEWAY_API_KEY", "k".to_string()), ("AI_GATEWAY_URL", url)]);
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let app = create_router().with_state(Arc::new(AppState::from_config(&config).unwrap()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ai-assistant")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"kind": "hashtags", "prompt": "bread"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}
