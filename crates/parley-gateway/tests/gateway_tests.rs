//! Integration tests for the request gateway against an in-process backend.
//!
//! Each test spins up its own axum server on an ephemeral port (or
//! deliberately points at a dead port) and drives the gateway through the
//! public [`ChatTransport`] contract: success, 4xx with and without an
//! `error` body, 5xx, malformed success body, refused connection, timeout.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use parley_gateway::{ChatGateway, ChatTransport, FailureKind, SendOutcome};

// =============================================================================
// Helpers
// =============================================================================

/// Serve `app` on an ephemeral port and return the chat endpoint URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/chat", addr)
}

fn gateway(endpoint: String) -> ChatGateway {
    ChatGateway::new(endpoint, Duration::from_secs(5))
}

fn expect_failure(outcome: SendOutcome) -> (FailureKind, String) {
    match outcome {
        SendOutcome::Failure(f) => (f.kind, f.message),
        SendOutcome::Reply(text) => panic!("expected failure, got reply: {}", text),
    }
}

// =============================================================================
// Success path
// =============================================================================

#[tokio::test]
async fn test_reply_on_well_formed_response() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async { Json(json!({"response": "hi there"})) }),
    );
    let endpoint = serve(app).await;

    let outcome = gateway(endpoint).send("hello", Uuid::new_v4()).await;
    assert_eq!(outcome, SendOutcome::Reply("hi there".to_string()));
}

#[tokio::test]
async fn test_request_body_carries_message_and_session() {
    // Echo the received fields back so the outbound wire shape is observable.
    let app = Router::new().route(
        "/api/chat",
        post(|Json(body): Json<Value>| async move {
            let message = body["message"].as_str().unwrap_or("<missing>");
            let session_id = body["session_id"].as_str().unwrap_or("<missing>");
            Json(json!({"response": format!("{}|{}", message, session_id)}))
        }),
    );
    let endpoint = serve(app).await;

    let sid = Uuid::new_v4();
    let outcome = gateway(endpoint).send("hello backend", sid).await;
    assert_eq!(
        outcome,
        SendOutcome::Reply(format!("hello backend|{}", sid))
    );
}

#[tokio::test]
async fn test_reply_preserves_line_breaks() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async { Json(json!({"response": "first\nsecond"})) }),
    );
    let endpoint = serve(app).await;

    let outcome = gateway(endpoint).send("hi", Uuid::new_v4()).await;
    assert_eq!(outcome, SendOutcome::Reply("first\nsecond".to_string()));
}

// =============================================================================
// HTTP error statuses
// =============================================================================

#[tokio::test]
async fn test_404_without_error_body() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async { (StatusCode::NOT_FOUND, Json(json!({}))) }),
    );
    let endpoint = serve(app).await;

    let (kind, message) = expect_failure(gateway(endpoint).send("hi", Uuid::new_v4()).await);
    assert_eq!(kind, FailureKind::ClientError);
    assert_eq!(message, "Invalid request. Please try again.");
}

#[tokio::test]
async fn test_404_with_error_body_detail() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "unknown session"}))) }),
    );
    let endpoint = serve(app).await;

    let (kind, message) = expect_failure(gateway(endpoint).send("hi", Uuid::new_v4()).await);
    assert_eq!(kind, FailureKind::ClientError);
    assert_eq!(message, "unknown session");
}

#[tokio::test]
async fn test_400_with_empty_error_detail_falls_back() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async { (StatusCode::BAD_REQUEST, Json(json!({"error": ""}))) }),
    );
    let endpoint = serve(app).await;

    let (kind, message) = expect_failure(gateway(endpoint).send("hi", Uuid::new_v4()).await);
    assert_eq!(kind, FailureKind::ClientError);
    assert_eq!(message, "Invalid request. Please try again.");
}

#[tokio::test]
async fn test_500_is_server_error() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let endpoint = serve(app).await;

    let (kind, message) = expect_failure(gateway(endpoint).send("hi", Uuid::new_v4()).await);
    assert_eq!(kind, FailureKind::ServerError);
    assert_eq!(message, "Server error. Please try again later.");
}

#[tokio::test]
async fn test_503_is_server_error() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": "draining"}))) }),
    );
    let endpoint = serve(app).await;

    // 5xx keeps the fixed message even when a detail is present
    let (kind, message) = expect_failure(gateway(endpoint).send("hi", Uuid::new_v4()).await);
    assert_eq!(kind, FailureKind::ServerError);
    assert_eq!(message, "Server error. Please try again later.");
}

// =============================================================================
// Malformed success body
// =============================================================================

#[tokio::test]
async fn test_200_without_response_field_is_unknown() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async { Json(json!({"answer": "hi"})) }),
    );
    let endpoint = serve(app).await;

    let (kind, message) = expect_failure(gateway(endpoint).send("hi", Uuid::new_v4()).await);
    assert_eq!(kind, FailureKind::Unknown);
    assert_eq!(message, "An unexpected error occurred. Please try again.");
}

#[tokio::test]
async fn test_200_with_non_json_body_is_unknown() {
    let app = Router::new().route("/api/chat", post(|| async { "plain text" }));
    let endpoint = serve(app).await;

    let (kind, _) = expect_failure(gateway(endpoint).send("hi", Uuid::new_v4()).await);
    assert_eq!(kind, FailureKind::Unknown);
}

// =============================================================================
// Transport failures
// =============================================================================

#[tokio::test]
async fn test_refused_connection_is_unreachable() {
    // Bind to learn a free port, then drop the listener so nothing accepts.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = format!("http://{}/api/chat", addr);
    let (kind, message) = expect_failure(gateway(endpoint).send("hi", Uuid::new_v4()).await);
    assert_eq!(kind, FailureKind::Unreachable);
    assert_eq!(
        message,
        "Unable to reach the server. Please ensure the backend is running."
    );
}

#[tokio::test]
async fn test_slow_backend_is_timeout() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(json!({"response": "too late"}))
        }),
    );
    let endpoint = serve(app).await;

    let gateway = ChatGateway::new(endpoint, Duration::from_millis(200));
    let (kind, message) = expect_failure(gateway.send("hi", Uuid::new_v4()).await);
    assert_eq!(kind, FailureKind::Timeout);
    assert_eq!(message, "Request timed out. Please try again.");
}

// =============================================================================
// Gateway statelessness
// =============================================================================

#[tokio::test]
async fn test_sequential_calls_are_independent() {
    let app = Router::new().route(
        "/api/chat",
        post(|Json(body): Json<Value>| async move {
            let message = body["message"].as_str().unwrap_or_default().to_string();
            if message == "fail" {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))).into_response()
            } else {
                Json(json!({"response": message})).into_response()
            }
        }),
    );
    let endpoint = serve(app).await;
    let gateway = gateway(endpoint);
    let sid = Uuid::new_v4();

    assert_eq!(
        gateway.send("one", sid).await,
        SendOutcome::Reply("one".to_string())
    );
    let (kind, _) = expect_failure(gateway.send("fail", sid).await);
    assert_eq!(kind, FailureKind::ServerError);
    // A failure leaves the gateway fully usable
    assert_eq!(
        gateway.send("two", sid).await,
        SendOutcome::Reply("two".to_string())
    );
}
