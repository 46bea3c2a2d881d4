//! Router-level tests for the public HTTP API.
//!
//! Requests are driven through the router with `tower::ServiceExt::oneshot`;
//! the uptime source is replaced with fakes where the test needs control over
//! the host probe.
//!
//! Run with: cargo test --test http_api
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use hostprobe::config::ProbeConfig;
use hostprobe::probe::{ProbeError, UptimeSource};
use hostprobe::{create_router, AppState};

/// Returns a different uptime on each call so responses can be matched to requests
struct CountingUptime {
    calls: AtomicUsize,
}

#[async_trait]
impl UptimeSource for CountingUptime {
    async fn uptime(&self) -> Result<String, ProbeError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("up {} minutes", n))
    }
}

/// Simulates a host without the uptime utility
struct MissingUptime;

#[async_trait]
impl UptimeSource for MissingUptime {
    async fn uptime(&self) -> Result<String, ProbeError> {
        Err(ProbeError::Spawn(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "uptime: command not found",
        )))
    }
}

fn counting_router() -> (Router, Arc<CountingUptime>) {
    let source = Arc::new(CountingUptime {
        calls: AtomicUsize::new(0),
    });
    let router = create_router(AppState::with_uptime_source(source.clone()));
    (router, source)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, Bytes) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body)
}

#[tokio::test]
async fn hello_returns_greeting_json() {
    let (app, _) = counting_router();
    let (status, content_type, body) = get(&app, "/hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value, json!({ "message": "Hello, World!" }));
}

#[tokio::test]
async fn hello_ignores_query_headers_and_body() {
    let (app, _) = counting_router();
    let (_, _, plain) = get(&app, "/hello").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/hello?name=ignored&lang=fr")
                .header("accept-language", "fr")
                .header("x-custom", "1")
                .body(Body::from("unused body"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, plain);
}

#[tokio::test]
async fn hello_is_byte_identical_across_calls() {
    let (app, _) = counting_router();
    let (_, _, first) = get(&app, "/hello").await;
    for _ in 0..5 {
        let (status, _, body) = get(&app, "/hello").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, first);
    }
}

#[tokio::test]
async fn status_reports_ok_and_uptime() {
    let (app, _) = counting_router();
    let (status, content_type, body) = get(&app, "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value, json!({ "status": "OK", "uptime": "up 1 minutes" }));
}

#[tokio::test]
async fn status_probes_on_every_request() {
    let (app, source) = counting_router();
    get(&app, "/status").await;
    get(&app, "/status").await;
    get(&app, "/hello").await;

    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn status_returns_500_when_uptime_unavailable() {
    let app = create_router(AppState::with_uptime_source(Arc::new(MissingUptime)));
    let (status, _, _) = get(&app, "/status").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // The router keeps serving after a failed request
    let (status, _, _) = get(&app, "/hello").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_paths_return_404() {
    let (app, _) = counting_router();
    for uri in ["/nonexistent", "/", "/hello/extra", "/STATUS"] {
        let (status, _, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn concurrent_requests_do_not_interfere() {
    let (app, source) = counting_router();

    let mut tasks = Vec::new();
    for i in 0..32 {
        let app = app.clone();
        let uri = if i % 2 == 0 { "/hello" } else { "/status" };
        tasks.push(tokio::spawn(async move { (uri, get(&app, uri).await) }));
    }

    let mut uptimes = Vec::new();
    for task in tasks {
        let (uri, (status, _, body)) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        if uri == "/hello" {
            assert_eq!(value, json!({ "message": "Hello, World!" }));
        } else {
            assert_eq!(value["status"], "OK");
            uptimes.push(value["uptime"].as_str().unwrap().to_string());
        }
    }

    // Every status request got its own probe result
    uptimes.sort();
    uptimes.dedup();
    assert_eq!(uptimes.len(), 16);
    assert_eq!(source.calls.load(Ordering::SeqCst), 16);
}

#[cfg(unix)]
#[tokio::test]
async fn status_with_command_probe_is_trimmed() {
    let probe = ProbeConfig {
        program: "echo".to_string(),
        args: vec!["  up 2 days, 4 hours  ".to_string()],
        max_output_bytes: 4096,
    };
    let app = create_router(AppState::new(&probe));
    let (status, _, body) = get(&app, "/status").await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["uptime"], "up 2 days, 4 hours");
}

#[cfg(unix)]
#[tokio::test]
async fn status_with_failing_command_returns_500() {
    let probe = ProbeConfig {
        program: "false".to_string(),
        args: Vec::new(),
        max_output_bytes: 4096,
    };
    let app = create_router(AppState::new(&probe));
    let (status, _, _) = get(&app, "/status").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
