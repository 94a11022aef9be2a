//! In-process stand-ins for the upstream model server, used by the shell tests.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TAGS_BODY: &str = r#"{"models":[{"name":"codellama:latest","modified_at":"2024-05-01T10:15:00Z","size":3825819519},{"name":"llama3:8b","modified_at":"2024-04-20T08:00:00Z","size":4661224676}]}"#;

/// Canned answer for one upstream route.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl MockReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

struct MockState {
    generate: MockReply,
    tags: MockReply,
    calls: Mutex<Vec<Value>>,
}

/// A running mock upstream.
pub struct MockUpstream {
    pub url: String,
    state: Arc<MockState>,
}

impl MockUpstream {
    /// Bodies received on `/api/generate`, in arrival order.
    pub fn generate_calls(&self) -> Vec<Value> {
        self.state.calls.lock().unwrap().clone()
    }
}

pub async fn spawn_upstream(generate: MockReply) -> MockUpstream {
    spawn_upstream_with(generate, MockReply::ok(TAGS_BODY)).await
}

pub async fn spawn_upstream_with(generate: MockReply, tags: MockReply) -> MockUpstream {
    let state = Arc::new(MockState {
        generate,
        tags,
        calls: Mutex::new(Vec::new()),
    });

    let router = Router::new()
        .route("/api/generate", post(generate_handler))
        .route("/api/tags", get(tags_handler))
        .with_state(state.clone());

    MockUpstream {
        url: spawn_router(router).await,
        state,
    }
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

/// Base URL of a local port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn generate_handler(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    state.calls.lock().unwrap().push(body);
    reply(&state.generate).await
}

async fn tags_handler(State(state): State<Arc<MockState>>) -> (StatusCode, String) {
    reply(&state.tags).await
}

async fn reply(reply: &MockReply) -> (StatusCode, String) {
    tokio::time::sleep(reply.delay).await;
    (
        StatusCode::from_u16(reply.status).unwrap(),
        reply.body.clone(),
    )
}
