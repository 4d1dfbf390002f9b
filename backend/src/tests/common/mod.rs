// Common test utilities and helpers

use axum::{
    Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Request, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::AiConfig;
use crate::services::llm::OpenAIClient;
use crate::{AppState, build_router};

/// What the mock completion endpoint answers with
#[derive(Clone)]
pub enum MockReply {
    /// 200 with a JSON body
    Json(Value),
    /// Arbitrary status with a plain-text body
    Status(u16, String),
    /// 200 with a body that is not JSON
    Raw(String),
    /// 200 with a JSON body after a delay
    Delayed(Duration, Value),
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

struct MockState {
    reply: MockReply,
    hits: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A running mock of an OpenAI-compatible `/chat/completions` endpoint
pub struct MockUpstream {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockUpstream {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("mock state poisoned").clone()
    }
}

async fn mock_completions(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.requests.lock().expect("mock state poisoned").push(RecordedRequest {
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    match &state.reply {
        MockReply::Json(value) => axum::Json(value.clone()).into_response(),
        MockReply::Status(code, text) => (
            StatusCode::from_u16(*code).expect("valid status code"),
            text.clone(),
        )
            .into_response(),
        MockReply::Raw(text) => (StatusCode::OK, text.clone()).into_response(),
        MockReply::Delayed(delay, value) => {
            tokio::time::sleep(*delay).await;
            axum::Json(value.clone()).into_response()
        },
    }
}

/// Spawn a mock completion endpoint on an ephemeral local port
pub async fn spawn_upstream(reply: MockReply) -> MockUpstream {
    let state = Arc::new(MockState {
        reply,
        hits: AtomicUsize::new(0),
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/v1/chat/completions", post(mock_completions))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock upstream");
    let addr = listener.local_addr().expect("mock upstream address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock upstream crashed");
    });

    MockUpstream { base_url: format!("http://{}/v1", addr), state }
}

/// A base URL nothing is listening on
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway address");
    drop(listener);
    format!("http://{}/v1", addr)
}

/// Completion body in the OpenAI response shape
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

pub fn ai_config(base_url: &str, api_key: Option<&str>) -> AiConfig {
    AiConfig {
        base_url: base_url.to_string(),
        api_key: api_key.map(str::to_string),
        model: "gpt-4o-mini".to_string(),
        timeout_secs: 5,
    }
}

/// Router wired to a real `OpenAIClient`, static files off
pub fn test_app(ai: &AiConfig) -> Router {
    let state = AppState::new(Arc::new(OpenAIClient::new(ai)));
    build_router(Arc::new(state), None)
}

/// POST a raw body to `/api/generate` and decode the JSON reply
pub async fn post_generate(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let value = serde_json::from_slice(&bytes).expect("response body is JSON");

    (status, value)
}

/// Tracing output captured in memory
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer poisoned")).into_owned()
    }

    /// Plain-text fmt subscriber writing into this buffer
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt().with_writer(self.clone()).with_ansi(false).finish()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

pub const TEN_OPENERS: &str = "Saw the Series B news, curious how you are thinking about pipeline coverage this year.
Noticed your team doubled its SDR hiring since spring.
Your recent post on attribution models stuck with me.
Scaling demand gen after a raise usually breaks reporting first.
Curious whether the new funding changes your channel mix.
Your launch cadence this quarter has been hard to miss.
Growth teams at your stage often outgrow their first CRM setup.
The pricing page rewrite reads like a team that tests a lot.
Hiring three marketers at once suggests a big second half.
Your webinar series seems to pull more pipeline than most.";
