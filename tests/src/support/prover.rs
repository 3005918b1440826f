//! In-process inference prover.
//!
//! Answers every completion with a fenced JSON reply naming the user query
//! and a proof object. Can be switched to fail or to return prose.

use super::spawn_server;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use pl_03_inference::InferenceConfig;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

pub const API_KEY: &str = "sk-test";

#[derive(Default)]
pub struct MockProver {
    failing: AtomicBool,
    prose: AtomicBool,
    calls: AtomicU32,
    url: Mutex<String>,
}

impl MockProver {
    pub async fn spawn() -> Arc<Self> {
        let prover = Arc::new(Self::default());
        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .route("/v1/chat/completions", post(completions))
            .with_state(Arc::clone(&prover));
        let url = spawn_server(app).await;
        *prover.url.lock() = url;
        prover
    }

    pub fn url(&self) -> String {
        self.url.lock().clone()
    }

    pub fn config(&self) -> InferenceConfig {
        InferenceConfig {
            api_key: API_KEY.to_string(),
            team_id: "team-1".to_string(),
            team_name: "proofline".to_string(),
            prover_url: self.url(),
            ..Default::default()
        }
    }

    /// Answer completions with a 500.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Answer with plain prose instead of JSON.
    pub fn set_prose(&self, prose: bool) {
        self.prose.store(prose, Ordering::SeqCst);
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Text after the `User Query: ` marker.
fn user_query(prompt: &str) -> &str {
    prompt
        .rsplit_once("User Query: ")
        .map(|(_, query)| query)
        .unwrap_or(prompt)
}

async fn completions(
    State(prover): State<Arc<MockProver>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    prover.calls.fetch_add(1, Ordering::SeqCst);

    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer sk-test");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "bad credentials").into_response();
    }
    if prover.failing.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded").into_response();
    }

    let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
    let query = user_query(prompt);
    let content = if prover.prose.load(Ordering::SeqCst) {
        format!("I think the answer to {} is Paris.", query)
    } else {
        let reply = json!({ "text": format!("Answer to: {}", query), "functionCall": null });
        format!("```json\n{}\n```", reply)
    };

    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }],
        "proof": { "attestation": "0xproof", "model": body["model"] }
    }))
    .into_response()
}
