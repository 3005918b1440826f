//! # Agent Flows
//!
//! The gateway router driving a real agent whose generator is the Opacity
//! client and whose store is the FlatDirectory client, both pointed at local
//! mocks. Requests go through the full middleware stack with
//! `tower::ServiceExt::oneshot`.

#[cfg(test)]
mod tests {
    use crate::support::{MockDirectory, MockProver, ZERO};
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        Router,
    };
    use pl_03_inference::{Agent, AgentConfig, LogMode, OpacityClient};
    use pl_04_api_gateway::{build_router, AgentSlot, AppState, GatewayConfig, GatewayMetrics};
    use pl_node::commands::serve::initialize_agent;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const QUESTION: &str = "What is the capital of France?";

    struct Stack {
        dir: Arc<MockDirectory>,
        prover: Arc<MockProver>,
        agent: Arc<Agent>,
        slot: AgentSlot,
        metrics: Arc<GatewayMetrics>,
        router: Router,
    }

    impl Stack {
        async fn new(store_enabled: bool, log_mode: LogMode) -> Self {
            let dir = MockDirectory::spawn().await;
            let prover = MockProver::spawn().await;
            let generator = OpacityClient::new(prover.config()).unwrap();
            let agent = Arc::new(Agent::new(
                Arc::new(generator),
                dir.client(),
                AgentConfig {
                    store_enabled,
                    log_mode,
                    ..Default::default()
                },
            ));

            let slot = AgentSlot::new();
            let metrics = Arc::new(GatewayMetrics::new());
            let router = build_router(
                &GatewayConfig::default(),
                AppState {
                    agent: slot.clone(),
                    metrics: Arc::clone(&metrics),
                },
            );
            Self {
                dir,
                prover,
                agent,
                slot,
                metrics,
                router,
            }
        }

        async fn ready(store_enabled: bool, log_mode: LogMode) -> Self {
            let stack = Self::new(store_enabled, log_mode).await;
            initialize_agent(Arc::clone(&stack.agent), stack.slot.clone())
                .await
                .unwrap();
            stack
        }

        async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, body)
        }

        async fn get(&self, uri: &str) -> (StatusCode, Value) {
            self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
        }

        async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
            self.send(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
        }

        async fn ask(&self, prompt: &str) -> (StatusCode, Value) {
            self.post(
                "/api/generate",
                json!({ "prompt": prompt, "userAddress": ZERO }),
            )
            .await
        }
    }

    // =========================================================================
    // Startup
    // =========================================================================

    #[tokio::test]
    async fn test_requests_wait_for_initialization() {
        let stack = Stack::new(true, LogMode::Awaited).await;

        let (status, body) = stack.get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok", "agentReady": false }));

        let (status, body) = stack.ask(QUESTION).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Agent not ready");
        assert_eq!(stack.prover.calls(), 0);

        initialize_agent(Arc::clone(&stack.agent), stack.slot.clone())
            .await
            .unwrap();

        let (_, body) = stack.get("/health").await;
        assert_eq!(body["agentReady"], true);
        let (status, _) = stack.ask(QUESTION).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_initialization_fails_when_directory_is_down() {
        let stack = Stack::new(true, LogMode::Awaited).await;
        stack.dir.set_down(true);

        let result = initialize_agent(Arc::clone(&stack.agent), stack.slot.clone()).await;
        assert!(result.is_err());
        assert!(!stack.slot.is_ready());
    }

    // =========================================================================
    // Generate and list
    // =========================================================================

    #[tokio::test]
    async fn test_generation_is_logged_and_listed() {
        let stack = Stack::ready(true, LogMode::Awaited).await;

        let (status, body) = stack.ask(QUESTION).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["content"],
            json!({ "text": format!("Answer to: {}", QUESTION), "functionCall": null })
        );
        assert_eq!(body["proof"]["attestation"], "0xproof");
        assert!(stack.dir.contains(&format!("{}-1.json", ZERO)));
        assert_eq!(stack.dir.bad_signatures(), 0);

        let (status, body) = stack
            .post(
                "/api/log",
                json!({ "message": "Checked answer", "metadata": { "ok": true }, "userAddress": ZERO }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sequence"], 2);

        let (status, body) = stack.get(&format!("/api/transactions/{}", ZERO)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["walletAddress"], ZERO);
        assert_eq!(body["transactionCount"], 2);
        let txs = body["transactions"].as_array().unwrap();
        assert_eq!(txs[0]["prompt"], QUESTION);
        assert_eq!(txs[0]["hasProof"], true);
        assert_eq!(txs[0]["sequence"], 1);
        assert_eq!(txs[1]["message"], "Checked answer");
        assert_eq!(txs[1]["metadata"], json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_writes_disabled_skips_store() {
        let stack = Stack::ready(false, LogMode::Awaited).await;

        let (status, body) = stack.ask(QUESTION).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["content"].is_object());
        assert_eq!(stack.dir.chunk_puts(), 0);

        let (status, _) = stack
            .post("/api/log", json!({ "message": "m", "userAddress": ZERO }))
            .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, body) = stack.get(&format!("/api/transactions/{}", ZERO)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transactionCount"], 0);
    }

    #[tokio::test]
    async fn test_background_write_lands_after_response() {
        let stack = Stack::ready(true, LogMode::Background).await;

        let (status, body) = stack.ask(QUESTION).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["content"].is_object());

        stack.agent.tracker().wait_idle().await;
        let stats = stack.agent.tracker().stats();
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.written, 1);

        let (_, body) = stack.get(&format!("/api/transactions/{}", ZERO)).await;
        assert_eq!(body["transactionCount"], 1);
    }

    #[tokio::test]
    async fn test_background_write_failure_does_not_touch_response() {
        let stack = Stack::ready(true, LogMode::Background).await;
        stack.dir.refuse(&format!("{}-1.json", ZERO));

        let (status, body) = stack.ask(QUESTION).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["proof"]["attestation"], "0xproof");

        stack.agent.tracker().wait_idle().await;
        assert_eq!(stack.agent.tracker().stats().failed, 1);
    }

    // =========================================================================
    // Degraded responses
    // =========================================================================

    #[tokio::test]
    async fn test_prover_failure_degrades() {
        let stack = Stack::ready(true, LogMode::Awaited).await;
        stack.prover.set_failing(true);

        let (status, body) = stack.ask(QUESTION).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "content": "", "proof": null }));
        assert_eq!(stack.dir.chunk_puts(), 0);
        assert_eq!(stack.metrics.to_json()["generate"]["degraded"], 1);
    }

    #[tokio::test]
    async fn test_prose_answer_degrades_to_raw_text() {
        let stack = Stack::ready(true, LogMode::Awaited).await;
        stack.prover.set_prose(true);

        let (status, body) = stack.ask(QUESTION).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["content"],
            format!("I think the answer to {} is Paris.", QUESTION)
        );
        assert!(body["proof"].is_null());
        assert!(!stack.dir.contains(&format!("{}-1.json", ZERO)));
    }

    #[tokio::test]
    async fn test_awaited_store_failure_degrades() {
        let stack = Stack::ready(true, LogMode::Awaited).await;
        stack.dir.refuse(&format!("{}-1.json", ZERO));

        let (status, body) = stack.ask(QUESTION).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["proof"].is_null());
        let raw = body["content"].as_str().unwrap();
        let parsed: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed["text"], format!("Answer to: {}", QUESTION));
    }

    #[tokio::test]
    async fn test_store_failure_on_log_route_is_bad_gateway() {
        let stack = Stack::ready(true, LogMode::Awaited).await;
        stack.dir.refuse(&format!("{}-1.json", ZERO));

        let (status, body) = stack
            .post("/api/log", json!({ "message": "m", "userAddress": ZERO }))
            .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Failed to write activity log");
        assert!(body["details"].is_string());
    }
}
