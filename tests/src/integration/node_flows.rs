//! # Node Flows
//!
//! `pl-node` wired from environment-style configuration, serving on a real
//! socket and talked to over HTTP with reqwest.

#[cfg(test)]
mod tests {
    use crate::support::{directory::DIRECTORY, MockDirectory, MockProver, TEST_KEY_HEX, ZERO};
    use pl_node::commands::{demo, fetch, serve};
    use pl_node::{NodeConfig, NodeContainer};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    struct Mocks {
        dir: Arc<MockDirectory>,
        prover: Arc<MockProver>,
    }

    impl Mocks {
        async fn spawn() -> Self {
            Self {
                dir: MockDirectory::spawn().await,
                prover: MockProver::spawn().await,
            }
        }

        fn env(&self, extra: &[(&str, &str)]) -> HashMap<String, String> {
            let mut vars: HashMap<String, String> = [
                ("ETHSTORAGE_PRIVATE_KEY", format!("0x{}", TEST_KEY_HEX)),
                ("ETHSTORAGE_RPC_URL", self.dir.url()),
                ("ETHSTORAGE_DIRECTORY_ADDRESS", DIRECTORY.to_string()),
                ("ETHSTORAGE_UPLOAD_TYPE", "calldata".to_string()),
                ("ETHSTORAGE_ENABLED", "true".to_string()),
                ("OPACITY_OPENAI_KEY", crate::support::prover::API_KEY.to_string()),
                ("OPACITY_TEAM_ID", "team-1".to_string()),
                ("OPACITY_TEAM_NAME", "proofline".to_string()),
                ("OPACITY_PROVER_URL", self.prover.url()),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
            for (k, v) in extra {
                vars.insert(k.to_string(), v.to_string());
            }
            vars
        }

        fn container(&self, extra: &[(&str, &str)]) -> NodeContainer {
            let vars = self.env(extra);
            let config = NodeConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
            NodeContainer::new(config).unwrap()
        }
    }

    async fn wait_until_ready(http: &reqwest::Client, base: &str) {
        for _ in 0..100 {
            if let Ok(response) = http.get(format!("{}/health", base)).send().await {
                let body: Value = response.json().await.unwrap_or(Value::Null);
                if body["agentReady"] == true {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("agent never became ready");
    }

    #[tokio::test]
    async fn test_serve_over_tcp() {
        let mocks = Mocks::spawn().await;
        let container = mocks.container(&[]);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let (stop, stopped) = oneshot::channel::<()>();
        let server = tokio::spawn(serve::serve_on(
            listener,
            container.config.gateway.clone(),
            Arc::clone(&container.agent),
            async move {
                let _ = stopped.await;
            },
        ));

        let http = reqwest::Client::new();
        wait_until_ready(&http, &base).await;

        let response = http
            .post(format!("{}/api/generate", base))
            .json(&json!({ "prompt": "Capital of France?", "userAddress": ZERO }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert!(response.headers().contains_key("x-request-id"));
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["content"]["text"], "Answer to: Capital of France?");
        assert!(!body["proof"].is_null());

        let body: Value = http
            .get(format!("{}/api/transactions/{}", base, ZERO))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["transactionCount"], 1);
        assert_eq!(body["transactions"][0]["prompt"], "Capital of France?");

        let response = http
            .get(format!("{}/api/transactions/not-an-address", base))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);

        stop.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_serve_exits_when_prover_unreachable() {
        let mocks = Mocks::spawn().await;
        let container = mocks.container(&[("OPACITY_PROVER_URL", "http://127.0.0.1:9")]);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let result = tokio::time::timeout(
            Duration::from_secs(30),
            serve::serve_on(
                listener,
                container.config.gateway.clone(),
                Arc::clone(&container.agent),
                std::future::pending::<()>(),
            ),
        )
        .await
        .expect("serve should stop on its own");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_demo_then_fetch() {
        let mocks = Mocks::spawn().await;
        let container = mocks.container(&[]);
        container.agent.initialize().await.unwrap();

        let report = demo::run(container.agent.as_ref()).await.unwrap();
        assert!(!report.response.is_degraded());
        let logged = report.logged.unwrap();
        assert_eq!(logged, format!("{}-2.json", ZERO));

        let path = std::env::temp_dir().join(format!("pl-fetch-{}.json", uuid::Uuid::new_v4()));
        fetch::run(&container.store, &logged, Some(&path))
            .await
            .unwrap();
        let written = tokio::fs::read(&path).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(Some(written.clone()), mocks.dir.content(&logged));
        let entry: Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(entry["message"], "Demo Completed");
        assert_eq!(entry["metadata"]["status"], "success");
    }

    #[tokio::test]
    async fn test_fetch_missing_key_fails() {
        let mocks = Mocks::spawn().await;
        let container = mocks.container(&[]);

        let path = std::env::temp_dir().join(format!("pl-fetch-{}.json", uuid::Uuid::new_v4()));
        assert!(fetch::run(&container.store, "missing.json", Some(&path))
            .await
            .is_err());
        assert!(!path.exists());
    }
}
