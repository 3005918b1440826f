//! Prover-backed text generation.
//!
//! ```text
//! POST {prover}/v1/chat/completions   Bearer api_key, x-opacity-team-*
//! GET  {prover}/health
//! ```

use crate::domain::{Generation, InferenceConfig, InferenceError};
use crate::ports::TextGenerator;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    proof: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for the inference prover.
pub struct OpacityClient {
    client: Client,
    config: InferenceConfig,
}

impl OpacityClient {
    /// Create a new client. Fails on invalid configuration.
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        config
            .validate()
            .map_err(|e| InferenceError::Config(e.to_string()))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| InferenceError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.prover_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl TextGenerator for OpacityClient {
    async fn generate(&self, prompt: &str) -> Result<Generation, InferenceError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.url("/v1/chat/completions"))
            .bearer_auth(&self.config.api_key)
            .header("x-opacity-team-id", &self.config.team_id)
            .header("x-opacity-team-name", &self.config.team_name)
            .json(&request)
            .send()
            .await?;
        let body: ChatResponse = check_status(response).await?.json().await?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(InferenceError::EmptyResponse)?;

        debug!(len = content.len(), has_proof = body.proof.is_some(), "[pl-03] Generation received");

        Ok(Generation {
            content,
            proof: body.proof,
        })
    }

    async fn health(&self) -> Result<(), InferenceError> {
        let response = self.client.get(self.url("/health")).send().await?;
        check_status(response).await.map(|_| ())
    }
}

async fn check_status(response: Response) -> Result<Response, InferenceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(InferenceError::Rejected {
        status: status.as_u16(),
        message,
    })
}
