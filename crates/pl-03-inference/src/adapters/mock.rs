use crate::domain::{Generation, InferenceError};
use crate::ports::TextGenerator;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;

/// Scripted text generator for tests and offline runs.
///
/// Queued responses are returned in order; once the queue is empty the
/// fallback response is used.
pub struct MockTextGenerator {
    queue: Mutex<VecDeque<Result<Generation, InferenceError>>>,
    fallback: Result<Generation, InferenceError>,
    healthy: bool,
    prompts: Mutex<Vec<String>>,
}

impl MockTextGenerator {
    /// Always answer `content` with `proof`.
    pub fn new(content: impl Into<String>, proof: Option<Value>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: Ok(Generation {
                content: content.into(),
                proof,
            }),
            healthy: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with `error`.
    pub fn failing(error: InferenceError) -> Self {
        Self {
            fallback: Err(error),
            ..Self::new("", None)
        }
    }

    /// Report unhealthy from `health`.
    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// Queue a one-off response ahead of the fallback.
    pub fn push(&self, response: Result<Generation, InferenceError>) {
        self.queue.lock().push_back(response);
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<Generation, InferenceError> {
        self.prompts.lock().push(prompt.to_string());
        let queued = self.queue.lock().pop_front();
        queued.unwrap_or_else(|| self.fallback.clone())
    }

    async fn health(&self) -> Result<(), InferenceError> {
        if self.healthy {
            Ok(())
        } else {
            Err(InferenceError::Transport("prover unreachable".into()))
        }
    }
}
