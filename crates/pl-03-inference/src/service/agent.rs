use super::tracker::{LogTaskTracker, DEFAULT_MAX_TRACKED};
use crate::domain::{
    build_prompt, strip_code_fence, AgentConfig, AgentError, LogMode, VerifiableResponse,
    SYSTEM_PROMPT,
};
use crate::ports::{AgentApi, TextGenerator};
use async_trait::async_trait;
use pl_01_blob_store::BlobStore;
use pl_02_activity_log::{
    ActivityLogReader, ActivityLogWriter, LogEntry, LogKey, LogReader, LogWriter,
    ANONYMOUS_IDENTITY,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Verifiable agent: text generation plus an activity log in the blob store.
pub struct Agent {
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn BlobStore>,
    writer: Arc<dyn ActivityLogWriter>,
    reader: Arc<dyn ActivityLogReader>,
    config: AgentConfig,
    tracker: LogTaskTracker,
}

impl Agent {
    /// Build an agent whose activity log lives in `store`.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn BlobStore>,
        config: AgentConfig,
    ) -> Self {
        let writer = Arc::new(LogWriter::new(
            Arc::clone(&store),
            config.activity_log.clone(),
        ));
        let reader = Arc::new(LogReader::new(
            Arc::clone(&store),
            config.activity_log.clone(),
        ));
        Self::with_log(generator, store, writer, reader, config)
    }

    /// Build an agent over an existing writer and reader.
    pub fn with_log(
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn BlobStore>,
        writer: Arc<dyn ActivityLogWriter>,
        reader: Arc<dyn ActivityLogReader>,
        config: AgentConfig,
    ) -> Self {
        let tracker = LogTaskTracker::new(config.max_tracked_tasks.unwrap_or(DEFAULT_MAX_TRACKED));
        Self {
            generator,
            store,
            writer,
            reader,
            config,
            tracker,
        }
    }

    /// Check that the generator and the store answer.
    pub async fn initialize(&self) -> Result<(), AgentError> {
        info!("[pl-03] Checking inference prover...");
        self.generator
            .health()
            .await
            .map_err(|e| AgentError::Initialization(format!("inference: {}", e)))?;

        info!("[pl-03] Checking blob store...");
        self.store
            .ping()
            .await
            .map_err(|e| AgentError::Initialization(format!("blob store: {}", e)))?;

        info!(
            store_enabled = self.config.store_enabled,
            log_mode = ?self.config.log_mode,
            "[pl-03] Agent initialized"
        );
        Ok(())
    }

    /// Background log writes issued by this agent.
    pub fn tracker(&self) -> &LogTaskTracker {
        &self.tracker
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

fn effective_identity(identity: &str) -> &str {
    if identity.is_empty() {
        ANONYMOUS_IDENTITY
    } else {
        identity
    }
}

#[async_trait]
impl AgentApi for Agent {
    async fn generate(&self, prompt: &str, identity: &str) -> VerifiableResponse {
        let identity = effective_identity(identity);
        info!(identity, prompt_len = prompt.len(), "[pl-03] Generating text");

        let generation = match self
            .generator
            .generate(&build_prompt(SYSTEM_PROMPT, prompt))
            .await
        {
            Ok(generation) => generation,
            Err(e) => {
                error!(error = %e, "[pl-03] Text generation failed");
                return VerifiableResponse::degraded("");
            }
        };

        let json_text = strip_code_fence(&generation.content);
        let result: Value = match serde_json::from_str(&json_text) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "[pl-03] Model output is not valid JSON");
                return VerifiableResponse::degraded(json_text);
            }
        };
        let has_proof = generation.has_proof();

        if !self.config.store_enabled {
            info!(identity, "[pl-03] Store write skipped");
        } else {
            match self.config.log_mode {
                LogMode::Awaited => {
                    if let Err(e) = self
                        .writer
                        .write_generation(identity, prompt, result.clone(), has_proof)
                        .await
                    {
                        error!(identity, error = %e, "[pl-03] Failed to log generation");
                        return VerifiableResponse::degraded(json_text);
                    }
                }
                LogMode::Background => {
                    let writer = Arc::clone(&self.writer);
                    let owned_identity = identity.to_string();
                    let owned_prompt = prompt.to_string();
                    let logged = result.clone();
                    self.tracker.spawn(identity, async move {
                        writer
                            .write_generation(&owned_identity, &owned_prompt, logged, has_proof)
                            .await
                    });
                }
            }
        }

        VerifiableResponse {
            content: result,
            proof: generation.proof.unwrap_or(Value::Null),
        }
    }

    async fn log_info(
        &self,
        identity: &str,
        message: &str,
        metadata: Value,
    ) -> Result<LogKey, AgentError> {
        if !self.config.store_enabled {
            return Err(AgentError::StoreDisabled);
        }
        let key = self
            .writer
            .write_info(effective_identity(identity), message, metadata)
            .await?;
        Ok(key)
    }

    async fn transactions(&self, identity: &str) -> Result<Vec<LogEntry>, AgentError> {
        Ok(self.reader.read_all(identity).await?)
    }

    fn store_enabled(&self) -> bool {
        self.config.store_enabled
    }
}
