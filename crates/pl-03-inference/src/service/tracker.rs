//! Background log write tracking.
//!
//! Each spawned write is recorded as `Pending` and moves to `Written` or
//! `Failed` when it completes, so callers can observe outcomes that the
//! HTTP response no longer reports.

use parking_lot::Mutex;
use pl_02_activity_log::{LogError, LogKey};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

/// Finished tasks kept for inspection by default.
pub const DEFAULT_MAX_TRACKED: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum LogTaskState {
    Pending,
    Written { key: String },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogTask {
    pub id: Uuid,
    pub identity: String,
    pub started_at: String,
    #[serde(flatten)]
    pub state: LogTaskState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LogTaskStats {
    pub pending: usize,
    pub written: usize,
    pub failed: usize,
}

#[derive(Default)]
struct Inner {
    tasks: Vec<LogTask>,
    handles: Vec<JoinHandle<()>>,
}

/// Tracks fire-and-forget log writes.
#[derive(Clone)]
pub struct LogTaskTracker {
    inner: Arc<Mutex<Inner>>,
    max_tracked: usize,
}

impl Default for LogTaskTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TRACKED)
    }
}

impl LogTaskTracker {
    pub fn new(max_tracked: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            max_tracked: max_tracked.max(1),
        }
    }

    /// Run `write` on the runtime and record its outcome.
    pub fn spawn<F>(&self, identity: &str, write: F) -> Uuid
    where
        F: Future<Output = Result<LogKey, LogError>> + Send + 'static,
    {
        let id = Uuid::new_v4();
        let task = LogTask {
            id,
            identity: identity.to_string(),
            started_at: pl_02_activity_log::domain::now_timestamp(),
            state: LogTaskState::Pending,
        };

        {
            let mut guard = self.inner.lock();
            guard.tasks.push(task);
            self.prune(&mut guard);
        }

        // Not held across the spawn; the task locks it to record its state.
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            let state = match write.await {
                Ok(key) => {
                    info!(task = %id, key = %key, "[pl-03] Background log write finished");
                    LogTaskState::Written {
                        key: key.as_key(),
                    }
                }
                Err(e) => {
                    warn!(task = %id, error = %e, "[pl-03] Background log write failed");
                    LogTaskState::Failed {
                        error: e.to_string(),
                    }
                }
            };
            let mut guard = inner.lock();
            if let Some(task) = guard.tasks.iter_mut().find(|t| t.id == id) {
                task.state = state;
            }
        });

        let mut guard = self.inner.lock();
        guard.handles.retain(|h| !h.is_finished());
        guard.handles.push(handle);
        id
    }

    /// Drop the oldest finished tasks beyond the retention limit.
    fn prune(&self, inner: &mut Inner) {
        let mut excess = inner.tasks.len().saturating_sub(self.max_tracked);
        if excess == 0 {
            return;
        }
        inner.tasks.retain(|t| {
            if excess > 0 && t.state != LogTaskState::Pending {
                excess -= 1;
                false
            } else {
                true
            }
        });
    }

    pub fn get(&self, id: Uuid) -> Option<LogTask> {
        self.inner.lock().tasks.iter().find(|t| t.id == id).cloned()
    }

    /// Tracked tasks, oldest first.
    pub fn tasks(&self) -> Vec<LogTask> {
        self.inner.lock().tasks.clone()
    }

    pub fn stats(&self) -> LogTaskStats {
        let inner = self.inner.lock();
        let mut stats = LogTaskStats::default();
        for task in &inner.tasks {
            match task.state {
                LogTaskState::Pending => stats.pending += 1,
                LogTaskState::Written { .. } => stats.written += 1,
                LogTaskState::Failed { .. } => stats.failed += 1,
            }
        }
        stats
    }

    /// Wait for every task spawned so far to finish.
    pub async fn wait_idle(&self) {
        let handles = std::mem::take(&mut self.inner.lock().handles);
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "[pl-03] Background log task aborted");
            }
        }
    }
}
