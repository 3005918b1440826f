//! `pl-node fetch <key>`: download one file from the directory.

use anyhow::{Context, Result};
use pl_01_blob_store::{DownloadCallback, FlatDirectoryClient, StoreError};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, info};

/// Reports each downloaded chunk.
#[derive(Debug, Default)]
pub struct ProgressReporter {
    received: AtomicU64,
}

impl ProgressReporter {
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }
}

impl DownloadCallback for ProgressReporter {
    fn on_progress(&self, progress: u32, count: u32, chunk: &[u8]) {
        self.received.fetch_add(chunk.len() as u64, Ordering::Relaxed);
        info!(
            progress,
            count,
            chunk = %String::from_utf8_lossy(chunk),
            "[pl-node] Download {} of {} chunks",
            progress,
            count
        );
    }

    fn on_fail(&self, error: &StoreError) {
        error!(error = %error, "[pl-node] Error downloading data");
    }

    fn on_finish(&self) {
        info!(bytes = self.received(), "[pl-node] Download success");
    }
}

/// Download `key`, writing it to `output` or to stdout.
pub async fn run(client: &FlatDirectoryClient, key: &str, output: Option<&Path>) -> Result<()> {
    let reporter = ProgressReporter::default();
    let content = client
        .download(key, &reporter)
        .await
        .with_context(|| format!("Failed to download {}", key))?;

    match output {
        Some(path) => tokio::fs::write(path, &content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&content)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
