//! Per-identity sequence allocation.
//!
//! Each identity has its own async mutex, so concurrent writers for one
//! identity never see the same sequence while other identities proceed
//! independently. The first allocation for an identity in this process seeds
//! the counter from the store (see `recover_last_sequence`).

use crate::domain::{
    entry_key, index_key, ActivityLogConfig, LogError, LogIndex, RecoveryMode,
};
use crate::ports::BlobStore;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Counter {
    /// Highest sequence handed out.
    last: u64,
    /// Highest sequence known to be stored.
    written: u64,
    seeded: bool,
}

pub struct SequenceAllocator {
    store: Arc<dyn BlobStore>,
    config: ActivityLogConfig,
    counters: DashMap<String, Arc<Mutex<Counter>>>,
}

impl SequenceAllocator {
    pub fn new(store: Arc<dyn BlobStore>, config: ActivityLogConfig) -> Self {
        Self {
            store,
            config,
            counters: DashMap::new(),
        }
    }

    fn counter(&self, identity: &str) -> Arc<Mutex<Counter>> {
        // Clone out of the map so no shard lock is held across an await.
        self.counters
            .entry(identity.to_string())
            .or_default()
            .value()
            .clone()
    }

    /// Advance the counter for `identity` and return the new sequence.
    ///
    /// If seeding from the store fails nothing is consumed and the next call
    /// tries again.
    pub async fn next(&self, identity: &str) -> Result<u64, LogError> {
        let counter = self.counter(identity);
        let mut state = counter.lock().await;

        if !state.seeded {
            let last = match self.config.recovery {
                RecoveryMode::Memory => 0,
                RecoveryMode::Store => self.recover_last_sequence(identity).await?,
            };
            state.last = last;
            state.written = last;
            state.seeded = true;
        }

        state.last += 1;
        Ok(state.last)
    }

    /// Record that `sequence` was stored and refresh the index object.
    ///
    /// Index failures are logged only. Out-of-order completions never move
    /// the index backwards.
    pub async fn commit(&self, identity: &str, sequence: u64) {
        let counter = self.counter(identity);
        let mut state = counter.lock().await;

        if sequence <= state.written {
            return;
        }
        state.written = sequence;

        if !self.config.write_index {
            return;
        }

        let index = LogIndex::new(identity, sequence);
        let bytes = match serde_json::to_vec(&index) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(identity, error = %e, "[pl-02] Failed to encode index object");
                return;
            }
        };
        if let Err(e) = self.store.put(&index_key(identity), bytes).await {
            warn!(
                identity,
                sequence,
                error = %e,
                "[pl-02] Failed to update index object"
            );
        }
    }

    /// Highest sequence allocated in this process, 0 if none.
    pub async fn last_sequence(&self, identity: &str) -> u64 {
        let counter = match self.counters.get(identity) {
            Some(entry) => entry.value().clone(),
            None => return 0,
        };
        let state = counter.lock().await;
        state.last
    }

    /// Find the highest sequence already stored for `identity`.
    ///
    /// With an index object, probes forward from its `lastSequence` while
    /// entries exist. Without one, doubles until an entry is missing and then
    /// binary searches the last step. Both are bounded by
    /// `max_recovery_probe`. Hitting the bound while the next entry exists
    /// is `LogError::RecoveryLimit`. The binary search assumes the stored log
    /// has no gaps; a gap left by a failed write hides everything after it.
    async fn recover_last_sequence(&self, identity: &str) -> Result<u64, LogError> {
        let max = self.config.max_recovery_probe;

        let last = match self.read_index(identity).await? {
            Some(indexed) => {
                let mut last = indexed;
                let mut probes = 0;
                while probes < max && self.exists(identity, last + 1).await? {
                    last += 1;
                    probes += 1;
                }
                if probes == max {
                    self.ensure_end(identity, last, max).await?;
                }
                last
            }
            None => self.search_highest(identity, max).await?,
        };

        if last > 0 {
            info!(identity, last, "[pl-02] Recovered sequence counter from store");
        } else {
            debug!(identity, "[pl-02] No stored entries, counter starts at 0");
        }
        Ok(last)
    }

    async fn read_index(&self, identity: &str) -> Result<Option<u64>, LogError> {
        let bytes = match self.store.get(&index_key(identity)).await? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };
        match serde_json::from_slice::<LogIndex>(&bytes) {
            Ok(index) => Ok(Some(index.last_sequence)),
            Err(e) => {
                warn!(identity, error = %e, "[pl-02] Ignoring malformed index object");
                Ok(None)
            }
        }
    }

    async fn search_highest(&self, identity: &str, max: u64) -> Result<u64, LogError> {
        if !self.exists(identity, 1).await? {
            return Ok(0);
        }

        // `lo` is known to exist, `hi` is known to be missing.
        let mut lo: u64 = 1;
        let mut hi;
        loop {
            let probe = lo.saturating_mul(2);
            if probe > max {
                if lo >= max || self.exists(identity, max).await? {
                    let last = max.max(lo);
                    self.ensure_end(identity, last, max).await?;
                    return Ok(last);
                }
                hi = max;
                break;
            }
            if self.exists(identity, probe).await? {
                lo = probe;
            } else {
                hi = probe;
                break;
            }
        }

        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.exists(identity, mid).await? {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Ok(lo)
    }

    /// Fail if an entry follows `last`, which recovery could not reach.
    async fn ensure_end(&self, identity: &str, last: u64, limit: u64) -> Result<(), LogError> {
        if self.exists(identity, last + 1).await? {
            warn!(
                identity,
                last,
                limit,
                "[pl-02] Recovery probe limit reached with entries beyond it, refusing to overwrite"
            );
            return Err(LogError::RecoveryLimit {
                identity: identity.to_string(),
                last,
                limit,
            });
        }
        Ok(())
    }

    async fn exists(&self, identity: &str, sequence: u64) -> Result<bool, LogError> {
        Ok(self.store.get(&entry_key(identity, sequence)).await?.is_some())
    }
}
