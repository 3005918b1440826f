//! # Activity Log Flows
//!
//! The activity log writing through a real `FlatDirectoryClient` against the
//! mock directory: signed chunk uploads, restart recovery, holes and
//! corrupted entries.

#[cfg(test)]
mod tests {
    use crate::support::{MockDirectory, ZERO};
    use pl_01_blob_store::{BlobStore, FlatDirectoryClient};
    use pl_02_activity_log::{
        ActivityLogConfig, ActivityLogReader, ActivityLogWriter, LogPayload, LogReader, LogWriter,
        RecoveryMode, ScanEnd,
    };
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Arc;

    const ALICE: &str = "0x1111111111111111111111111111111111111111";

    fn log_over(client: Arc<FlatDirectoryClient>) -> (LogWriter, LogReader) {
        let store: Arc<dyn BlobStore> = client;
        (
            LogWriter::new(Arc::clone(&store), ActivityLogConfig::default()),
            LogReader::new(store, ActivityLogConfig::default()),
        )
    }

    // =========================================================================
    // Write / read
    // =========================================================================

    #[tokio::test]
    async fn test_sequential_entries_are_signed_and_readable() {
        let dir = MockDirectory::spawn().await;
        let (writer, reader) = log_over(dir.client());

        for i in 1..=4u64 {
            let key = writer
                .write_info(ALICE, &format!("event {}", i), json!({ "i": i }))
                .await
                .unwrap();
            assert_eq!(key.sequence, i);
            assert_eq!(key.as_key(), format!("{}-{}.json", ALICE, i));
        }

        assert_eq!(dir.bad_signatures(), 0);
        assert!(dir.contains(&format!("{}-index.json", ALICE)));

        let scan = reader.scan(ALICE).await.unwrap();
        assert_eq!(scan.end, ScanEnd::Missing { sequence: 5 });
        let sequences: Vec<u64> = scan.entries.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3, 4]);
        assert_eq!(
            scan.entries[3].payload,
            LogPayload::info("event 4", json!({ "i": 4 }))
        );
    }

    #[tokio::test]
    async fn test_large_entry_spans_several_chunks() {
        let dir = MockDirectory::spawn().await;
        let (writer, reader) = log_over(dir.client());

        let big = "x".repeat(60 * 1024);
        writer
            .write_generation(ALICE, "long", json!({ "text": big }), true)
            .await
            .unwrap();

        // Three calldata chunks for the entry plus one for the index.
        assert_eq!(dir.chunk_puts(), 4);
        let entries = reader.read_all(ALICE).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].payload,
            LogPayload::generation("long", json!({ "text": big }), true)
        );
    }

    // =========================================================================
    // Restart recovery
    // =========================================================================

    #[tokio::test]
    async fn test_restart_continues_after_stored_entries() {
        let dir = MockDirectory::spawn().await;
        {
            let (writer, _) = log_over(dir.client());
            for _ in 0..3 {
                writer.write_info(ALICE, "before", json!({})).await.unwrap();
            }
        }

        // New client and writer, as after a process restart.
        let (writer, reader) = log_over(dir.client());
        let key = writer.write_info(ALICE, "after", json!({})).await.unwrap();
        assert_eq!(key.sequence, 4);

        let entries = reader.read_all(ALICE).await.unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[3].payload, LogPayload::info("after", json!({})));
    }

    #[tokio::test]
    async fn test_restart_without_index_searches_entries() {
        let dir = MockDirectory::spawn().await;
        for n in 1..=6 {
            let doc = json!({ "message": format!("m{}", n), "metadata": null });
            dir.insert_raw(&format!("{}-{}.json", ALICE, n), doc.to_string().as_bytes());
        }

        let (writer, _) = log_over(dir.client());
        let key = writer.write_info(ALICE, "next", json!({})).await.unwrap();
        assert_eq!(key.sequence, 7);
    }

    #[tokio::test]
    async fn test_memory_recovery_overwrites_from_one() {
        let dir = MockDirectory::spawn().await;
        {
            let (writer, _) = log_over(dir.client());
            writer.write_info(ALICE, "old", json!({})).await.unwrap();
        }

        let store: Arc<dyn BlobStore> = dir.client();
        let config = ActivityLogConfig {
            recovery: RecoveryMode::Memory,
            ..Default::default()
        };
        let writer = LogWriter::new(Arc::clone(&store), config.clone());
        let reader = LogReader::new(store, config);

        let key = writer.write_info(ALICE, "new", json!({})).await.unwrap();
        assert_eq!(key.sequence, 1);
        let entries = reader.read_all(ALICE).await.unwrap();
        assert_eq!(entries[0].payload, LogPayload::info("new", json!({})));
    }

    // =========================================================================
    // Failure shapes
    // =========================================================================

    #[tokio::test]
    async fn test_refused_upload_leaves_hole() {
        let dir = MockDirectory::spawn().await;
        let (writer, reader) = log_over(dir.client());

        writer.write_info(ALICE, "one", json!(null)).await.unwrap();
        dir.refuse(&format!("{}-2.json", ALICE));
        let err = writer.write_info(ALICE, "two", json!(null)).await.unwrap_err();
        assert!(err.is_store());

        let key = writer.write_info(ALICE, "three", json!(null)).await.unwrap();
        assert_eq!(key.sequence, 3);

        let scan = reader.scan(ALICE).await.unwrap();
        assert_eq!(scan.entries.len(), 1);
        assert_eq!(scan.end, ScanEnd::Missing { sequence: 2 });
    }

    #[tokio::test]
    async fn test_corrupted_entry_ends_scan() {
        let dir = MockDirectory::spawn().await;
        let (writer, reader) = log_over(dir.client());
        for _ in 0..3 {
            writer.write_info(ALICE, "ok", json!({})).await.unwrap();
        }
        dir.insert_raw(&format!("{}-2.json", ALICE), b"{\"message\": \"trunc");

        let scan = reader.scan(ALICE).await.unwrap();
        assert_eq!(scan.entries.len(), 1);
        assert!(matches!(scan.end, ScanEnd::Malformed { sequence: 2, .. }));
    }

    #[tokio::test]
    async fn test_gateway_down_is_read_failure() {
        let dir = MockDirectory::spawn().await;
        let (writer, reader) = log_over(dir.client());
        writer.write_info(ALICE, "ok", json!({})).await.unwrap();

        dir.set_down(true);
        let scan = reader.scan(ALICE).await.unwrap();
        assert!(scan.entries.is_empty());
        assert!(matches!(scan.end, ScanEnd::ReadFailed { sequence: 1, .. }));

        let err = writer.write_info(ALICE, "down", json!({})).await.unwrap_err();
        assert!(err.is_store());
    }

    // =========================================================================
    // Concurrency
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_get_distinct_sequences() {
        let dir = MockDirectory::spawn().await;
        let (writer, reader) = log_over(dir.client());
        let writer = Arc::new(writer);

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let writer = Arc::clone(&writer);
                tokio::spawn(async move {
                    let identity = if i % 2 == 0 { ALICE } else { ZERO };
                    writer
                        .write_info(identity, &format!("w{}", i), json!({}))
                        .await
                        .unwrap()
                })
            })
            .collect();
        let keys: Vec<_> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();

        let unique: HashSet<String> = keys.iter().map(|k| k.as_key()).collect();
        assert_eq!(unique.len(), 10);
        for identity in [ALICE, ZERO] {
            let mut sequences: Vec<u64> = keys
                .iter()
                .filter(|k| k.identity == identity)
                .map(|k| k.sequence)
                .collect();
            sequences.sort_unstable();
            assert_eq!(sequences, vec![1, 2, 3, 4, 5]);
            assert_eq!(reader.read_all(identity).await.unwrap().len(), 5);
        }
    }
}
