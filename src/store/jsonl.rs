use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use super::{CanvasStore, StoreError};
use crate::canvas::filter::sort_newest_first;
use crate::canvas::{CanvasRecord, RecordFilter};

/// Append-only file store: one JSON record per line.
///
/// The full history is loaded into memory at open and served from there;
/// inserts append to the file before touching memory, so a failed append
/// leaves the in-memory view unchanged. Lines that fail to parse are
/// skipped at load time rather than poisoning the whole store.
pub struct JsonlStore {
    path: PathBuf,
    records: RwLock<Vec<CanvasRecord>>,
}

impl JsonlStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let records = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .filter_map(|line| match serde_json::from_str::<CanvasRecord>(line) {
                    Ok(record) => Some(record),
                    Err(err) => {
                        tracing::warn!("skipping unparseable log line: {}", err);
                        None
                    }
                })
                .collect(),
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl CanvasStore for JsonlStore {
    async fn insert(&self, record: &CanvasRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut records = self.records.write().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        records.push(record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CanvasRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn latest(&self) -> Result<Option<CanvasRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .max_by(|a, b| a.timestamp.cmp(&b.timestamp))
            .cloned())
    }

    async fn query_filtered(&self, filter: &RecordFilter) -> Result<Vec<CanvasRecord>, StoreError> {
        let records = self.records.read().await;
        let mut matched: Vec<CanvasRecord> = records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        drop(records);
        sort_newest_first(&mut matched);
        Ok(matched)
    }

    async fn health(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SaveCanvasRequest;
    use serde_json::json;

    fn record(user: &str, canvas: &str, alignment: &str, ts: &str) -> CanvasRecord {
        let request: SaveCanvasRequest = serde_json::from_value(json!({
            "user": user,
            "canvas": canvas,
            "meta": { "alignment": alignment },
        }))
        .unwrap();
        CanvasRecord::normalize(request, format!("{user}-{ts}"), ts.to_string()).unwrap()
    }

    #[tokio::test]
    async fn insert_is_immediately_readable() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::open(dir.path().join("hud_log.jsonl")).await.unwrap();

        let rec = record("Han", "Force_HUD", "Gray", "2026-01-01T00:00:00.000000Z");
        store.insert(&rec).await.unwrap();

        let found = store.find_by_id(&rec.id).await.unwrap().unwrap();
        assert_eq!(found.user, "Han");
        assert_eq!(found.meta.alignment, "Gray");
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hud_log.jsonl");

        {
            let store = JsonlStore::open(&path).await.unwrap();
            store
                .insert(&record("Han", "Force_HUD", "Gray", "2026-01-01T00:00:00.000000Z"))
                .await
                .unwrap();
            store
                .insert(&record("Leia", "Mission_Log", "Light", "2026-01-02T00:00:00.000000Z"))
                .await
                .unwrap();
        }

        let reopened = JsonlStore::open(&path).await.unwrap();
        assert_eq!(reopened.len().await, 2);
        let latest = reopened.latest().await.unwrap().unwrap();
        assert_eq!(latest.user, "Leia");
    }

    #[tokio::test]
    async fn unparseable_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hud_log.jsonl");

        let good = serde_json::to_string(&record("Han", "X", "Gray", "2026-01-01T00:00:00.000000Z")).unwrap();
        tokio::fs::write(&path, format!("{good}\nnot json at all\n{{\"half\": true\n")).await.unwrap();

        let store = JsonlStore::open(&path).await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn latest_picks_maximum_timestamp_not_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::open(dir.path().join("log.jsonl")).await.unwrap();

        store.insert(&record("b", "X", "Gray", "2026-03-01T00:00:00.000000Z")).await.unwrap();
        store.insert(&record("a", "X", "Gray", "2026-01-01T00:00:00.000000Z")).await.unwrap();

        let latest = store.latest().await.unwrap().unwrap();
        assert_eq!(latest.user, "b");
    }

    #[tokio::test]
    async fn empty_store_has_no_latest() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::open(dir.path().join("log.jsonl")).await.unwrap();
        assert!(store.latest().await.unwrap().is_none());
        assert!(store.find_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn filtered_query_is_sorted_descending() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::open(dir.path().join("log.jsonl")).await.unwrap();

        store.insert(&record("Han", "X", "Gray", "2026-01-01T00:00:00.000000Z")).await.unwrap();
        store.insert(&record("Han", "X", "Dark", "2026-01-02T00:00:00.000000Z")).await.unwrap();
        store.insert(&record("Han", "X", "Dark", "2026-01-03T00:00:00.000000Z")).await.unwrap();
        store.insert(&record("Leia", "X", "Light", "2026-01-04T00:00:00.000000Z")).await.unwrap();

        let filter = RecordFilter {
            alignment: Some("Dark".to_string()),
            ..Default::default()
        };
        let dark = store.query_filtered(&filter).await.unwrap();
        assert_eq!(dark.len(), 2);
        assert!(dark[0].timestamp > dark[1].timestamp);

        let all = store.query_filtered(&RecordFilter::default()).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].user, "Leia");
    }
}
