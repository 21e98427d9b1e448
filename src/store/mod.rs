pub mod jsonl;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::canvas::{CanvasRecord, RecordFilter};
use crate::config::StoreConfig;

/// Errors from the record store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Narrow persistence interface for canvas records.
///
/// The store is append-only from the gateway's perspective: records are
/// inserted once and never updated or deleted. Implementations must make a
/// successful insert durably visible to subsequent reads.
#[async_trait]
pub trait CanvasStore: Send + Sync {
    async fn insert(&self, record: &CanvasRecord) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<CanvasRecord>, StoreError>;

    /// The record with the maximum timestamp, or `None` on an empty store.
    async fn latest(&self) -> Result<Option<CanvasRecord>, StoreError>;

    /// Matching records, most recent first.
    async fn query_filtered(&self, filter: &RecordFilter) -> Result<Vec<CanvasRecord>, StoreError>;

    /// Connectivity probe backing `/health`.
    async fn health(&self) -> Result<(), StoreError>;
}

/// Open the configured store: Postgres when a database URL is set,
/// otherwise the append-only JSONL file store.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn CanvasStore>, StoreError> {
    match &config.database_url {
        Some(url) => {
            let store = postgres::PostgresStore::connect(url).await?;
            tracing::info!("using Postgres canvas store");
            Ok(Arc::new(store))
        }
        None => {
            let store = jsonl::JsonlStore::open(&config.log_path).await?;
            tracing::info!(path = %config.log_path, "using JSONL canvas store");
            Ok(Arc::new(store))
        }
    }
}
