use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use super::{CanvasStore, StoreError};
use crate::canvas::{CanvasRecord, RecordFilter};

const CREATE_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS canvas_records (
    id          TEXT PRIMARY KEY,
    recorded_at TEXT NOT NULL,
    user_name   TEXT NOT NULL,
    campaign    TEXT NOT NULL,
    canvas      TEXT NOT NULL,
    alignment   TEXT NOT NULL,
    doc         JSONB NOT NULL
)";

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS canvas_records_recorded_at_idx ON canvas_records (recorded_at DESC)";

/// Postgres-backed record store.
///
/// The full record lives in the `doc` JSONB column; the filterable fields
/// are mirrored into plain columns so equality filters and the timestamp
/// sort stay in SQL. `recorded_at` is TEXT on purpose: the timestamp
/// contract is lexicographic ISO-8601 ordering.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_INDEX).execute(&self.pool).await?;
        Ok(())
    }

    fn decode_row(row: PgRow) -> Result<CanvasRecord, StoreError> {
        let doc: Value = row.try_get("doc")?;
        Ok(serde_json::from_value(doc)?)
    }
}

#[async_trait]
impl CanvasStore for PostgresStore {
    async fn insert(&self, record: &CanvasRecord) -> Result<(), StoreError> {
        let doc = serde_json::to_value(record)?;
        sqlx::query(
            "INSERT INTO canvas_records (id, recorded_at, user_name, campaign, canvas, alignment, doc) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&record.id)
        .bind(&record.timestamp)
        .bind(&record.user)
        .bind(&record.campaign)
        .bind(&record.canvas)
        .bind(&record.meta.alignment)
        .bind(doc)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CanvasRecord>, StoreError> {
        let row = sqlx::query("SELECT doc FROM canvas_records WHERE id = $1 LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::decode_row).transpose()
    }

    async fn latest(&self) -> Result<Option<CanvasRecord>, StoreError> {
        // Secondary sort on id keeps same-timestamp ties deterministic.
        let row = sqlx::query("SELECT doc FROM canvas_records ORDER BY recorded_at DESC, id LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::decode_row).transpose()
    }

    async fn query_filtered(&self, filter: &RecordFilter) -> Result<Vec<CanvasRecord>, StoreError> {
        let mut sql = String::from("SELECT doc FROM canvas_records");
        let mut binds: Vec<&String> = Vec::new();
        let mut clauses: Vec<String> = Vec::new();

        for (column, value) in [
            ("canvas", &filter.canvas),
            ("user_name", &filter.user),
            ("campaign", &filter.campaign),
            ("alignment", &filter.alignment),
        ] {
            if let Some(value) = value {
                binds.push(value);
                clauses.push(format!("{} = ${}", column, binds.len()));
            }
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY recorded_at DESC, id");

        let mut query = sqlx::query(&sql);
        for bind in binds {
            query = query.bind(bind);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::decode_row).collect()
    }

    async fn health(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
