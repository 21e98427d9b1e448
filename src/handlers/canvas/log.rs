use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::canvas::filter::non_empty;
use crate::canvas::RecordFilter;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub canvas: Option<String>,
    pub user: Option<String>,
    pub align: Option<String>,
}

/// GET /get_log?canvas&user&align - filtered record log, newest first.
/// Filters are exact-match equality and AND-combined; an empty result is a
/// success.
pub async fn get_log(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = RecordFilter {
        canvas: non_empty(query.canvas),
        user: non_empty(query.user),
        alignment: non_empty(query.align),
        ..Default::default()
    };

    let log = state.store.query_filtered(&filter).await?;
    Ok(Json(json!({ "status": "success", "log": log })))
}
