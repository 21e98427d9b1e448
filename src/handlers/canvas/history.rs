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
pub struct HistoryQuery {
    pub user: Option<String>,
    pub campaign: Option<String>,
    pub canvas: Option<String>,
}

/// GET /get_canvas_history?user&campaign&canvas - same filter semantics as
/// the log endpoint over a different field combination, newest first.
pub async fn get_canvas_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = RecordFilter {
        user: non_empty(query.user),
        campaign: non_empty(query.campaign),
        canvas: non_empty(query.canvas),
        ..Default::default()
    };

    let history = state.store.query_filtered(&filter).await?;
    Ok(Json(json!({ "status": "success", "history": history })))
}
