use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /get_canvas - the most recently written record.
///
/// "Most recent" means maximum timestamp, which for these ISO-8601 strings
/// is plain lexicographic order. An empty store is a normal 404, not a
/// fault.
pub async fn get_canvas(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    match state.store.latest().await? {
        Some(record) => Ok(Json(json!({ "status": "success", "canvas": record }))),
        None => Err(ApiError::not_found("No canvas found")),
    }
}
