use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ByIdQuery {
    pub id: Option<String>,
}

/// GET /get_canvas_by_id?id= - look up a single record.
/// A missing or empty id is a validation error, distinct from an unknown
/// one.
pub async fn get_canvas_by_id(
    State(state): State<AppState>,
    Query(query): Query<ByIdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id = query
        .id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("Missing 'id' query parameter"))?;

    match state.store.find_by_id(&id).await? {
        Some(record) => Ok(Json(json!({ "status": "success", "canvas": record }))),
        None => Err(ApiError::not_found("Canvas not found")),
    }
}
