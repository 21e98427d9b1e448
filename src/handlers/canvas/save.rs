use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::canvas::{CanvasRecord, SaveCanvasRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /save_canvas - normalize and append one canvas record.
///
/// Auth has already passed in the middleware by the time this runs. The
/// payload must carry a scalar `canvas` name or a non-empty
/// `canvas_sections` list; anything else is rejected before the store is
/// touched.
pub async fn save_canvas(
    State(state): State<AppState>,
    payload: Result<Json<SaveCanvasRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;

    let record = CanvasRecord::from_request(payload)?;
    state.store.insert(&record).await?;

    tracing::info!(
        id = %record.id,
        user = %record.user,
        canvas = %record.canvas,
        "canvas saved"
    );

    Ok(Json(json!({
        "status": "success",
        "message": "Canvas saved",
        "id": record.id,
    })))
}
