use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::config;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConverseRequest {
    pub message: String,
}

/// POST /query_nemotron - relay one message to the game-master model.
///
/// The configured system prompt and sampling parameters are fixed; the
/// upstream body comes back verbatim. No retries, no caching, no memory
/// between calls.
pub async fn query_nemotron(
    State(state): State<AppState>,
    payload: Result<Json<ConverseRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    let system_prompt = &config::config().inference.system_prompt;
    let response = state.chat.chat_complete(system_prompt, &request.message).await?;

    Ok(Json(response))
}
