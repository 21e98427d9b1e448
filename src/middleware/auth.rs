use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use crate::config;
use crate::error::ApiError;

/// Write-auth middleware: the Authorization header must carry the single
/// configured bearer secret, compared as an exact string. Runs before the
/// handler, so a rejected request has no side effects.
pub async fn bearer_auth_middleware(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_from_headers(&headers).map_err(ApiError::unauthorized)?;

    if !authorize(&token) {
        return Err(ApiError::unauthorized("Invalid bearer token"));
    }

    Ok(next.run(request).await)
}

/// Exact-match check against the configured write secret. An empty secret
/// rejects everything rather than turning auth off. Isolated here so the
/// placeholder trust mechanism can be upgraded without touching handlers.
pub fn authorize(token: &str) -> bool {
    let secret = &config::config().security.write_token;
    !secret.is_empty() && token == secret
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
