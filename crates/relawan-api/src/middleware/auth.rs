//! Bearer token authentication

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Resolves the bearer token to an [`relawan_core::AuthUser`] and stores it
/// in the request extensions for the handlers behind this layer.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Owned so the request is not borrowed across the await.
    let token = extract_bearer(req.headers())?.to_owned();
    let user = state.auth.authenticate(&token).await?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let header = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Malformed Authorization header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Expected a Bearer token".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(ApiError::Unauthorized("Empty Bearer token".to_string()));
    }

    Ok(token)
}
