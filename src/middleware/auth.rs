use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::AuthError;
use crate::error::ApiError;
use crate::state::AppState;

/// Bearer token authentication for protected routes.
///
/// Resolves the token through the configured `Authenticator` exactly once and stores the
/// resulting `Actor` in request extensions. Rejected requests never reach a handler.
pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;

    let actor = state.authenticator.authenticate(token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

/// Extract token from `Authorization: Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_str = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    // Scheme is case-insensitive: "Bearer", "bearer" and "BEARER" are all accepted
    let (scheme, token) = auth_str
        .trim_start()
        .split_once(' ')
        .ok_or(AuthError::MalformedHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader);
    }

    match token.trim() {
        "" => Err(AuthError::InvalidToken("empty token".to_string())),
        token => Ok(token),
    }
}
