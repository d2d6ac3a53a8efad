//! Token verification middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Authenticated principal extracted from the token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub email: String,
    /// Expiry of the presented token (Unix seconds)
    pub expires_at: i64,
}

/// Token carried by an Authorization header value, with or without the
/// `Bearer ` prefix.
pub fn bearer_token(header: &str) -> Option<&str> {
    let token = header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .unwrap_or(header)
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Token authentication middleware.
///
/// Verifies the token from the Authorization header, then injects the
/// CurrentUser into the request extensions. Any failure rejects the request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let claims = state.services.tokens().verify(&token).await?;

    request.extensions_mut().insert(CurrentUser {
        email: claims.email,
        expires_at: claims.exp,
    });

    Ok(next.run(request).await)
}
