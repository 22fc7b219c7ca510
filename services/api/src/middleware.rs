//! Authentication middleware for JWT token validation
//!
//! Resolves the bearer token to a user once per request and passes it on
//! as an explicit `AuthUser` extension; handlers never consult ambient
//! session state. Every authenticated request also bumps the user's
//! last-seen timestamp.

use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::error;

use crate::{error::ApiError, state::AppState};

/// Authenticated user information
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: i64,
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract the Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    // Check if it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    // Validate the token
    let claims = state
        .jwt_service
        .validate_token(token)
        .map_err(|e| {
            error!("Failed to validate token: {}", e);
            ApiError::Unauthorized
        })?;

    // The token may outlive the account it was issued for
    let user = state
        .user_repository
        .find_by_id(claims.sub)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    state.user_repository.touch_last_seen(user.id).await?;

    // Insert the user into the request extensions
    req.extensions_mut().insert(AuthUser { id: user.id });

    // Call the next service
    let response = next.run(req).await;

    Ok(response)
}
