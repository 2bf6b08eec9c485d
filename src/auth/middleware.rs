// Authentication middleware for protected routes

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::{error::AuthError, token::TokenService};
use crate::error::ApiError;
use crate::id::Id;

/// Identity proven by a valid bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: Id,
}

/// Pull the token out of `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidToken)
}

/// Rejects requests without a valid, unexpired, correctly signed token
/// On success the caller's identity is stored in the request extensions
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let endpoint = request.uri().path().to_string();

    let claims = bearer_token(request.headers())
        .and_then(|token| tokens.validate(token))
        .map_err(|e| {
            warn!("Rejected request to {}: {}", endpoint, e);
            ApiError::from(e)
        })?;

    debug!("Authenticated user {} for {}", claims.sub, endpoint);
    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id: claims.sub });

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| ApiError::from(AuthError::MissingToken))
    }
}
