//! Authentication Middleware

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use crate::api::AppState;

use super::error::AuthError;
use super::jwt::validate_access_token;

/// Authenticated caller injected into request extensions.
///
/// The role is kept as the raw string from the token so that roles unknown
/// to the permission table are denied by the checker instead of failing
/// authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// User ID.
    pub id: Uuid,
    /// Role name.
    pub role: String,
}

impl Principal {
    pub fn new(id: Uuid, role: impl Into<String>) -> Self {
        Self {
            id,
            role: role.into(),
        }
    }
}

/// Middleware that attaches a `Principal` when a bearer token is present.
///
/// Requests without an `Authorization` header pass through unauthenticated;
/// the permission guards further down reject them with 401. A header that
/// is present but malformed, or a token that fails validation, is rejected
/// here.
///
/// # Usage
///
/// ```ignore
/// Router::new()
///     .route("/protected", get(handler))
///     .layer(axum::middleware::from_fn_with_state(state, authenticate))
/// ```
#[tracing::instrument(skip(state, request, next))]
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return Ok(next.run(request).await);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AuthError::InvalidAuthHeader)?;

    let claims = validate_access_token(token, &state.config.jwt_public_key).inspect_err(|e| {
        warn!(error = %e, "Rejected bearer token");
    })?;

    let id: Uuid = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;

    request
        .extensions_mut()
        .insert(Principal::new(id, claims.role));

    Ok(next.run(request).await)
}

/// Extractor for the authenticated principal in handlers.
///
/// ```ignore
/// async fn handler(principal: Principal) -> impl IntoResponse {
///     format!("Hello, {}!", principal.role)
/// }
/// ```
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }
}
