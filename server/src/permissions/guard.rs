//! Permission guards for the axum middleware chain.
//!
//! A guard either lets the request continue untouched or ends it with a
//! 401/403 JSON response. Guards never retry and never modify the request.

use std::future::Future;
use std::pin::Pin;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::AppState;
use crate::auth::{ErrorResponse, Principal};

/// Denial text for guards that accept any of several permissions.
const GENERIC_DENIAL: &str = "Insufficient permissions";

/// Authorization requirement for a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// One `(resource, action)` pair must be granted.
    Single { resource: String, action: String },
    /// At least one pair must be granted, checked in order.
    Any(Vec<(String, String)>),
}

impl Guard {
    pub fn single(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Single {
            resource: resource.into(),
            action: action.into(),
        }
    }

    pub fn any<I, R, A>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, A)>,
        R: Into<String>,
        A: Into<String>,
    {
        Self::Any(
            pairs
                .into_iter()
                .map(|(resource, action)| (resource.into(), action.into()))
                .collect(),
        )
    }

    /// The `Forbidden` error reported when this guard denies.
    pub fn denial(&self) -> GuardError {
        match self {
            Self::Single { resource, action } => GuardError::Forbidden(format!(
                "You do not have permission to {action} {resource}"
            )),
            Self::Any(_) => GuardError::Forbidden(GENERIC_DENIAL.to_string()),
        }
    }
}

/// Terminal authorization failure for a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// No principal attached to the request.
    #[error("Authentication required")]
    Unauthenticated,

    /// Principal lacks the required permission.
    #[error("{0}")]
    Forbidden(String),
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

type GuardFuture = Pin<Box<dyn Future<Output = Result<Response, GuardError>> + Send>>;

/// Run `guard` for the request's principal and continue on success.
#[tracing::instrument(skip(state, request, next), fields(path = %request.uri().path()))]
async fn enforce(
    state: AppState,
    guard: Guard,
    request: Request,
    next: Next,
) -> Result<Response, GuardError> {
    state
        .permissions
        .authorize(request.extensions().get::<Principal>(), &guard)?;

    Ok(next.run(request).await)
}

fn guard_middleware(
    guard: Guard,
) -> impl Fn(State<AppState>, Request, Next) -> GuardFuture + Clone + Send + 'static {
    move |State(state): State<AppState>, request: Request, next: Next| -> GuardFuture {
        Box::pin(enforce(state, guard.clone(), request, next))
    }
}

/// Middleware requiring one permission.
///
/// Must run after `authenticate` so the principal is attached.
///
/// # Usage
///
/// ```ignore
/// use axum::middleware::from_fn_with_state;
///
/// Router::new()
///     .route("/bookings", post(create_booking))
///     .route_layer(from_fn_with_state(
///         state.clone(),
///         require_permission("bookings", "create"),
///     ))
/// ```
pub fn require_permission(
    resource: impl Into<String>,
    action: impl Into<String>,
) -> impl Fn(State<AppState>, Request, Next) -> GuardFuture + Clone + Send + 'static {
    guard_middleware(Guard::single(resource, action))
}

/// Middleware requiring at least one of several permissions.
///
/// Pairs are checked in order and the first grant wins. An empty list
/// denies every authenticated caller.
pub fn require_any_permission<I, R, A>(
    pairs: I,
) -> impl Fn(State<AppState>, Request, Next) -> GuardFuture + Clone + Send + 'static
where
    I: IntoIterator<Item = (R, A)>,
    R: Into<String>,
    A: Into<String>,
{
    guard_middleware(Guard::any(pairs))
}
