//! API Router and Application State
//!
//! Central routing configuration and shared state.

pub mod reports;

use axum::{extract::State, middleware::from_fn_with_state, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{auth, config::Config, permissions, permissions::PermissionChecker};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Permission checker over the process-wide table
    pub permissions: PermissionChecker,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(config: Config, permissions: PermissionChecker) -> Self {
        Self {
            config: Arc::new(config),
            permissions,
        }
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes that read the principal; guards are applied per route group
    let api_routes = Router::new()
        .nest("/api/permissions", permissions::router(state.clone()))
        .nest("/api/reports", reports::router(state.clone()))
        .layer(from_fn_with_state(state.clone(), auth::authenticate));

    Router::new()
        // Health check
        .route("/health", get(health_check))
        .merge(api_routes)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // State
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
    /// Number of roles in the loaded permission table
    roles: usize,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        roles: state.permissions.table().roles().count(),
    })
}
