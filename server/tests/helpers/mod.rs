//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for sending requests through the full axum router via
//! `tower::ServiceExt::oneshot`, plus token and body helpers.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{self, header::AUTHORIZATION, Method, Request, Response, StatusCode};
use axum::Router;
use court_server::api::{create_router, AppState};
use court_server::auth::jwt;
use court_server::config::Config;
use court_server::permissions::{PermissionChecker, PermissionTable};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

/// A test application wrapping the full axum router.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub config: Arc<Config>,
}

impl TestApp {
    /// Create a test app over the built-in permission table.
    pub fn new() -> Self {
        Self::with_table(PermissionTable::builtin())
    }

    /// Create a test app over a custom permission table.
    pub fn with_table(table: PermissionTable) -> Self {
        let state = AppState::new(Config::default_for_test(), PermissionChecker::new(table));
        let router = create_router(state.clone());
        let config = state.config.clone();

        Self {
            router,
            state,
            config,
        }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// GET `uri` as a principal with `role`.
    pub async fn get_as(&self, role: &str, uri: &str) -> Response<Body> {
        let token = generate_access_token(&self.config, role);
        self.oneshot(
            Self::request(Method::GET, uri)
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// GET `uri` without credentials.
    pub async fn get_anonymous(&self, uri: &str) -> Response<Body> {
        self.oneshot(Self::request(Method::GET, uri).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }
}

/// Send a request through an arbitrary router.
pub async fn oneshot(router: &Router, request: Request<Body>) -> Response<Body> {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("oneshot request failed")
}

/// Generate an access token for a fresh user with `role`.
pub fn generate_access_token(config: &Config, role: &str) -> String {
    let private_key = config
        .jwt_private_key
        .as_deref()
        .expect("test config has a private key");
    jwt::generate_access_token(Uuid::now_v7(), role, private_key, config.jwt_access_expiry)
        .expect("Failed to generate access token")
}

/// Read a response body as JSON.
pub async fn body_to_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

/// Assert a 401 with the standard body.
pub async fn assert_unauthenticated(response: Response<Body>) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_to_json(response).await,
        serde_json::json!({ "success": false, "message": "Authentication required" })
    );
}

/// Assert a 403 and return its message.
pub async fn assert_forbidden(response: Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_to_json(response).await;
    assert_eq!(body["success"], false);
    body["message"]
        .as_str()
        .expect("message is a string")
        .to_string()
}
