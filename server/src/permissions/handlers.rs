//! Permission introspection endpoints.
//!
//! Lets the frontend decide which controls to show without duplicating the
//! table client-side.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::role::Role;
use super::table::{PermissionTable, ResourceGrants};
use crate::api::AppState;
use crate::auth::Principal;

/// Grants of the calling principal.
#[derive(Debug, Serialize)]
pub struct MyPermissionsResponse {
    pub success: bool,
    pub role: String,
    /// Empty when the role is unknown to the table.
    pub permissions: ResourceGrants,
}

/// Query for a single permission check.
#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub resource: String,
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub success: bool,
    pub allowed: bool,
}

#[derive(Debug, Serialize)]
pub struct RolesResponse<'a> {
    pub success: bool,
    pub roles: &'a PermissionTable,
}

/// GET /api/permissions/me
#[tracing::instrument(skip(state))]
pub async fn my_permissions(
    State(state): State<AppState>,
    principal: Principal,
) -> Json<MyPermissionsResponse> {
    let permissions = principal
        .role
        .parse::<Role>()
        .ok()
        .and_then(|role| state.permissions.table().resources(role))
        .cloned()
        .unwrap_or_default();

    Json(MyPermissionsResponse {
        success: true,
        role: principal.role,
        permissions,
    })
}

/// GET /api/permissions/check?resource=&action=
#[tracing::instrument(skip(state))]
pub async fn check_permission(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<CheckQuery>,
) -> Json<CheckResponse> {
    Json(CheckResponse {
        success: true,
        allowed: state
            .permissions
            .has_permission(&principal.role, &query.resource, &query.action),
    })
}

/// GET /api/permissions/roles
///
/// Full table. Mounted behind `require_permission("roles", "read")`.
pub async fn list_roles(State(state): State<AppState>) -> Response {
    Json(RolesResponse {
        success: true,
        roles: state.permissions.table(),
    })
    .into_response()
}
