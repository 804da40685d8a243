//! Role based access control.
//!
//! A static `role → resource → actions` table, a fail-closed checker over it,
//! and route guards that turn a check into a 401/403 response.

pub mod checker;
pub mod guard;
pub mod handlers;
pub mod role;
pub mod table;

use axum::{middleware::from_fn_with_state, routing::get, Router};

use crate::api::AppState;

pub use checker::PermissionChecker;
pub use guard::{require_any_permission, require_permission, Guard, GuardError};
pub use role::{Role, UnknownRole};
pub use table::{PermissionTable, ResourceGrants, TableError, BUILTIN_GRANTS};

/// Create the permissions router.
///
/// Routes (principal required):
/// - GET /me - Grants of the calling principal
/// - GET /check - Check one resource/action pair
/// - GET /roles - Full table (requires `roles:read`)
pub fn router(state: AppState) -> Router<AppState> {
    let roles_route = Router::new()
        .route("/roles", get(handlers::list_roles))
        .route_layer(from_fn_with_state(
            state,
            require_permission("roles", "read"),
        ));

    Router::new()
        .route("/me", get(handlers::my_permissions))
        .route("/check", get(handlers::check_permission))
        .merge(roles_route)
}
