//! Reporting endpoints.

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use serde::Serialize;

use crate::api::AppState;
use crate::auth::Principal;
use crate::permissions::require_any_permission;

#[derive(Debug, Serialize)]
pub struct ReportSummaryResponse {
    pub success: bool,
    pub message: String,
}

/// Create the reports router.
///
/// - GET /summary - requires `reports:generate` or `reports:read`
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route_layer(from_fn_with_state(
            state,
            require_any_permission([("reports", "generate"), ("reports", "read")]),
        ))
}

/// GET /api/reports/summary
pub async fn summary(principal: Principal) -> Json<ReportSummaryResponse> {
    // TODO: aggregate booking and payment totals once the bookings store is wired in
    Json(ReportSummaryResponse {
        success: true,
        message: format!("Report summary available for {}", principal.role),
    })
}
