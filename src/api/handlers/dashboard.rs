//! Dashboard request handlers.

use axum::{Extension, Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::DASHBOARD_TAG;
use crate::api::dto::DashboardStatsResponse;
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;

/// Creates dashboard routes.
///
/// Routes:
/// - GET /stats - Facility-wide statistics (admin)
pub fn dashboard_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_stats))
}

/// GET /api/dashboard/stats - Facility statistics (admin)
#[utoipa::path(
    get,
    path = "/stats",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Statistics snapshot", body = DashboardStatsResponse),
        (status = 403, description = "Administrator privileges required")
    ),
    security(("bearerAuth" = []))
)]
async fn get_stats(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<DashboardStatsResponse>> {
    auth_user.require_admin()?;

    let stats = state.services.dashboard.stats().await?;
    Ok(Json(DashboardStatsResponse::from(stats)))
}
