//! Court registry and availability request handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::COURT_TAG;
use crate::api::dto::{
    AvailabilityQuery, AvailabilityResponse, CourtResponse, CreateCourtRequest, PagedResponse,
    PaginationParams, SlotResponse, UpdateCourtRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates the publicly readable court routes.
///
/// Routes:
/// - GET /                  - List courts
/// - GET /{id}              - Get court by ID
/// - GET /{id}/availability - Slot grid for one day
pub fn court_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_courts))
        .routes(routes!(get_court))
        .routes(routes!(get_availability))
}

/// Creates the admin-only court routes.
///
/// Routes:
/// - POST /        - Create court
/// - PUT /{id}     - Update court
/// - DELETE /{id}  - Delete court
pub fn court_admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_court))
        .routes(routes!(update_court))
        .routes(routes!(delete_court))
}

/// GET /api/courts - List courts
#[utoipa::path(
    get,
    path = "/",
    tag = COURT_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated list of courts", body = PagedResponse<CourtResponse>)
    )
)]
async fn list_courts(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PagedResponse<CourtResponse>>> {
    let (courts, total) = state
        .services
        .courts
        .list_courts(params.offset() as i64, params.limit() as i64)
        .await?;

    let responses: Vec<CourtResponse> = courts.into_iter().map(CourtResponse::from).collect();
    Ok(Json(PagedResponse::new(responses, &params, total as u64)))
}

/// GET /api/courts/:id - Get court by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = COURT_TAG,
    params(("id" = i32, Path, description = "Court ID")),
    responses(
        (status = 200, description = "Court details", body = CourtResponse),
        (status = 404, description = "Court not found")
    )
)]
async fn get_court(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CourtResponse>> {
    let court = state.services.courts.get_court(id).await?;
    Ok(Json(CourtResponse::from(court)))
}

/// GET /api/courts/:id/availability - Slot availability for one day
///
/// Generates the 60-minute slot grid between the facility's opening and
/// closing hours and marks slots taken by confirmed reservations.
#[utoipa::path(
    get,
    path = "/{id}/availability",
    tag = COURT_TAG,
    params(
        ("id" = i32, Path, description = "Court ID"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Slot grid for the requested day", body = AvailabilityResponse),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Court not found")
    )
)]
async fn get_availability(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedQuery(query): ValidatedQuery<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let slots = state.services.reservations.availability(id, query.date).await?;
    Ok(Json(AvailabilityResponse {
        court_id: id,
        date: query.date,
        slots: slots.into_iter().map(SlotResponse::from).collect(),
    }))
}

/// POST /api/courts - Create court (admin)
#[utoipa::path(
    post,
    path = "/",
    tag = COURT_TAG,
    request_body = CreateCourtRequest,
    responses(
        (status = 201, description = "Court created", body = CourtResponse),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Administrator privileges required"),
        (status = 409, description = "Court name already taken")
    ),
    security(("bearerAuth" = []))
)]
async fn create_court(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateCourtRequest>,
) -> AppResult<(StatusCode, Json<CourtResponse>)> {
    auth_user.require_admin()?;

    let court = state
        .services
        .courts
        .create_court(payload.into_new_court())
        .await?;
    Ok((StatusCode::CREATED, Json(CourtResponse::from(court))))
}

/// PUT /api/courts/:id - Update court (admin)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = COURT_TAG,
    params(("id" = i32, Path, description = "Court ID")),
    request_body = UpdateCourtRequest,
    responses(
        (status = 200, description = "Court updated", body = CourtResponse),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Court not found")
    ),
    security(("bearerAuth" = []))
)]
async fn update_court(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCourtRequest>,
) -> AppResult<Json<CourtResponse>> {
    auth_user.require_admin()?;

    let court = state
        .services
        .courts
        .update_court(id, payload.into_update_court())
        .await?;
    Ok(Json(CourtResponse::from(court)))
}

/// DELETE /api/courts/:id - Delete court (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = COURT_TAG,
    params(("id" = i32, Path, description = "Court ID")),
    responses(
        (status = 204, description = "Court deleted"),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Court not found")
    ),
    security(("bearerAuth" = []))
)]
async fn delete_court(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;

    state.services.courts.delete_court(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
