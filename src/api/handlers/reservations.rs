//! Reservation request handlers.
//!
//! Booking creation, listing, detail and lifecycle transitions. All routes
//! require authentication.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::RESERVATION_TAG;
use crate::api::dto::{
    CreateReservationRequest, PagedResponse, PaginationParams, ReservationDetailResponse,
    ReservationResponse, UpdateReservationStatusRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::ReservationStatus;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates reservation-related routes.
///
/// Routes:
/// - GET /              - List own reservations (admin: all)
/// - POST /             - Book a court
/// - GET /{id}          - Reservation detail
/// - PATCH /{id}/status - Lifecycle transition
pub fn reservation_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_reservations))
        .routes(routes!(create_reservation))
        .routes(routes!(get_reservation))
        .routes(routes!(update_reservation_status))
}

/// GET /api/reservations - List reservations
///
/// Regular users see their own bookings; administrators see everyone's.
#[utoipa::path(
    get,
    path = "/",
    tag = RESERVATION_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated list of reservations", body = PagedResponse<ReservationResponse>)
    ),
    security(("bearerAuth" = []))
)]
async fn list_reservations(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PagedResponse<ReservationResponse>>> {
    let owner = if auth_user.is_admin {
        None
    } else {
        Some(auth_user.user_id)
    };

    let (reservations, total) = state
        .services
        .reservations
        .list_reservations(params.offset() as i64, params.limit() as i64, owner)
        .await?;

    let responses: Vec<ReservationResponse> = reservations
        .into_iter()
        .map(ReservationResponse::from)
        .collect();
    Ok(Json(PagedResponse::new(responses, &params, total as u64)))
}

/// POST /api/reservations - Book a court
///
/// The overlap check and all inserts run in one database transaction; a
/// clash with a confirmed booking returns 409.
#[utoipa::path(
    post,
    path = "/",
    tag = RESERVATION_TAG,
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ReservationDetailResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Court or product not found"),
        (status = 409, description = "Slot already booked or insufficient stock")
    ),
    security(("bearerAuth" = []))
)]
async fn create_reservation(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationDetailResponse>)> {
    let detail = state
        .services
        .reservations
        .create_reservation(auth_user.user_id, payload.into_input())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ReservationDetailResponse::from(detail)),
    ))
}

/// GET /api/reservations/:id - Reservation detail
///
/// Includes players and equipment lines. Owner or admin only.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = RESERVATION_TAG,
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation detail", body = ReservationDetailResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Reservation not found")
    ),
    security(("bearerAuth" = []))
)]
async fn get_reservation(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<ReservationDetailResponse>> {
    let detail = state.services.reservations.get_detail(id).await?;
    auth_user.require_self_or_admin(detail.reservation.user_id)?;
    Ok(Json(ReservationDetailResponse::from(detail)))
}

/// PATCH /api/reservations/:id/status - Lifecycle transition
///
/// Owners may cancel their own bookings; confirming and completing require
/// administrator privileges. Transitions outside the lifecycle matrix
/// return 422.
#[utoipa::path(
    patch,
    path = "/{id}/status",
    tag = RESERVATION_TAG,
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateReservationStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ReservationResponse),
        (status = 403, description = "Not allowed for this user"),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Slot was booked while pending"),
        (status = 422, description = "Transition not allowed")
    ),
    security(("bearerAuth" = []))
)]
async fn update_reservation_status(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateReservationStatusRequest>,
) -> AppResult<Json<ReservationResponse>> {
    let current = state.services.reservations.get_reservation(id).await?;
    match payload.status {
        ReservationStatus::Cancelled => auth_user.require_self_or_admin(current.user_id)?,
        _ => auth_user.require_admin()?,
    }

    let updated = state
        .services
        .reservations
        .change_status(id, payload.status)
        .await?;
    Ok(Json(ReservationResponse::from(updated)))
}
