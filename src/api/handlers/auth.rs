//! Authentication request handlers.
//!
//! Registration, login, token refresh and the password reset flow.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
    ResetPasswordRequest,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates authentication-related routes.
///
/// Routes:
/// - POST /register        - Create an account
/// - POST /login           - Authenticate
/// - POST /refresh         - Exchange a refresh token
/// - POST /forgot-password - Start a password reset
/// - POST /reset-password  - Complete a password reset
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
        .routes(routes!(refresh))
        .routes(routes!(forgot_password))
        .routes(routes!(reset_password))
}

/// POST /api/auth/register - Create an account
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Username or email already taken")
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let auth = state
        .services
        .users
        .register(payload.username, payload.email, payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(AuthResponse::from(auth))))
}

/// POST /api/auth/login - Authenticate with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let auth = state
        .services
        .users
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(AuthResponse::from(auth)))
}

/// POST /api/auth/refresh - Exchange a refresh token for a new pair
#[utoipa::path(
    post,
    path = "/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair", body = AuthResponse),
        (status = 401, description = "Invalid or expired refresh token")
    )
)]
async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<AuthResponse>> {
    let auth = state.services.users.refresh(&payload.refresh_token).await?;
    Ok(Json(AuthResponse::from(auth)))
}

/// POST /api/auth/forgot-password - Start a password reset
///
/// Responds 202 whether or not the email belongs to an account.
#[utoipa::path(
    post,
    path = "/forgot-password",
    tag = AUTH_TAG,
    request_body = ForgotPasswordRequest,
    responses(
        (status = 202, description = "Reset initiated if the account exists")
    )
)]
async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordRequest>,
) -> AppResult<StatusCode> {
    state
        .services
        .users
        .request_password_reset(&payload.email)
        .await?;
    Ok(StatusCode::ACCEPTED)
}

/// POST /api/auth/reset-password - Complete a password reset
#[utoipa::path(
    post,
    path = "/reset-password",
    tag = AUTH_TAG,
    request_body = ResetPasswordRequest,
    responses(
        (status = 204, description = "Password updated"),
        (status = 401, description = "Invalid or expired reset code")
    )
)]
async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    state
        .services
        .users
        .reset_password(&payload.email, &payload.code, payload.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
