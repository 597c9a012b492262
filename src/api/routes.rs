//! Router configuration for the API.
//!
//! Centralized route registration, OpenAPI document assembly and middleware
//! configuration.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    auth_middleware, error_correlation_middleware, logging_middleware, request_id_middleware,
};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Route groups
/// - `/api/auth` - Registration, login, refresh, password reset (public)
/// - `/api/me` - Current user (authenticated)
/// - `/api/courts` - Court reads and availability (public), writes (admin)
/// - `/api/products` - Product reads (public), writes (admin)
/// - `/api/reservations` - Bookings (authenticated)
/// - `/api/dashboard` - Statistics (admin)
/// - `/health` - Health checks
/// - `/swagger-ui` - Interactive API documentation
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs
/// first): request IDs are assigned before the logging middleware reads them.
pub fn create_router(state: AppState) -> Router {
    // Routes behind JWT authentication. Admin checks happen in the handlers
    // since the token only proves identity.
    let protected = OpenApiRouter::new()
        .nest("/me", handlers::me::me_routes())
        .nest("/reservations", handlers::reservations::reservation_routes())
        .nest("/dashboard", handlers::dashboard::dashboard_routes())
        .nest("/courts", handlers::courts::court_admin_routes())
        .nest("/products", handlers::products::product_admin_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let public = OpenApiRouter::new()
        .nest("/auth", handlers::auth::auth_routes())
        .nest("/courts", handlers::courts::court_routes())
        .nest("/products", handlers::products::product_routes());

    let api_routes = public.merge(protected);

    let (router, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", api_routes)
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_doc))
        // Middleware is applied in reverse order - last added runs first.
        // The correlation layer sits innermost so it rewrites error bodies
        // before compression touches them.
        .layer(middleware::from_fn(error_correlation_middleware))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
