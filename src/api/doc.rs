use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const AUTH_TAG: &str = "Auth";
pub const USER_TAG: &str = "User";
pub const COURT_TAG: &str = "Courts";
pub const PRODUCT_TAG: &str = "Products";
pub const RESERVATION_TAG: &str = "Reservations";
pub const DASHBOARD_TAG: &str = "Dashboard";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Courtside",
        description = "Sports facility reservation API: courts, time slots, equipment and bookings",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = AUTH_TAG, description = "Authentication and password reset endpoints"),
        (name = USER_TAG, description = "User profile endpoints"),
        (name = COURT_TAG, description = "Court registry and slot availability endpoints"),
        (name = PRODUCT_TAG, description = "Equipment product registry endpoints"),
        (name = RESERVATION_TAG, description = "Booking and lifecycle endpoints"),
        (name = DASHBOARD_TAG, description = "Administrator statistics endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer Token Authentication"))
                        .build(),
                ),
            )
        }
    }
}
