//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `auth` - Authentication and password reset DTOs
//! - `user` - User response DTOs
//! - `court` - Court CRUD and availability DTOs
//! - `product` - Product CRUD DTOs
//! - `reservation` - Booking and lifecycle DTOs
//! - `dashboard` - Statistics DTOs
//! - `health` - Health check DTOs
//! - `error` - Common error response DTOs
//! - `pagination` - Pagination-related DTOs

mod auth;
mod court;
mod dashboard;
mod error;
mod health;
mod pagination;
mod product;
mod reservation;
mod user;

pub use auth::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
    ResetPasswordRequest,
};
pub use court::{
    AvailabilityQuery, AvailabilityResponse, CourtResponse, CreateCourtRequest, SlotResponse,
    UpdateCourtRequest,
};
pub use dashboard::DashboardStatsResponse;
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use pagination::{PagedResponse, PaginationParams};
pub use product::{
    CreateProductRequest, ProductListParams, ProductResponse, UpdateProductRequest,
};
pub use reservation::{
    CreateReservationRequest, EquipmentLineRequest, EquipmentLineResponse, PlayerRequest,
    PlayerResponse, ReservationDetailResponse, ReservationResponse,
    UpdateReservationStatusRequest,
};
pub use user::UserResponse;
