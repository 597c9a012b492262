//! Middleware for the API layer.
//!
//! - `auth` - JWT authentication and authorization helpers
//! - `error_handler` - AppError to HTTP response conversion
//! - `logging` - Request/response logging
//! - `request_id` - Request ID generation and propagation

pub mod auth;
pub mod error_handler;
pub mod logging;
pub mod request_id;

pub use auth::{AuthUser, auth_middleware};
pub use logging::logging_middleware;
pub use request_id::{RequestId, error_correlation_middleware, request_id_middleware};
