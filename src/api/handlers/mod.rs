//! Request handlers for the API.
//!
//! Handlers are organized by domain:
//! - `auth` - Registration, login, token refresh, password reset
//! - `me` - Current authenticated user
//! - `courts` - Court registry and slot availability
//! - `products` - Product registry
//! - `reservations` - Booking and lifecycle
//! - `dashboard` - Admin statistics
//! - `health` - Health checks

pub mod auth;
pub mod courts;
pub mod dashboard;
pub mod health;
pub mod me;
pub mod products;
pub mod reservations;
