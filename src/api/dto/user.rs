//! User-related Data Transfer Objects

use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::User;

/// Public user representation. The password hash never leaves the server.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// User's unique identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Username
    #[schema(example = "john_doe")]
    pub username: String,
    /// Email address
    #[schema(example = "user@example.com", format = "email")]
    pub email: String,
    /// Whether the user has administrator privileges
    pub is_admin: bool,
    /// Account creation timestamp
    pub created_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}
