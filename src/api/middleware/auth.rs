//! JWT authentication middleware.
//!
//! Provides middleware for validating JWT tokens and extracting user claims.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Extension type for authenticated user information
///
/// This is added to request extensions after successful authentication
/// and can be extracted in handlers using `Extension<AuthUser>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID from JWT claims
    pub user_id: i32,
    /// User email from JWT claims
    pub email: String,
    /// Username from JWT claims
    pub username: String,
    /// Whether the user has administrator privileges
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub.parse().unwrap_or(0),
            email: claims.email,
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}

impl AuthUser {
    /// Errors with `Forbidden` unless the user is an administrator.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::Forbidden {
                message: "Administrator privileges required".to_string(),
            })
        }
    }

    /// Errors with `Forbidden` unless the user owns the resource or is an
    /// administrator.
    pub fn require_self_or_admin(&self, owner_id: i32) -> Result<(), AppError> {
        if self.is_admin || self.user_id == owner_id {
            Ok(())
        } else {
            Err(AppError::Forbidden {
                message: "Access to this resource is restricted to its owner".to_string(),
            })
        }
    }
}

/// JWT authentication middleware
///
/// Validates the JWT token from the Authorization header and adds
/// the authenticated user information to request extensions.
///
/// # Headers
/// Expects: `Authorization: Bearer <token>`
///
/// # Errors
/// Returns 401 Unauthorized if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token validation fails
/// - Token has expired
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing authorization header".to_string(),
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        })?;

    let claims = validate_access_token(token, &state.jwt_config.secret)?;

    let auth_user = AuthUser::from(claims);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::TokenType;

    fn claims(is_admin: bool) -> Claims {
        Claims {
            sub: "123".to_string(),
            email: "test@example.com".to_string(),
            username: "testuser".to_string(),
            is_admin,
            token_type: TokenType::Access,
            iat: 0,
            exp: 9999999999,
        }
    }

    #[test]
    fn test_auth_user_from_claims() {
        let auth_user = AuthUser::from(claims(false));
        assert_eq!(auth_user.user_id, 123);
        assert_eq!(auth_user.email, "test@example.com");
        assert_eq!(auth_user.username, "testuser");
        assert!(!auth_user.is_admin);
    }

    #[test]
    fn test_auth_user_from_claims_invalid_id() {
        let mut bad = claims(false);
        bad.sub = "invalid".to_string();
        let auth_user = AuthUser::from(bad);
        assert_eq!(auth_user.user_id, 0); // Falls back to 0 on parse error
    }

    #[test]
    fn test_require_admin() {
        assert!(AuthUser::from(claims(true)).require_admin().is_ok());
        assert!(matches!(
            AuthUser::from(claims(false)).require_admin(),
            Err(AppError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_require_self_or_admin() {
        let user = AuthUser::from(claims(false));
        assert!(user.require_self_or_admin(123).is_ok());
        assert!(user.require_self_or_admin(999).is_err());

        let admin = AuthUser::from(claims(true));
        assert!(admin.require_self_or_admin(999).is_ok());
    }
}
