use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Token type enumeration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token for API authentication (short-lived)
    Access,
    /// Refresh token for obtaining new access tokens (long-lived)
    Refresh,
}

/// JWT Claims structure containing user information and token metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// Username
    pub username: String,
    /// Whether the user has administrator privileges
    pub is_admin: bool,
    /// Token type (access or refresh)
    pub token_type: TokenType,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user
    pub fn new(
        user_id: i32,
        email: String,
        username: String,
        is_admin: bool,
        token_type: TokenType,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            email,
            username,
            is_admin,
            token_type,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

/// Generates a JWT token for a user
///
/// # Arguments
/// * `user_id` - The user's ID
/// * `email` - The user's email
/// * `username` - The user's username
/// * `is_admin` - Whether the user is an administrator
/// * `token_type` - The type of token (Access or Refresh)
/// * `secret` - The secret key for signing the token
/// * `expiration_hours` - Token validity duration in hours
pub fn generate_token(
    user_id: i32,
    email: String,
    username: String,
    is_admin: bool,
    token_type: TokenType,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(
        user_id,
        email,
        username,
        is_admin,
        token_type,
        expiration_hours,
    );

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Generates an access token (short-lived)
pub fn generate_access_token(
    user_id: i32,
    email: String,
    username: String,
    is_admin: bool,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    generate_token(
        user_id,
        email,
        username,
        is_admin,
        TokenType::Access,
        secret,
        expiration_hours,
    )
}

/// Generates a refresh token (long-lived)
pub fn generate_refresh_token(
    user_id: i32,
    email: String,
    username: String,
    is_admin: bool,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    generate_token(
        user_id,
        email,
        username,
        is_admin,
        TokenType::Refresh,
        secret,
        expiration_hours,
    )
}

/// Generates both access and refresh tokens
///
/// # Returns
/// A tuple of (access_token, refresh_token)
pub fn generate_token_pair(
    user_id: i32,
    email: String,
    username: String,
    is_admin: bool,
    secret: &str,
    access_expiration_hours: i64,
    refresh_expiration_hours: i64,
) -> AppResult<(String, String)> {
    let access_token = generate_access_token(
        user_id,
        email.clone(),
        username.clone(),
        is_admin,
        secret,
        access_expiration_hours,
    )?;

    let refresh_token = generate_refresh_token(
        user_id,
        email,
        username,
        is_admin,
        secret,
        refresh_expiration_hours,
    )?;

    Ok((access_token, refresh_token))
}

/// Validates and decodes a JWT token
///
/// # Arguments
/// * `token` - The JWT token string to validate
/// * `secret` - The secret key for verifying the token
/// * `expected_type` - Optional expected token type to validate against
///
/// # Returns
/// The decoded claims if the token is valid
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::Unauthorized {
            message: "Token has expired".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::Unauthorized {
            message: "Invalid token".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::Unauthorized {
            message: "Invalid token signature".to_string(),
        },
        _ => AppError::Unauthorized {
            message: format!("Token validation failed: {}", e),
        },
    })?;

    // Validate token type if specified
    if let Some(expected) = expected_type {
        if claims.token_type != expected {
            return Err(AppError::Unauthorized {
                message: format!(
                    "Invalid token type: expected {:?}, got {:?}",
                    expected, claims.token_type
                ),
            });
        }
    }

    Ok(claims)
}

/// Validates an access token
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

/// Validates a refresh token
pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test_secret_key_for_jwt_testing";

    #[test]
    fn test_generate_token() {
        let token = generate_token(
            1,
            "test@example.com".to_string(),
            "testuser".to_string(),
            false,
            TokenType::Access,
            TEST_SECRET,
            24,
        );

        assert!(token.is_ok());
        let token_str = token.unwrap();
        assert!(!token_str.is_empty());
        assert!(token_str.contains('.'));
    }

    #[test]
    fn test_generate_token_pair() {
        let result = generate_token_pair(
            1,
            "test@example.com".to_string(),
            "testuser".to_string(),
            false,
            TEST_SECRET,
            1,
            168,
        );

        assert!(result.is_ok());
        let (access_token, refresh_token) = result.unwrap();
        assert!(!access_token.is_empty());
        assert!(!refresh_token.is_empty());
        assert_ne!(access_token, refresh_token);
    }

    #[test]
    fn test_validate_token_success() {
        let token = generate_token(
            1,
            "test@example.com".to_string(),
            "testuser".to_string(),
            true,
            TokenType::Access,
            TEST_SECRET,
            24,
        )
        .unwrap();

        let claims = validate_token(&token, TEST_SECRET, None).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.username, "testuser");
        assert!(claims.is_admin);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_validate_wrong_token_type() {
        let access_token = generate_access_token(
            1,
            "test@example.com".to_string(),
            "testuser".to_string(),
            false,
            TEST_SECRET,
            1,
        )
        .unwrap();

        // Try to validate access token as refresh token
        let result = validate_refresh_token(&access_token, TEST_SECRET);
        assert!(result.is_err());

        if let Err(AppError::Unauthorized { message }) = result {
            assert!(message.contains("Invalid token type"));
        } else {
            panic!("Expected Unauthorized error for wrong token type");
        }
    }

    #[test]
    fn test_validate_token_invalid_secret() {
        let token = generate_token(
            1,
            "test@example.com".to_string(),
            "testuser".to_string(),
            false,
            TokenType::Access,
            TEST_SECRET,
            24,
        )
        .unwrap();

        let result = validate_token(&token, "wrong_secret", None);
        assert!(result.is_err());

        if let Err(AppError::Unauthorized { message }) = result {
            assert!(message.contains("signature"));
        } else {
            panic!("Expected Unauthorized error");
        }
    }

    #[test]
    fn test_expired_token() {
        let token = generate_token(
            1,
            "test@example.com".to_string(),
            "testuser".to_string(),
            false,
            TokenType::Access,
            TEST_SECRET,
            -1, // Negative hours to create an already expired token
        )
        .unwrap();

        let result = validate_token(&token, TEST_SECRET, None);
        assert!(result.is_err());

        if let Err(AppError::Unauthorized { message }) = result {
            assert!(message.contains("expired"));
        } else {
            panic!("Expected Unauthorized error for expired token");
        }
    }

    #[test]
    fn test_claims_structure() {
        let claims = Claims::new(
            42,
            "user@example.com".to_string(),
            "username".to_string(),
            false,
            TokenType::Refresh,
            24,
        );

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.token_type, TokenType::Refresh);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_type_serialization() {
        let claims = Claims::new(
            1,
            "test@example.com".to_string(),
            "testuser".to_string(),
            false,
            TokenType::Access,
            1,
        );

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"token_type\":\"access\""));
    }
}
