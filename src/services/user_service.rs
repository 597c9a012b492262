//! User service: registration, authentication and password reset.
//!
//! Encapsulates credential handling so handlers never touch password hashes
//! or token generation directly.

use chrono::{Duration, Utc};
use rand::Rng;
use tracing::info;

use crate::config::{FacilityConfig, JwtConfig};
use crate::error::{AppError, AppResult};
use crate::models::{NewPasswordResetCode, NewUser, UpdateUser, User};
use crate::repositories::{PasswordResetRepository, UserRepository};
use crate::utils::jwt;
use crate::utils::password::{hash_password, verify_password};

/// A user together with a freshly issued token pair.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    reset_codes: PasswordResetRepository,
    jwt: JwtConfig,
    facility: FacilityConfig,
}

impl UserService {
    pub fn new(
        users: UserRepository,
        reset_codes: PasswordResetRepository,
        jwt: JwtConfig,
        facility: FacilityConfig,
    ) -> Self {
        Self {
            users,
            reset_codes,
            jwt,
            facility,
        }
    }

    /// Registers a new user and issues a token pair.
    ///
    /// The password is argon2id-hashed before it reaches the database.
    /// Duplicate username or email surfaces as a `Duplicate` error from the
    /// unique constraints.
    pub async fn register(
        &self,
        username: String,
        email: String,
        plain_password: String,
    ) -> AppResult<AuthenticatedUser> {
        let hashed = hash_password(&plain_password)?;
        let user = self
            .users
            .create(NewUser {
                username,
                email,
                password: hashed,
                is_admin: false,
            })
            .await?;

        self.issue_tokens(user)
    }

    /// Authenticates a user by email and password.
    ///
    /// Returns `Unauthorized` for both unknown email and wrong password so
    /// the response does not reveal which one failed.
    pub async fn login(
        &self,
        email: &str,
        plain_password: &str,
    ) -> AppResult<AuthenticatedUser> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(plain_password, &user.password)? {
            return Err(invalid_credentials());
        }

        self.issue_tokens(user)
    }

    /// Exchanges a valid refresh token for a new token pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthenticatedUser> {
        let claims = jwt::validate_refresh_token(refresh_token, &self.jwt.secret)?;
        let user_id: i32 = claims.sub.parse().map_err(|_| AppError::Unauthorized {
            message: "Invalid token subject".to_string(),
        })?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(invalid_credentials)?;

        self.issue_tokens(user)
    }

    /// Gets a user by their ID.
    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or(AppError::NotFound {
            entity: "user".to_string(),
            field: "id".to_string(),
            value: id.to_string(),
        })
    }

    /// Starts a password reset for the given email.
    ///
    /// Always succeeds from the caller's point of view so the endpoint does
    /// not reveal whether an account exists. When the account does exist, a
    /// short numeric code is stored hashed and logged for delivery.
    pub async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Ok(());
        };

        let code = generate_reset_code(self.facility.reset_code_length);
        let code_hash = hash_password(&code)?;
        let expires_at = Utc::now().naive_utc()
            + Duration::minutes(self.facility.reset_code_expiration_minutes);

        self.reset_codes
            .create(NewPasswordResetCode {
                user_id: user.id,
                code_hash,
                expires_at,
            })
            .await?;

        // No mail transport is wired up; the code is handed to the delivery
        // channel via the log.
        info!(user_id = user.id, code = %code, "password reset code issued");
        Ok(())
    }

    /// Completes a password reset.
    ///
    /// The code must be the latest issued for the account, unused, unexpired
    /// and match its stored hash. All failures collapse into `Unauthorized`.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: String,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_reset)?;

        let reset_code = self
            .reset_codes
            .find_latest_unused(user.id)
            .await?
            .ok_or_else(invalid_reset)?;

        if !reset_code.is_redeemable(Utc::now().naive_utc()) {
            return Err(invalid_reset());
        }
        if !verify_password(code, &reset_code.code_hash)? {
            return Err(invalid_reset());
        }

        let hashed = hash_password(&new_password)?;
        self.users
            .update(
                user.id,
                UpdateUser {
                    username: None,
                    email: None,
                    password: Some(hashed),
                },
            )
            .await?;
        self.reset_codes.mark_used(reset_code.id).await?;

        info!(user_id = user.id, "password reset completed");
        Ok(())
    }

    /// Counts registered users. Feeds the dashboard.
    pub async fn count_users(&self) -> AppResult<i64> {
        self.users.count().await
    }

    fn issue_tokens(&self, user: User) -> AppResult<AuthenticatedUser> {
        let (access_token, refresh_token) = jwt::generate_token_pair(
            user.id,
            user.email.clone(),
            user.username.clone(),
            user.is_admin,
            &self.jwt.secret,
            self.jwt.access_token_expiration,
            self.jwt.refresh_token_expiration,
        )?;

        Ok(AuthenticatedUser {
            user,
            access_token,
            refresh_token,
        })
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized {
        message: "Invalid email or password".to_string(),
    }
}

fn invalid_reset() -> AppError {
    AppError::Unauthorized {
        message: "Invalid or expired reset code".to_string(),
    }
}

/// Generates a numeric reset code of the given length.
fn generate_reset_code(length: u32) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_code_shape() {
        let code = generate_reset_code(6);
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_reset_code_respects_length() {
        assert_eq!(generate_reset_code(4).len(), 4);
        assert_eq!(generate_reset_code(8).len(), 8);
    }
}
