//! Password reset code repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewPasswordResetCode, PasswordResetCode};

#[derive(Clone)]
pub struct PasswordResetRepository {
    pool: AsyncDbPool,
}

impl PasswordResetRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Stores a new reset code, invalidating any still-active codes for the
    /// same user so only the most recent one can be redeemed.
    pub async fn create(
        &self,
        new_code: NewPasswordResetCode,
    ) -> Result<PasswordResetCode, AppError> {
        use crate::schema::password_reset_codes::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(
            password_reset_codes
                .filter(user_id.eq(new_code.user_id))
                .filter(used.eq(false)),
        )
        .set(used.eq(true))
        .execute(&mut conn)
        .await?;

        diesel::insert_into(password_reset_codes)
            .values(&new_code)
            .returning(PasswordResetCode::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Latest unused code for a user, if any. Expiry is checked by the caller.
    pub async fn find_latest_unused(
        &self,
        owner_id: i32,
    ) -> Result<Option<PasswordResetCode>, AppError> {
        use crate::schema::password_reset_codes::dsl::*;
        let mut conn = self.pool.get().await?;

        password_reset_codes
            .filter(user_id.eq(owner_id))
            .filter(used.eq(false))
            .order(created_at.desc())
            .select(PasswordResetCode::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Marks a code as used after a successful redemption.
    pub async fn mark_used(&self, code_id: i32) -> Result<(), AppError> {
        use crate::schema::password_reset_codes::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(password_reset_codes.filter(id.eq(code_id)))
            .set(used.eq(true))
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}
