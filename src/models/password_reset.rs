//! Password reset code models.
//!
//! Codes are short-lived numeric secrets; only the argon2 hash is stored.

use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::password_reset_codes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PasswordResetCode {
    pub id: i32,
    pub user_id: i32,
    pub code_hash: String,
    pub expires_at: NaiveDateTime,
    pub used: bool,
    pub created_at: NaiveDateTime,
}

impl PasswordResetCode {
    /// A code can be redeemed while it is unused and its expiry has not passed.
    pub fn is_redeemable(&self, now: NaiveDateTime) -> bool {
        !self.used && now < self.expires_at
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::password_reset_codes)]
pub struct NewPasswordResetCode {
    pub user_id: i32,
    pub code_hash: String,
    pub expires_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn code(used: bool, expires_in_minutes: i64) -> PasswordResetCode {
        let now = Utc::now().naive_utc();
        PasswordResetCode {
            id: 1,
            user_id: 1,
            code_hash: "$argon2id$...".to_string(),
            expires_at: now + Duration::minutes(expires_in_minutes),
            used,
            created_at: now,
        }
    }

    #[test]
    fn test_redeemable_window() {
        let now = Utc::now().naive_utc();
        assert!(code(false, 10).is_redeemable(now));
        assert!(!code(true, 10).is_redeemable(now));
        assert!(!code(false, -1).is_redeemable(now));
    }
}
