//! Login account lookups

use super::Repository;
use crate::{error::AppResult, models::user::User};

impl Repository {
    /// Active account by email, case-insensitive
    pub async fn users_get_active_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, usertype_id, employee_id, employee_name,
                   office_id, is_first_login, is_active, last_login, created_on
            FROM identity.users
            WHERE LOWER(email) = LOWER($1) AND is_active = TRUE
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn users_touch_last_login(&self, id: i32) -> AppResult<()> {
        sqlx::query("UPDATE identity.users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
