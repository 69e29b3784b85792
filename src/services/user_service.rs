use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user_dto::{CreateUserForm, DEFAULT_RESET_PASSWORD};
use crate::error::{Error, Result};
use crate::models::user::{Role, User};
use crate::utils::crypto;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn list_active_by_role(&self, role: Role) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE role = $1 AND is_active = TRUE
            ORDER BY full_name ASC
            "#,
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn create(&self, form: CreateUserForm) -> Result<User> {
        let role: Role = form
            .role
            .parse()
            .map_err(|e: crate::models::user::UnknownRole| Error::BadRequest(e.to_string()))?;
        let username = form.username.trim().to_string();
        if self.find_by_username(&username).await?.is_some() {
            return Err(Error::Conflict(format!("Username {} is already taken", username)));
        }

        // Login trims the password too.
        let password = form.password.trim();
        if password.chars().count() < 6 {
            return Err(Error::BadRequest(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        let password_hash = crypto::hash_password(password)?;
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, username, password_hash, role, telegram_chat_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(form.full_name.trim())
        .bind(&username)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(form.telegram_chat_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Conflict(format!("Username {} is already taken", username))
            }
            other => other.into(),
        })?;

        tracing::info!(user_id = %user.id, role = %role, "user created");
        Ok(user)
    }

    /// Blank input falls back to the well-known reset password.
    pub async fn reset_password(&self, id: Uuid, new_password: Option<&str>) -> Result<User> {
        let plain = new_password.unwrap_or(DEFAULT_RESET_PASSWORD);
        let password_hash = crypto::hash_password(plain)?;
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET password_hash = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(password_hash)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))?;

        tracing::info!(user_id = %user.id, "password reset");
        Ok(user)
    }

    pub async fn set_telegram_chat_id(&self, id: Uuid, chat_id: Option<&str>) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET telegram_chat_id = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(chat_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))?;
        Ok(user)
    }

    /// Seeds the administrator account unless a user with that name exists.
    /// Returns whether a new account was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool> {
        let password_hash = crypto::hash_password(password)?;
        let result = sqlx::query(
            r#"
            INSERT INTO users (full_name, username, password_hash, role)
            VALUES ('Administrator', $1, $2, 'admin')
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
