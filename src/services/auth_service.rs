use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::middleware::auth::AuthContext;
use crate::models::{session::Session, user::User};
use crate::utils::{crypto, time, token};

pub struct LoginOutcome {
    pub token: String,
    pub user: User,
    pub max_age_secs: i64,
}

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    session_ttl_hours: i64,
}

impl AuthService {
    pub fn new(pool: PgPool, session_ttl_hours: i64) -> Self {
        Self {
            pool,
            session_ttl_hours: session_ttl_hours.max(1),
        }
    }

    /// Every failure mode collapses into [`Error::InvalidCredentials`].
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE username = $1 AND is_active = TRUE
            "#,
        )
        .bind(username.trim())
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            tracing::info!(username, "login rejected");
            return Err(Error::InvalidCredentials);
        };
        if !crypto::verify_password(password.trim(), &user.password_hash) {
            tracing::info!(username, "login rejected");
            return Err(Error::InvalidCredentials);
        }
        let role = user.role().map_err(|e| Error::Internal(e.to_string()))?;

        let token = token::generate_session_token();
        sqlx::query(
            r#"
            INSERT INTO sessions (token_hash, user_id, role, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(crypto::hash_token(&token))
        .bind(user.id)
        .bind(role.as_str())
        .bind(time::hours_from_now(self.session_ttl_hours))
        .execute(&self.pool)
        .await?;

        tracing::info!(user_id = %user.id, role = %role, "login succeeded");
        Ok(LoginOutcome {
            token,
            user,
            max_age_secs: self.session_ttl_hours * 3600,
        })
    }

    /// Live session for a token whose user is still active.
    pub async fn resolve(&self, token: &str) -> Result<Option<AuthContext>> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT s.token_hash, s.user_id, s.role, s.created_at, s.expires_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = $1 AND s.expires_at > NOW() AND u.is_active = TRUE
            "#,
        )
        .bind(crypto::hash_token(token))
        .fetch_optional(&self.pool)
        .await?;

        let Some(session) = session else {
            return Ok(None);
        };
        match session.role.parse() {
            Ok(role) => Ok(Some(AuthContext {
                user_id: session.user_id,
                role,
            })),
            Err(err) => {
                tracing::warn!(user_id = %session.user_id, error = %err, "session with unknown role");
                Ok(None)
            }
        }
    }

    pub async fn logout(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(crypto::hash_token(token))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Drops every session of a user, e.g. after a password reset.
    pub async fn revoke_user_sessions(&self, user_id: uuid::Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
