use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::user::{Role, User};
use crate::utils::form;

pub const DEFAULT_RESET_PASSWORD: &str = "123456";

fn known_role(role: &str) -> Result<(), ValidationError> {
    role.parse::<Role>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_role"))
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 150))]
    pub full_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 80))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 6))]
    pub password: String,
    #[serde(default)]
    #[validate(custom(function = "known_role"))]
    pub role: String,
    #[serde(default, deserialize_with = "form::optional_text")]
    pub telegram_chat_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordForm {
    #[serde(default, deserialize_with = "form::optional_text")]
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramChatForm {
    #[serde(default, deserialize_with = "form::optional_text")]
    pub telegram_chat_id: Option<String>,
}

/// User as shown to administrators; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub username: String,
    pub role: String,
    pub is_active: bool,
    pub telegram_chat_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            username: u.username,
            role: u.role,
            is_active: u.is_active,
            telegram_chat_id: u.telegram_chat_id,
            created_at: u.created_at,
        }
    }
}
