use axum::{
    extract::{Path, State},
    response::{Json, Redirect},
    Extension, Form,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::user_dto::{CreateUserForm, ResetPasswordForm, TelegramChatForm, UserResponse},
    error::Result,
    middleware::auth::AuthContext,
    models::user::Role,
    AppState,
};

const USERS_PATH: &str = "/admin/users";

#[utoipa::path(
    get,
    path = "/admin/users",
    responses(
        (status = 200, description = "All users, newest first", body = Vec<UserResponse>),
        (status = 403, description = "Not an administrator")
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<UserResponse>>> {
    auth.authorize(&[Role::Admin])?;
    let users = state.user_service.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/admin/users/create",
    responses(
        (status = 303, description = "User created"),
        (status = 400, description = "Invalid form"),
        (status = 409, description = "Username already taken")
    )
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Form(form): Form<CreateUserForm>,
) -> Result<Redirect> {
    auth.authorize(&[Role::Admin])?;
    form.validate()?;
    state.user_service.create(form).await?;
    Ok(Redirect::to(USERS_PATH))
}

#[utoipa::path(
    post,
    path = "/admin/users/{id}/reset-password",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 303, description = "Password replaced"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn reset_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Form(form): Form<ResetPasswordForm>,
) -> Result<Redirect> {
    auth.authorize(&[Role::Admin])?;
    let user = state
        .user_service
        .reset_password(id, form.new_password.as_deref())
        .await?;
    let revoked = state.auth_service.revoke_user_sessions(user.id).await?;
    tracing::info!(user_id = %user.id, revoked, "sessions revoked after password reset");
    Ok(Redirect::to(USERS_PATH))
}

#[utoipa::path(
    post,
    path = "/admin/users/{id}/telegram",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 303, description = "Chat id stored"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn set_telegram(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Form(form): Form<TelegramChatForm>,
) -> Result<Redirect> {
    auth.authorize(&[Role::Admin])?;
    state
        .user_service
        .set_telegram_chat_id(id, form.telegram_chat_id.as_deref())
        .await?;
    Ok(Redirect::to(USERS_PATH))
}
