use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Json, Redirect},
    Form,
};

use crate::{
    dto::auth_dto::{LoginForm, LoginPage},
    error::Result,
    middleware::auth::{clear_session_cookie, session_cookie, session_token},
    AppState,
};

#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login form", body = LoginPage))
)]
#[axum::debug_handler]
pub async fn login_page() -> Json<LoginPage> {
    Json(LoginPage { error: None })
}

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Session created, redirected to the role dashboard"),
        (status = 401, description = "Invalid username or password"),
        (status = 429, description = "Too many login attempts")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse> {
    let outcome = state
        .auth_service
        .login(form.username.trim(), form.password.trim())
        .await?;
    let cookie = session_cookie(&outcome.token, outcome.max_age_secs);
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")))
}

#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 303, description = "Session removed, redirected to /login"))
)]
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<impl IntoResponse> {
    if let Some(token) = session_token(&headers) {
        state.auth_service.logout(&token).await?;
    }
    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/login"),
    ))
}
