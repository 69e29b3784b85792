#![allow(dead_code)]

use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use operations_backend::{
    config::{get_config, init_config, Config},
    database::pool::create_pool,
    dto::user_dto::CreateUserForm,
    models::user::{Role, User},
    routes::build_router,
    services::{notification_service::NotificationService, user_service::UserService},
    AppState,
};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "s3cret-pass";

/// Pool over the database from `DATABASE_URL`, migrated, plus a copy of the
/// shared config for tests that need to tweak it.
pub async fn connect() -> (PgPool, Config) {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    // Every test in a binary shares one config.
    let _ = init_config();
    let config = get_config().clone();

    let pool = create_pool().await.expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    (pool, config)
}

pub fn router(pool: &PgPool, config: &Config, notifications: NotificationService) -> Router {
    let state = AppState::with_notifications(pool.clone(), config, notifications);
    build_router(state, 1000)
}

/// Router with notifications off.
pub async fn setup() -> (Router, PgPool) {
    let (pool, config) = connect().await;
    (router(&pool, &config, NotificationService::new(None)), pool)
}

pub async fn seed_user(pool: &PgPool, role: Role, chat_id: Option<&str>) -> User {
    let username = format!("{}_{}", role, Uuid::new_v4().simple());
    UserService::new(pool.clone())
        .create(CreateUserForm {
            full_name: format!("Test {}", role),
            username,
            password: PASSWORD.to_string(),
            role: role.as_str().to_string(),
            telegram_chat_id: chat_id.map(str::to_string),
        })
        .await
        .expect("seed user")
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub fn form_post(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Logs in and returns the `session_id=...` pair for later requests.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let body = format!("username={}&password={}", username, password);
    let resp = send(app, form_post("/login", None, &body)).await;
    assert_eq!(resp.status(), 303, "login failed for {}", username);
    resp.headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("session cookie")
        .to_string()
}

pub async fn body_json(resp: Response<Body>) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
