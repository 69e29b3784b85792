mod common;

use axum::http::StatusCode;
use common::{body_json, connect, get, login, router, send};
use operations_backend::services::notification_service::NotificationService;
use uuid::Uuid;

fn init_db() -> axum::http::Request<axum::body::Body> {
    common::form_post("/init-db", None, "")
}

#[tokio::test]
async fn init_db_seeds_the_admin_once() {
    let (pool, mut config) = connect().await;
    let username = format!("root_{}", Uuid::new_v4().simple());
    config.bootstrap_admin_username = username.clone();
    config.bootstrap_admin_password = Some("bootstrap-pass".to_string());
    let app = router(&pool, &config, NotificationService::new(None));

    let resp = send(&app, init_db()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["admin_created"], true);

    let cookie = login(&app, &username, "bootstrap-pass").await;
    let resp = send(&app, get("/", Some(&cookie))).await;
    assert_eq!(common::location(&resp), "/admin");
    let resp = send(&app, get("/admin", Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, init_db()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["admin_created"], false);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = $1")
        .bind(&username)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn init_db_requires_a_configured_password() {
    let (pool, mut config) = connect().await;
    let username = format!("root_{}", Uuid::new_v4().simple());
    config.bootstrap_admin_username = username.clone();
    config.bootstrap_admin_password = None;
    let app = router(&pool, &config, NotificationService::new(None));

    let resp = send(&app, init_db()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("BOOTSTRAP_ADMIN_PASSWORD"));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = $1")
        .bind(&username)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
