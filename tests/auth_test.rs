mod common;

use axum::http::{header, StatusCode};
use common::{body_json, form_post, get, location, login, seed_user, send, setup, PASSWORD};
use operations_backend::models::user::Role;

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (app, pool) = setup().await;
    let user = seed_user(&pool, Role::Employee, None).await;
    let inactive = seed_user(&pool, Role::Manager, None).await;
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(inactive.id)
        .execute(&pool)
        .await
        .unwrap();

    let attempts = [
        format!("username=nobody_here&password={}", PASSWORD),
        format!("username={}&password=wrong-password", user.username),
        format!("username={}&password={}", inactive.username, PASSWORD),
    ];
    for body in attempts {
        let resp = send(&app, form_post("/login", None, &body)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().get(header::LOCATION).is_none());
        assert!(resp.headers().get(header::SET_COOKIE).is_none());
        let json = body_json(resp).await;
        assert_eq!(json["error"], "Invalid username or password");
    }
}

#[tokio::test]
async fn session_gate_and_role_guard() {
    let (app, pool) = setup().await;

    let resp = send(&app, get("/tasks", None)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let resp = send(&app, get("/tasks", Some("session_id=not-a-real-token"))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let employee = seed_user(&pool, Role::Employee, None).await;
    let cookie = login(&app, &employee.username, PASSWORD).await;

    let resp = send(&app, get("/", Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/employee");

    let resp = send(&app, get("/employee", Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["user"]["username"], employee.username.as_str());
    assert!(json["user"].get("password_hash").is_none());

    for uri in ["/tasks", "/vehicles", "/admin", "/admin/users"] {
        let resp = send(&app, get(uri, Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{}", uri);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "access denied");
    }
}

#[tokio::test]
async fn logout_ends_the_session() {
    let (app, pool) = setup().await;
    let consumer = seed_user(&pool, Role::Consumer, None).await;
    let cookie = login(&app, &consumer.username, PASSWORD).await;

    let resp = send(&app, get("/consumer", Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, form_post("/logout", Some(&cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let resp = send(&app, get("/consumer", Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn admin_manages_users() {
    let (app, pool) = setup().await;
    let admin = seed_user(&pool, Role::Admin, None).await;
    let cookie = login(&app, &admin.username, PASSWORD).await;

    let username = format!("new_{}", uuid::Uuid::new_v4().simple());
    let body = format!(
        "full_name=New+Hire&username={}&password=abcdef&role=employee",
        username
    );
    let resp = send(&app, form_post("/admin/users/create", Some(&cookie), &body)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/users");

    let resp = send(&app, form_post("/admin/users/create", Some(&cookie), &body)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let short = format!("full_name=X&username=x_{}&password=123&role=employee", username);
    let resp = send(&app, form_post("/admin/users/create", Some(&cookie), &short)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, get("/admin/users", Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let users = body_json(resp).await;
    let created = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == username.as_str())
        .expect("created user listed")
        .clone();
    let id = created["id"].as_str().unwrap();

    let uri = format!("/admin/users/{}/reset-password", id);
    let resp = send(&app, form_post(&uri, Some(&cookie), "new_password=")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    login(&app, &username, "123456").await;

    let missing = format!("/admin/users/{}/reset-password", uuid::Uuid::new_v4());
    let resp = send(&app, form_post(&missing, Some(&cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn padded_password_still_logs_in() {
    let (app, pool) = setup().await;
    let admin = seed_user(&pool, Role::Admin, None).await;
    let cookie = login(&app, &admin.username, PASSWORD).await;

    let username = format!("pad_{}", uuid::Uuid::new_v4().simple());
    let body = format!(
        "full_name=Padded&username={}&password=%20%20padded1%20&role=consumer",
        username
    );
    let resp = send(&app, form_post("/admin/users/create", Some(&cookie), &body)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    login(&app, &username, "padded1").await;
    login(&app, &username, "%20padded1%20%20").await;

    // Six characters only once the padding is counted.
    let body = format!(
        "full_name=Short&username=short_{}&password=%20%20abc%20&role=consumer",
        username
    );
    let resp = send(&app, form_post("/admin/users/create", Some(&cookie), &body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
