mod common;

use axum::http::StatusCode;
use common::{body_json, form_post, get, location, login, seed_user, send, setup, PASSWORD};
use operations_backend::models::{task::Task, user::Role};
use sqlx::PgPool;
use uuid::Uuid;

async fn load(pool: &PgPool, id: Uuid) -> Task {
    sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn fix_generator_lifecycle() {
    let (app, pool) = setup().await;
    let admin = seed_user(&pool, Role::Admin, None).await;
    // No chat id: creation must not depend on a notification.
    let worker = seed_user(&pool, Role::Employee, None).await;
    let admin_cookie = login(&app, &admin.username, PASSWORD).await;
    let worker_cookie = login(&app, &worker.username, PASSWORD).await;

    let body = format!(
        "title=Fix+generator&description=&deadline=2024-01-01&assigned_to_id={}",
        worker.id
    );
    let resp = send(&app, form_post("/tasks/create", Some(&admin_cookie), &body)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/tasks");

    let resp = send(&app, get("/tasks", Some(&admin_cookie))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listing = body_json(resp).await;
    let worker_id = worker.id.to_string();
    let listed = listing["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["assigned_to_id"] == worker_id.as_str())
        .expect("task listed");
    assert_eq!(listed["title"], "Fix generator");
    assert!(listing["employees"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["id"] == worker_id.as_str()));
    let id: Uuid = listed["id"].as_str().unwrap().parse().unwrap();

    let task = load(&pool, id).await;
    assert_eq!(task.status, "new");
    assert!(task.is_overdue);
    assert_eq!(task.created_by_id, Some(admin.id));

    // Only the assignee may start it.
    let uri = format!("/tasks/{}/start", id);
    let resp = send(&app, form_post(&uri, Some(&admin_cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(&app, form_post(&uri, Some(&worker_cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/employee");
    let task = load(&pool, id).await;
    assert_eq!(task.status, "in_progress");
    assert!(task.is_overdue);

    // Verification before completion is out of order.
    let accept = format!("/tasks/{}/accept", id);
    let resp = send(&app, form_post(&accept, Some(&admin_cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let resp = send(&app, form_post(&accept, Some(&worker_cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(&app, form_post(&format!("/tasks/{}/done", id), Some(&worker_cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let task = load(&pool, id).await;
    assert_eq!(task.status, "done");
    assert!(!task.is_overdue);

    let resp = send(&app, form_post(&accept, Some(&admin_cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/tasks");
    let task = load(&pool, id).await;
    assert_eq!(task.status, "confirmed");
    assert!(!task.is_overdue);

    let resp = send(&app, form_post(&format!("/tasks/{}/reject", id), Some(&admin_cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = send(&app, get("/employee", Some(&worker_cookie))).await;
    let dashboard = body_json(resp).await;
    assert_eq!(dashboard["counts"]["total"], 1);
    assert_eq!(dashboard["counts"]["completed"], 1);
    assert_eq!(dashboard["counts"]["overdue"], 0);
}

#[tokio::test]
async fn rejected_task_is_recomputed_as_overdue() {
    let (app, pool) = setup().await;
    let manager = seed_user(&pool, Role::Manager, None).await;
    let worker = seed_user(&pool, Role::Employee, Some("  ")).await;
    let manager_cookie = login(&app, &manager.username, PASSWORD).await;
    let worker_cookie = login(&app, &worker.username, PASSWORD).await;

    let body = format!("title=Paint+fence&deadline=2024-01-01&assigned_to_id={}", worker.id);
    let resp = send(&app, form_post("/tasks/create", Some(&manager_cookie), &body)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let id: Uuid = sqlx::query_scalar("SELECT id FROM tasks WHERE assigned_to_id = $1")
        .bind(worker.id)
        .fetch_one(&pool)
        .await
        .unwrap();

    for action in ["start", "done"] {
        let uri = format!("/tasks/{}/{}", id, action);
        let resp = send(&app, form_post(&uri, Some(&worker_cookie), "")).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }
    let resp = send(&app, form_post(&format!("/tasks/{}/reject", id), Some(&manager_cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/manager");

    let task = load(&pool, id).await;
    assert_eq!(task.status, "rejected");
    assert!(task.is_overdue);
}

#[tokio::test]
async fn bad_task_requests() {
    let (app, pool) = setup().await;
    let admin = seed_user(&pool, Role::Admin, None).await;
    let consumer = seed_user(&pool, Role::Consumer, None).await;
    let cookie = login(&app, &admin.username, PASSWORD).await;
    let consumer_cookie = login(&app, &consumer.username, PASSWORD).await;

    let resp = send(&app, form_post("/tasks/create", Some(&cookie), "title=Orphan&deadline=soon")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let (deadline, overdue): (Option<chrono::DateTime<chrono::Utc>>, bool) = sqlx::query_as(
        "SELECT deadline, is_overdue FROM tasks WHERE created_by_id = $1",
    )
    .bind(admin.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(deadline.is_none());
    assert!(!overdue);

    let resp = send(&app, form_post("/tasks/create", Some(&cookie), "title=")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = format!("title=Ghost&assigned_to_id={}", Uuid::new_v4());
    let resp = send(&app, form_post("/tasks/create", Some(&cookie), &body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let missing = format!("/tasks/{}/start", Uuid::new_v4());
    let resp = send(&app, form_post(&missing, Some(&cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let unknown = format!("/tasks/{}/finish", Uuid::new_v4());
    let resp = send(&app, form_post(&unknown, Some(&cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, form_post("/tasks/create", Some(&consumer_cookie), "title=Nope")).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn concurrent_verdicts_admit_only_one() {
    let (app, pool) = setup().await;
    let admin = seed_user(&pool, Role::Admin, None).await;
    let manager = seed_user(&pool, Role::Manager, None).await;
    let worker = seed_user(&pool, Role::Employee, None).await;
    let admin_cookie = login(&app, &admin.username, PASSWORD).await;
    let manager_cookie = login(&app, &manager.username, PASSWORD).await;

    for _ in 0..20 {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO tasks (title, status, assigned_to_id, created_by_id)
            VALUES ('Verdict race', 'done', $1, $2)
            RETURNING id
            "#,
        )
        .bind(worker.id)
        .bind(admin.id)
        .fetch_one(&pool)
        .await
        .unwrap();

        let accept = format!("/tasks/{}/accept", id);
        let reject = format!("/tasks/{}/reject", id);
        let (accepted, rejected) = tokio::join!(
            send(&app, form_post(&accept, Some(&admin_cookie), "")),
            send(&app, form_post(&reject, Some(&manager_cookie), "")),
        );

        let statuses = [accepted.status(), rejected.status()];
        let winners = statuses.iter().filter(|s| **s == StatusCode::SEE_OTHER).count();
        assert_eq!(winners, 1, "{:?}", statuses);
        assert!(statuses.contains(&StatusCode::CONFLICT), "{:?}", statuses);

        let task = load(&pool, id).await;
        let expected = if accepted.status() == StatusCode::SEE_OTHER {
            "confirmed"
        } else {
            "rejected"
        };
        assert_eq!(task.status, expected);
    }
}
