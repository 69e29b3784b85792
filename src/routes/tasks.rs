use axum::{
    extract::{Path, State},
    response::{Json, Redirect},
    Extension, Form,
};
use uuid::Uuid;

use crate::{
    dto::{
        task_dto::{CreateTaskForm, TaskListResponse},
        user_dto::UserResponse,
    },
    error::{Error, Result},
    middleware::auth::AuthContext,
    models::{task::TaskAction, user::Role},
    AppState,
};

const STAFF: &[Role] = &[Role::Manager, Role::Admin];

#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "All tasks, newest first, with assignable employees"),
        (status = 403, description = "Not staff")
    )
)]
#[axum::debug_handler]
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<TaskListResponse>> {
    auth.authorize(STAFF)?;
    let tasks = state.task_service.list().await?;
    let employees = state
        .user_service
        .list_active_by_role(Role::Employee)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(TaskListResponse { tasks, employees }))
}

#[utoipa::path(
    post,
    path = "/tasks/create",
    responses(
        (status = 303, description = "Task created"),
        (status = 400, description = "Missing title or unknown assignee"),
        (status = 403, description = "Not staff")
    )
)]
#[axum::debug_handler]
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Form(form): Form<CreateTaskForm>,
) -> Result<Redirect> {
    auth.authorize(STAFF)?;
    state.task_service.create(form, &auth).await?;
    Ok(Redirect::to("/tasks"))
}

#[utoipa::path(
    post,
    path = "/tasks/{id}/{action}",
    params(
        ("id" = Uuid, Path, description = "Task ID"),
        ("action" = String, Path, description = "start, done, accept or reject")
    ),
    responses(
        (status = 303, description = "Status changed"),
        (status = 400, description = "Unknown action"),
        (status = 403, description = "Role or assignee check failed"),
        (status = 404, description = "Task not found"),
        (status = 409, description = "Action not allowed from the current status")
    )
)]
#[axum::debug_handler]
pub async fn transition_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((id, action)): Path<(Uuid, String)>,
) -> Result<Redirect> {
    let action: TaskAction = action.parse().map_err(Error::BadRequest)?;
    state.task_service.transition(id, action, &auth).await?;
    Ok(Redirect::to(after_transition(auth.role)))
}

fn after_transition(role: Role) -> &'static str {
    match role {
        Role::Admin => "/tasks",
        other => other.dashboard_path(),
    }
}
