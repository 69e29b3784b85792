use axum::{
    extract::State,
    response::{Json, Redirect},
    Extension,
};

use crate::{
    dto::{
        dashboard_dto::{AdminDashboard, ConsumerDashboard, EmployeeDashboard, ManagerDashboard},
        user_dto::UserResponse,
    },
    error::Result,
    middleware::auth::AuthContext,
    models::user::Role,
    AppState,
};

/// Landing page: sends every session to its role's dashboard.
#[axum::debug_handler]
pub async fn home(Extension(auth): Extension<AuthContext>) -> Redirect {
    Redirect::to(auth.role.dashboard_path())
}

#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "System-wide counters", body = AdminDashboard),
        (status = 403, description = "Not an administrator")
    )
)]
#[axum::debug_handler]
pub async fn admin(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<AdminDashboard>> {
    auth.authorize(&[Role::Admin])?;
    let users = state.dashboard_service.user_count().await?;
    let tasks = state.dashboard_service.task_counts(None).await?;
    let resources = state.dashboard_service.resource_counts().await?;
    Ok(Json(AdminDashboard {
        users,
        tasks: tasks.total,
        resources,
    }))
}

#[utoipa::path(
    get,
    path = "/manager",
    responses(
        (status = 200, description = "Task and resource counters", body = ManagerDashboard),
        (status = 403, description = "Not staff")
    )
)]
#[axum::debug_handler]
pub async fn manager(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<ManagerDashboard>> {
    auth.authorize(&[Role::Manager, Role::Admin])?;
    let tasks = state.dashboard_service.task_counts(None).await?;
    let resources = state.dashboard_service.resource_counts().await?;
    Ok(Json(ManagerDashboard { tasks, resources }))
}

#[axum::debug_handler]
pub async fn employee(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<EmployeeDashboard>> {
    auth.authorize(&[Role::Employee, Role::Manager, Role::Admin])?;
    let user = state.user_service.get_by_id(auth.user_id).await?;
    let counts = state.dashboard_service.task_counts(Some(auth.user_id)).await?;
    let tasks = state.task_service.list_for_assignee(auth.user_id).await?;
    Ok(Json(EmployeeDashboard {
        user: UserResponse::from(user),
        counts,
        tasks,
    }))
}

#[axum::debug_handler]
pub async fn consumer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<ConsumerDashboard>> {
    auth.authorize(&[Role::Consumer])?;
    let user = state.user_service.get_by_id(auth.user_id).await?;
    let requests = state.request_service.list_for_consumer(auth.user_id).await?;
    Ok(Json(ConsumerDashboard {
        user: UserResponse::from(user),
        requests,
    }))
}
