pub mod auth;
pub mod bootstrap;
pub mod dashboard;
pub mod health;
pub mod resources;
pub mod tasks;
pub mod users;

use axum::{
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::{
    dto::{
        auth_dto::{LoginForm, LoginPage},
        dashboard_dto::{AdminDashboard, ManagerDashboard, ResourceCounts, TaskCounts},
        resource_dto::{
            ConsumerRequestForm, ContractForm, EventForm, OutsourcingForm, SolarPanelForm,
            VehicleForm,
        },
        user_dto::UserResponse,
    },
    middleware::{
        auth::require_session,
        rate_limit::{throttle_login, LoginThrottle},
    },
    AppState,
};
use resources::{create_resource, list_resource};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::login_page,
        auth::login,
        auth::logout,
        dashboard::admin,
        dashboard::manager,
        users::list_users,
        users::create_user,
        users::reset_password,
        users::set_telegram,
        tasks::list_tasks,
        tasks::create_task,
        tasks::transition_task,
        resources::update_request_status,
        bootstrap::init_db,
    ),
    components(schemas(
        LoginForm,
        LoginPage,
        UserResponse,
        AdminDashboard,
        ManagerDashboard,
        ResourceCounts,
        TaskCounts,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Full application router. Everything except health, login, logout,
/// bootstrap and the API description sits behind the session gate.
pub fn build_router(state: AppState, login_rps: u32) -> Router {
    let throttle = LoginThrottle::new(login_rps);

    let public = Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route(
            "/login",
            get(auth::login_page).merge(
                post(auth::login).layer(from_fn_with_state(throttle, throttle_login)),
            ),
        )
        .route("/logout", get(auth::logout).post(auth::logout))
        .route("/init-db", post(bootstrap::init_db));

    let protected = Router::new()
        .route("/", get(dashboard::home))
        .route("/admin", get(dashboard::admin))
        .route("/manager", get(dashboard::manager))
        .route("/employee", get(dashboard::employee))
        .route("/consumer", get(dashboard::consumer))
        .route("/admin/users", get(users::list_users))
        .route("/admin/users/create", post(users::create_user))
        .route("/admin/users/:id/reset-password", post(users::reset_password))
        .route("/admin/users/:id/telegram", post(users::set_telegram))
        .route("/tasks", get(tasks::list_tasks))
        .route("/tasks/create", post(tasks::create_task))
        .route("/tasks/:id/:action", post(tasks::transition_task))
        .route("/vehicles", get(list_resource::<VehicleForm>))
        .route("/vehicles/create", post(create_resource::<VehicleForm>))
        .route("/contracts", get(list_resource::<ContractForm>))
        .route("/contracts/create", post(create_resource::<ContractForm>))
        .route("/events", get(list_resource::<EventForm>))
        .route("/events/create", post(create_resource::<EventForm>))
        .route("/outsourcings", get(list_resource::<OutsourcingForm>))
        .route("/outsourcings/create", post(create_resource::<OutsourcingForm>))
        .route("/solarpanels", get(list_resource::<SolarPanelForm>))
        .route("/solarpanels/create", post(create_resource::<SolarPanelForm>))
        .route("/requests", get(list_resource::<ConsumerRequestForm>))
        .route("/requests/create", post(create_resource::<ConsumerRequestForm>))
        .route("/requests/:id/status", post(resources::update_request_status))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    public
        .merge(protected)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
