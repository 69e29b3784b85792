pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::services::{
    auth_service::AuthService, dashboard_service::DashboardService,
    notification_service::NotificationService, request_service::RequestService,
    resource_service::ResourceService, task_service::TaskService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub task_service: TaskService,
    pub resource_service: ResourceService,
    pub request_service: RequestService,
    pub dashboard_service: DashboardService,
    pub notification_service: NotificationService,
    pub bootstrap_admin_username: String,
    pub bootstrap_admin_password: Option<String>,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> error::Result<Self> {
        let notification_service = NotificationService::from_config(config)?;
        Ok(Self::with_notifications(pool, config, notification_service))
    }

    /// Same as [`AppState::new`] with a caller-supplied notifier.
    pub fn with_notifications(
        pool: PgPool,
        config: &Config,
        notification_service: NotificationService,
    ) -> Self {
        let user_service = UserService::new(pool.clone());
        let auth_service = AuthService::new(pool.clone(), config.session_ttl_hours);
        let task_service = TaskService::new(
            pool.clone(),
            user_service.clone(),
            notification_service.clone(),
        );
        let resource_service = ResourceService::new(pool.clone());
        let request_service = RequestService::new(pool.clone());
        let dashboard_service = DashboardService::new(pool.clone());

        Self {
            pool,
            auth_service,
            user_service,
            task_service,
            resource_service,
            request_service,
            dashboard_service,
            notification_service,
            bootstrap_admin_username: config.bootstrap_admin_username.clone(),
            bootstrap_admin_password: config.bootstrap_admin_password.clone(),
        }
    }
}
