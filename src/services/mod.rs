pub mod auth_service;
pub mod dashboard_service;
pub mod notification_service;
pub mod request_service;
pub mod resource_service;
pub mod task_service;
pub mod user_service;
