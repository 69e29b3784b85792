pub mod auth_dto;
pub mod dashboard_dto;
pub mod resource_dto;
pub mod task_dto;
pub mod user_dto;
