use serde::Serialize;

use crate::dto::user_dto::UserResponse;
use crate::models::{consumer_request::ConsumerRequest, task::Task};

#[derive(Debug, Clone, Default, Serialize, utoipa::ToSchema)]
pub struct ResourceCounts {
    pub vehicles: i64,
    pub contracts: i64,
    pub events: i64,
    pub outsourcings: i64,
    pub solar_panels: i64,
    pub requests: i64,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct AdminDashboard {
    pub users: i64,
    pub tasks: i64,
    #[serde(flatten)]
    pub resources: ResourceCounts,
}

#[derive(Debug, Clone, Default, Serialize, utoipa::ToSchema)]
pub struct TaskCounts {
    pub total: i64,
    pub completed: i64,
    pub overdue: i64,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ManagerDashboard {
    pub tasks: TaskCounts,
    #[serde(flatten)]
    pub resources: ResourceCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeDashboard {
    pub user: UserResponse,
    pub counts: TaskCounts,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsumerDashboard {
    pub user: UserResponse,
    pub requests: Vec<ConsumerRequest>,
}
