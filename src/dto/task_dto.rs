use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::user_dto::UserResponse;
use crate::models::task::Task;
use crate::utils::form;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskForm {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "form::optional_text")]
    pub description: Option<String>,
    /// `YYYY-MM-DD`; anything else is ignored.
    #[serde(default, deserialize_with = "form::optional_date")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, deserialize_with = "form::optional_uuid")]
    pub assigned_to_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub employees: Vec<UserResponse>,
}
