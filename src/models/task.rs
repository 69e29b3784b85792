use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    New,
    InProgress,
    Done,
    Confirmed,
    Rejected,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::New,
        TaskStatus::InProgress,
        TaskStatus::Done,
        TaskStatus::Confirmed,
        TaskStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::New => "new",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Confirmed => "confirmed",
            TaskStatus::Rejected => "rejected",
        }
    }

    /// Work has been delivered; such a task is never overdue.
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Confirmed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| format!("unknown task status: {}", s))
    }
}

/// Action keyword accepted on `/tasks/{id}/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    Start,
    Done,
    Accept,
    Reject,
}

impl TaskAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskAction::Start => "start",
            TaskAction::Done => "done",
            TaskAction::Accept => "accept",
            TaskAction::Reject => "reject",
        }
    }

    /// Only the stored assignee may drive these actions.
    pub fn requires_assignee(&self) -> bool {
        matches!(self, TaskAction::Start | TaskAction::Done)
    }
}

impl FromStr for TaskAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(TaskAction::Start),
            "done" => Ok(TaskAction::Done),
            "accept" => Ok(TaskAction::Accept),
            "reject" => Ok(TaskAction::Reject),
            other => Err(format!("unknown task action: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub from: TaskStatus,
    pub action: TaskAction,
    pub roles: &'static [Role],
    pub to: TaskStatus,
}

const WORKERS: &[Role] = &[Role::Employee, Role::Manager, Role::Admin];
const SUPERVISORS: &[Role] = &[Role::Manager, Role::Admin];

pub const TRANSITIONS: &[Transition] = &[
    Transition {
        from: TaskStatus::New,
        action: TaskAction::Start,
        roles: WORKERS,
        to: TaskStatus::InProgress,
    },
    Transition {
        from: TaskStatus::InProgress,
        action: TaskAction::Done,
        roles: WORKERS,
        to: TaskStatus::Done,
    },
    Transition {
        from: TaskStatus::Done,
        action: TaskAction::Accept,
        roles: SUPERVISORS,
        to: TaskStatus::Confirmed,
    },
    Transition {
        from: TaskStatus::Done,
        action: TaskAction::Reject,
        roles: SUPERVISORS,
        to: TaskStatus::Rejected,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    RoleNotAllowed,
    NotAssignee,
    OutOfOrder { from: TaskStatus, action: TaskAction },
}

/// Resolves the status a task moves to, or why it may not move.
pub fn next_status(
    current: TaskStatus,
    action: TaskAction,
    role: Role,
    is_assignee: bool,
) -> Result<TaskStatus, TransitionError> {
    let permitted = TRANSITIONS
        .iter()
        .any(|t| t.action == action && t.roles.contains(&role));
    if !permitted {
        return Err(TransitionError::RoleNotAllowed);
    }
    if action.requires_assignee() && !is_assignee {
        return Err(TransitionError::NotAssignee);
    }
    TRANSITIONS
        .iter()
        .find(|t| t.from == current && t.action == action && t.roles.contains(&role))
        .map(|t| t.to)
        .ok_or(TransitionError::OutOfOrder {
            from: current,
            action,
        })
}

/// Overdue iff a deadline exists, has strictly passed, and the work is not completed.
pub fn compute_overdue(
    deadline: Option<DateTime<Utc>>,
    status: TaskStatus,
    now: DateTime<Utc>,
) -> bool {
    match deadline {
        Some(d) => d < now && !status.is_completed(),
        None => false,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub is_overdue: bool,
    pub assigned_to_id: Option<Uuid>,
    pub created_by_id: Option<Uuid>,
}

impl Task {
    pub fn status(&self) -> crate::error::Result<TaskStatus> {
        self.status
            .parse()
            .map_err(crate::error::Error::Internal)
    }
}
