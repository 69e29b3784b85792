use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::task_dto::CreateTaskForm;
use crate::error::{Error, Result};
use crate::middleware::auth::AuthContext;
use crate::models::task::{compute_overdue, next_status, Task, TaskAction, TaskStatus, TransitionError};
use crate::services::notification_service::NotificationService;
use crate::services::user_service::UserService;
use crate::utils::{form::date_to_utc, time};

#[derive(Clone)]
pub struct TaskService {
    pool: PgPool,
    users: UserService,
    notifications: NotificationService,
}

impl TaskService {
    pub fn new(pool: PgPool, users: UserService, notifications: NotificationService) -> Self {
        Self {
            pool,
            users,
            notifications,
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Task {} not found", id)))?;
        Ok(task)
    }

    pub async fn list(&self) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>("SELECT * FROM tasks ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    pub async fn list_for_assignee(&self, user_id: Uuid) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks
            WHERE assigned_to_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    pub async fn create(&self, form: CreateTaskForm, auth: &AuthContext) -> Result<Task> {
        let title = form.title.trim();
        if title.is_empty() {
            return Err(Error::BadRequest("Task title is required".to_string()));
        }
        let assignee = match form.assigned_to_id {
            Some(id) => Some(self.users.get_by_id(id).await.map_err(|e| match e {
                Error::NotFound(_) => Error::BadRequest(format!("Unknown assignee {}", id)),
                other => other,
            })?),
            None => None,
        };

        let deadline = form.deadline.map(date_to_utc);
        let is_overdue = compute_overdue(deadline, TaskStatus::New, time::now());

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, deadline, is_overdue, assigned_to_id, created_by_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(&form.description)
        .bind(TaskStatus::New.as_str())
        .bind(deadline)
        .bind(is_overdue)
        .bind(form.assigned_to_id)
        .bind(auth.user_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            task_id = %task.id,
            assigned_to = ?task.assigned_to_id,
            is_overdue,
            "task created"
        );

        if let Some(assignee) = assignee {
            self.notifications.dispatch(
                assignee.telegram_chat_id.as_deref(),
                assigned_message(&task),
            );
        }
        Ok(task)
    }

    /// Applies `action` through the transition table and recomputes the
    /// overdue flag against the new status.
    pub async fn transition(&self, id: Uuid, action: TaskAction, auth: &AuthContext) -> Result<Task> {
        let task = self.get(id).await?;
        let current = task.status()?;
        let is_assignee = task.assigned_to_id == Some(auth.user_id);

        let next = next_status(current, action, auth.role, is_assignee).map_err(|e| match e {
            TransitionError::RoleNotAllowed | TransitionError::NotAssignee => {
                tracing::warn!(
                    task_id = %id,
                    user_id = %auth.user_id,
                    action = action.as_str(),
                    reason = ?e,
                    "task transition refused"
                );
                Error::Forbidden
            }
            TransitionError::OutOfOrder { from, action } => Error::InvalidTransition {
                action: action.as_str().to_string(),
                status: from.as_str().to_string(),
            },
        })?;

        let is_overdue = compute_overdue(task.deadline, next, time::now());
        let updated = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET status = $1, is_overdue = $2, updated_at = NOW()
            WHERE id = $3 AND status = $4
            RETURNING *
            "#,
        )
        .bind(next.as_str())
        .bind(is_overdue)
        .bind(id)
        .bind(current.as_str())
        .fetch_optional(&self.pool)
        .await?;

        // Another writer moved the task after it was read.
        let Some(updated) = updated else {
            let latest = self.get(id).await?;
            tracing::warn!(
                task_id = %id,
                expected = current.as_str(),
                found = %latest.status,
                "concurrent task transition lost"
            );
            return Err(Error::InvalidTransition {
                action: action.as_str().to_string(),
                status: latest.status,
            });
        };

        tracing::info!(
            task_id = %id,
            from = current.as_str(),
            to = next.as_str(),
            is_overdue,
            "task status changed"
        );

        self.notify_milestone(&updated, action).await;
        Ok(updated)
    }

    async fn notify_milestone(&self, task: &Task, action: TaskAction) {
        let recipient = match action {
            TaskAction::Start => return,
            TaskAction::Done => task.created_by_id,
            TaskAction::Accept | TaskAction::Reject => task.assigned_to_id,
        };
        let Some(recipient) = recipient else { return };

        let chat_id = match self.users.get_by_id(recipient).await {
            Ok(user) => user.telegram_chat_id,
            Err(err) => {
                tracing::warn!(user_id = %recipient, error = %err, "notification recipient lookup failed");
                return;
            }
        };
        self.notifications
            .dispatch(chat_id.as_deref(), milestone_message(task, action));
    }
}

fn assigned_message(task: &Task) -> String {
    match task.deadline {
        Some(deadline) => format!(
            "New task assigned: {} (deadline {})",
            task.title,
            deadline.format(crate::utils::form::DATE_FORMAT)
        ),
        None => format!("New task assigned: {}", task.title),
    }
}

fn milestone_message(task: &Task, action: TaskAction) -> String {
    match action {
        TaskAction::Done => format!("Task completed and awaiting review: {}", task.title),
        TaskAction::Accept => format!("Your task was confirmed: {}", task.title),
        TaskAction::Reject => format!("Your task was rejected: {}", task.title),
        TaskAction::Start => format!("Task started: {}", task.title),
    }
}
