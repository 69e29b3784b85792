use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::dashboard_dto::{ResourceCounts, TaskCounts};
use crate::error::Result;

#[derive(Clone)]
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn user_count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    pub async fn resource_counts(&self) -> Result<ResourceCounts> {
        let row: (i64, i64, i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM vehicles),
                (SELECT COUNT(*) FROM contracts),
                (SELECT COUNT(*) FROM events),
                (SELECT COUNT(*) FROM outsourcings),
                (SELECT COUNT(*) FROM solar_panels),
                (SELECT COUNT(*) FROM consumer_requests)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(ResourceCounts {
            vehicles: row.0,
            contracts: row.1,
            events: row.2,
            outsourcings: row.3,
            solar_panels: row.4,
            requests: row.5,
        })
    }

    /// Task counters, optionally restricted to one assignee.
    /// `completed` covers both `done` and `confirmed`.
    pub async fn task_counts(&self, assignee: Option<Uuid>) -> Result<TaskCounts> {
        let row: (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status IN ('done', 'confirmed')),
                COUNT(*) FILTER (WHERE is_overdue)
            FROM tasks
            WHERE $1::uuid IS NULL OR assigned_to_id = $1
            "#,
        )
        .bind(assignee)
        .fetch_one(&self.pool)
        .await?;
        Ok(TaskCounts {
            total: row.0,
            completed: row.1,
            overdue: row.2,
        })
    }
}
