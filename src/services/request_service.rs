use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::consumer_request::{ConsumerRequest, RequestStatus};

/// Consumer-facing queries and staff status updates for consumer requests.
/// Listing and creation go through the shared resource handlers.
#[derive(Clone)]
pub struct RequestService {
    pool: PgPool,
}

impl RequestService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_consumer(&self, consumer_id: Uuid) -> Result<Vec<ConsumerRequest>> {
        let requests = sqlx::query_as::<_, ConsumerRequest>(
            r#"
            SELECT * FROM consumer_requests
            WHERE consumer_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(consumer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    pub async fn set_status(&self, id: Uuid, status: RequestStatus) -> Result<ConsumerRequest> {
        let request = sqlx::query_as::<_, ConsumerRequest>(
            r#"
            UPDATE consumer_requests SET status = $1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Request {} not found", id)))?;

        tracing::info!(request_id = %id, status = status.as_str(), "request status changed");
        Ok(request)
    }
}
