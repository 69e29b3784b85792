use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    New,
    Accepted,
    Done,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::New => "new",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Done => "done",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "new" => Ok(RequestStatus::New),
            "accepted" => Ok(RequestStatus::Accepted),
            "done" => Ok(RequestStatus::Done),
            "rejected" => Ok(RequestStatus::Rejected),
            other => Err(format!("unknown request status: {}", other)),
        }
    }
}

/// Service request raised by a consumer (an internal department or an
/// outside party), e.g. asking for transport or an event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConsumerRequest {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub consumer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
