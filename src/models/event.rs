use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Hosted event or guest visit, with its expense breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub event_date: NaiveDate,
    pub host_manager: Option<String>,
    pub visits_count: i32,
    pub total_expenses: Decimal,
    pub food_expenses: Decimal,
    pub gifts_expenses: Decimal,
    pub transport_expenses: Decimal,
    pub notes: Option<String>,
    pub gifts_given: bool,
    pub created_at: DateTime<Utc>,
}
