use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_CONTRACT_STATUS: &str = "in_progress";

/// Procurement contract. `contract_type` is free text such as `e_shop`,
/// `e_auction`, `tender`, `best_offer` or `direct`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub id: Uuid,
    pub title: String,
    pub contract_type: Option<String>,
    pub total_amount: Decimal,
    pub status: String,
    pub comment: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
