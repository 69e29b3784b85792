use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Outsourcing {
    pub id: Uuid,
    pub company_name: String,
    pub direction: Option<String>,
    pub contract_amount: Decimal,
    pub company_head: Option<String>,
    pub employees_count: i32,
    pub employee_list: Option<String>,
    pub access_approved: bool,
    pub access_approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
