use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub car_number: String,
    pub model: Option<String>,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub distance_km: f64,
    pub fuel_limit: f64,
    pub extra_fuel_limit: f64,
    pub last_tech_inspection: Option<NaiveDate>,
    pub next_tech_inspection: Option<NaiveDate>,
    pub insurance_expiry: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
