use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SolarPanel {
    pub id: Uuid,
    pub building_address: String,
    pub capacity_kw: f64,
    pub installed_year: i32,
    pub efficiency_percent: f64,
    pub total_produced_kwh: f64,
    pub created_at: DateTime<Utc>,
}
