use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{query_builder::Separated, Postgres};

use crate::middleware::auth::AuthContext;
use crate::models::{
    consumer_request::{ConsumerRequest, RequestStatus},
    contract::{Contract, DEFAULT_CONTRACT_STATUS},
    event::Event,
    outsourcing::Outsourcing,
    solar_panel::SolarPanel,
    user::Role,
    vehicle::Vehicle,
};
use crate::services::resource_service::ResourceForm;
use crate::utils::form;

type Row<'qb> = Separated<'qb, 'static, Postgres, &'static str>;

#[derive(Debug, Deserialize)]
pub struct VehicleForm {
    #[serde(default)]
    pub car_number: String,
    #[serde(default, deserialize_with = "form::optional_text")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "form::optional_text")]
    pub driver_name: Option<String>,
    #[serde(default, deserialize_with = "form::optional_text")]
    pub driver_phone: Option<String>,
    #[serde(default, deserialize_with = "form::number_f64")]
    pub distance_km: f64,
    #[serde(default, deserialize_with = "form::number_f64")]
    pub fuel_limit: f64,
    #[serde(default, deserialize_with = "form::number_f64")]
    pub extra_fuel_limit: f64,
    #[serde(default, deserialize_with = "form::optional_date")]
    pub last_tech_inspection: Option<NaiveDate>,
    #[serde(default, deserialize_with = "form::optional_date")]
    pub next_tech_inspection: Option<NaiveDate>,
    #[serde(default, deserialize_with = "form::optional_date")]
    pub insurance_expiry: Option<NaiveDate>,
}

impl ResourceForm for VehicleForm {
    type Record = Vehicle;

    const TABLE: &'static str = "vehicles";
    const COLUMNS: &'static [&'static str] = &[
        "car_number",
        "model",
        "driver_name",
        "driver_phone",
        "distance_km",
        "fuel_limit",
        "extra_fuel_limit",
        "last_tech_inspection",
        "next_tech_inspection",
        "insurance_expiry",
    ];
    const LIST_PATH: &'static str = "/vehicles";

    fn push_values(self, _auth: &AuthContext, row: &mut Row<'_>) {
        row.push_bind(self.car_number)
            .push_bind(self.model)
            .push_bind(self.driver_name)
            .push_bind(self.driver_phone)
            .push_bind(self.distance_km)
            .push_bind(self.fuel_limit)
            .push_bind(self.extra_fuel_limit)
            .push_bind(self.last_tech_inspection)
            .push_bind(self.next_tech_inspection)
            .push_bind(self.insurance_expiry);
    }
}

#[derive(Debug, Deserialize)]
pub struct ContractForm {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "type", deserialize_with = "form::optional_text")]
    pub contract_type: Option<String>,
    #[serde(default, deserialize_with = "form::amount")]
    pub total_amount: Decimal,
    #[serde(default, deserialize_with = "form::optional_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "form::optional_text")]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "form::optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "form::optional_date")]
    pub end_date: Option<NaiveDate>,
}

impl ResourceForm for ContractForm {
    type Record = Contract;

    const TABLE: &'static str = "contracts";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "contract_type",
        "total_amount",
        "status",
        "comment",
        "start_date",
        "end_date",
    ];
    const LIST_PATH: &'static str = "/contracts";

    fn push_values(self, _auth: &AuthContext, row: &mut Row<'_>) {
        let status = self
            .status
            .unwrap_or_else(|| DEFAULT_CONTRACT_STATUS.to_string());
        row.push_bind(self.title)
            .push_bind(self.contract_type)
            .push_bind(self.total_amount)
            .push_bind(status)
            .push_bind(self.comment)
            .push_bind(self.start_date)
            .push_bind(self.end_date);
    }
}

#[derive(Debug, Deserialize)]
pub struct EventForm {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "date", deserialize_with = "form::optional_date")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "form::optional_text")]
    pub host_manager: Option<String>,
    #[serde(default, deserialize_with = "form::number_i32")]
    pub visits_count: i32,
    #[serde(default, deserialize_with = "form::amount")]
    pub total_expenses: Decimal,
    #[serde(default, deserialize_with = "form::amount")]
    pub food_expenses: Decimal,
    #[serde(default, deserialize_with = "form::amount")]
    pub gifts_expenses: Decimal,
    #[serde(default, deserialize_with = "form::amount")]
    pub transport_expenses: Decimal,
    #[serde(default, deserialize_with = "form::optional_text")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "form::checkbox")]
    pub gifts_given: bool,
}

impl ResourceForm for EventForm {
    type Record = Event;

    const TABLE: &'static str = "events";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "event_date",
        "host_manager",
        "visits_count",
        "total_expenses",
        "food_expenses",
        "gifts_expenses",
        "transport_expenses",
        "notes",
        "gifts_given",
    ];
    const LIST_PATH: &'static str = "/events";

    fn push_values(self, _auth: &AuthContext, row: &mut Row<'_>) {
        let event_date = self
            .event_date
            .unwrap_or_else(|| crate::utils::time::now().date_naive());
        row.push_bind(self.name)
            .push_bind(event_date)
            .push_bind(self.host_manager)
            .push_bind(self.visits_count)
            .push_bind(self.total_expenses)
            .push_bind(self.food_expenses)
            .push_bind(self.gifts_expenses)
            .push_bind(self.transport_expenses)
            .push_bind(self.notes)
            .push_bind(self.gifts_given);
    }
}

#[derive(Debug, Deserialize)]
pub struct OutsourcingForm {
    #[serde(default)]
    pub company_name: String,
    #[serde(default, deserialize_with = "form::optional_text")]
    pub direction: Option<String>,
    #[serde(default, deserialize_with = "form::amount")]
    pub contract_amount: Decimal,
    #[serde(default, deserialize_with = "form::optional_text")]
    pub company_head: Option<String>,
    #[serde(default, deserialize_with = "form::number_i32")]
    pub employees_count: i32,
    #[serde(default, deserialize_with = "form::optional_text")]
    pub employee_list: Option<String>,
    #[serde(default, deserialize_with = "form::checkbox")]
    pub access_approved: bool,
}

impl ResourceForm for OutsourcingForm {
    type Record = Outsourcing;

    const TABLE: &'static str = "outsourcings";
    const COLUMNS: &'static [&'static str] = &[
        "company_name",
        "direction",
        "contract_amount",
        "company_head",
        "employees_count",
        "employee_list",
        "access_approved",
        "access_approved_at",
    ];
    const LIST_PATH: &'static str = "/outsourcings";

    fn push_values(self, _auth: &AuthContext, row: &mut Row<'_>) {
        let approved_at = self.access_approved.then(crate::utils::time::now);
        row.push_bind(self.company_name)
            .push_bind(self.direction)
            .push_bind(self.contract_amount)
            .push_bind(self.company_head)
            .push_bind(self.employees_count)
            .push_bind(self.employee_list)
            .push_bind(self.access_approved)
            .push_bind(approved_at);
    }
}

#[derive(Debug, Deserialize)]
pub struct SolarPanelForm {
    #[serde(default)]
    pub building_address: String,
    #[serde(default, deserialize_with = "form::number_f64")]
    pub capacity_kw: f64,
    #[serde(default, deserialize_with = "form::number_i32")]
    pub installed_year: i32,
    #[serde(default, deserialize_with = "form::number_f64")]
    pub efficiency_percent: f64,
    #[serde(default, deserialize_with = "form::number_f64")]
    pub total_produced_kwh: f64,
}

impl ResourceForm for SolarPanelForm {
    type Record = SolarPanel;

    const TABLE: &'static str = "solar_panels";
    const COLUMNS: &'static [&'static str] = &[
        "building_address",
        "capacity_kw",
        "installed_year",
        "efficiency_percent",
        "total_produced_kwh",
    ];
    const LIST_PATH: &'static str = "/solarpanels";

    fn push_values(self, _auth: &AuthContext, row: &mut Row<'_>) {
        row.push_bind(self.building_address)
            .push_bind(self.capacity_kw)
            .push_bind(self.installed_year)
            .push_bind(self.efficiency_percent)
            .push_bind(self.total_produced_kwh);
    }
}

#[derive(Debug, Deserialize)]
pub struct ConsumerRequestForm {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "form::optional_text")]
    pub description: Option<String>,
}

impl ResourceForm for ConsumerRequestForm {
    type Record = ConsumerRequest;

    const TABLE: &'static str = "consumer_requests";
    const COLUMNS: &'static [&'static str] = &["title", "description", "status", "consumer_id"];
    const LIST_PATH: &'static str = "/requests";
    const REDIRECT_PATH: &'static str = "/consumer";
    const CREATE_ROLES: &'static [Role] = &[Role::Consumer];

    fn push_values(self, auth: &AuthContext, row: &mut Row<'_>) {
        row.push_bind(self.title)
            .push_bind(self.description)
            .push_bind(RequestStatus::New.as_str())
            .push_bind(auth.user_id);
    }
}

#[derive(Debug, Deserialize)]
pub struct RequestStatusForm {
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vehicle_without_numbers_gets_zeroes() {
        let f: VehicleForm = serde_json::from_value(json!({
            "car_number": "01 A 123 BC",
            "distance_km": "",
        }))
        .unwrap();
        assert_eq!(f.car_number, "01 A 123 BC");
        assert_eq!(f.distance_km, 0.0);
        assert_eq!(f.fuel_limit, 0.0);
        assert_eq!(f.extra_fuel_limit, 0.0);
        assert!(f.model.is_none());
    }

    #[test]
    fn contract_accepts_legacy_type_field() {
        let f: ContractForm = serde_json::from_value(json!({
            "title": "Paper supply",
            "type": "tender",
            "total_amount": "1200.50",
        }))
        .unwrap();
        assert_eq!(f.contract_type.as_deref(), Some("tender"));
        assert_eq!(f.total_amount, Decimal::new(120050, 2));
        assert!(f.status.is_none());
    }

    #[test]
    fn event_checkbox_and_counts() {
        let f: EventForm = serde_json::from_value(json!({
            "name": "Delegation visit",
            "visits_count": "12",
            "gifts_given": "on",
        }))
        .unwrap();
        assert_eq!(f.visits_count, 12);
        assert!(f.gifts_given);
        assert_eq!(f.food_expenses, Decimal::ZERO);
    }

    #[test]
    fn empty_display_fields_are_accepted() {
        let f: SolarPanelForm = serde_json::from_value(json!({ "building_address": "" })).unwrap();
        assert_eq!(f.building_address, "");
        assert_eq!(f.installed_year, 0);
    }
}
