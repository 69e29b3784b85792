//! Lenient field decoders for HTML form submissions.
//!
//! Browsers submit every input as a string and send `""` for untouched
//! fields. These helpers coerce such values into typed ones: numbers default
//! to zero, dates and ids that do not parse are dropped.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

struct RawValue;

impl<'de> Visitor<'de> for RawValue {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a form value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(RawValue)
    }
}

fn raw<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = d.deserialize_any(RawValue)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

fn parsed_or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    Ok(raw(d)?.and_then(|v| v.parse().ok()).unwrap_or_default())
}

pub fn number_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let v: f64 = parsed_or_default(d)?;
    Ok(if v.is_finite() { v } else { 0.0 })
}

pub fn number_i32<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    parsed_or_default(d)
}

/// Money, kept to cents. Accepts `1500.75` as well as `1.5e12`.
pub fn amount<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    let value = raw(d)?
        .and_then(|v| {
            Decimal::from_str(&v)
                .or_else(|_| Decimal::from_scientific(&v))
                .ok()
        })
        .unwrap_or_default();
    Ok(value.round_dp(2))
}

/// Any non-empty value means the box was ticked.
pub fn checkbox<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(raw(d)?.is_some())
}

pub fn optional_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    Ok(raw(d)?.as_deref().and_then(parse_date))
}

pub fn optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    raw(d)
}

pub fn optional_uuid<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Uuid>, D::Error> {
    Ok(raw(d)?.and_then(|v| Uuid::parse_str(&v).ok()))
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::debug!(value, "ignoring malformed date");
            None
        }
    }
}

/// Midnight UTC of a `YYYY-MM-DD` date.
pub fn date_to_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
