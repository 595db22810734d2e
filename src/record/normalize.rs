//! Conversion of backend JSON into typed records.
//!
//! The backend is lenient about what it stores, so every field is optional
//! here. Bad amounts become zero and bad dates become `None`; neither is an
//! error because the charts should still render with partial data.

use serde::Deserialize;
use serde_json::Value;
use time::{Date, OffsetDateTime, format_description::well_known::Rfc3339};
use time_tz::Tz;

use super::{DATE_FORMAT, Earning, Expense, RecordId};
use crate::timezone::local_date;

/// An earning as sent by `GET /api/earning`.
#[derive(Debug, Default, Deserialize)]
pub struct RawEarning {
    #[serde(rename = "_id", default)]
    id: Value,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    amount: Value,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

impl RawEarning {
    /// Convert into an [Earning], interpreting date-times in `timezone`.
    pub fn normalize(self, timezone: &Tz) -> Earning {
        let id = coerce_id(&self.id);
        let date = normalize_date(self.date.as_deref(), timezone, &id);

        Earning {
            amount: coerce_amount(&self.amount),
            date,
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            source: self.source.unwrap_or_default(),
            id,
        }
    }
}

/// An expense as sent by `GET /api/expense`.
#[derive(Debug, Default, Deserialize)]
pub struct RawExpense {
    #[serde(rename = "_id", default)]
    id: Value,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    amount: Value,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(rename = "paymentMethod", default)]
    payment_method: Option<String>,
}

impl RawExpense {
    /// Convert into an [Expense], interpreting date-times in `timezone`.
    pub fn normalize(self, timezone: &Tz) -> Expense {
        let id = coerce_id(&self.id);
        let date = normalize_date(self.date.as_deref(), timezone, &id);

        Expense {
            amount: coerce_amount(&self.amount),
            date,
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            payment_method: self.payment_method.unwrap_or_default(),
            id,
        }
    }
}

fn coerce_id(value: &Value) -> RecordId {
    match value {
        Value::String(id) => RecordId::new(id.as_str()),
        Value::Number(id) => RecordId::new(id.to_string()),
        _ => RecordId::new(""),
    }
}

fn normalize_date(date: Option<&str>, timezone: &Tz, id: &RecordId) -> Option<Date> {
    let text = date?;
    let parsed = parse_record_date(text, timezone);

    if parsed.is_none() {
        tracing::debug!("record {id} has an unparseable date {text:?}, skipping it in charts");
    }

    parsed
}

/// Convert a JSON amount to a finite number.
///
/// Numbers and numeric strings are used as is. Booleans count as 1 or 0.
/// Everything else, including non-finite values, counts as 0.
pub fn coerce_amount(value: &Value) -> f64 {
    let amount = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                0.0
            } else {
                text.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };

    if amount.is_finite() { amount } else { 0.0 }
}

/// Parse the date of a record.
///
/// Accepts plain dates (`2024-03-02`), RFC 3339 date-times which are
/// converted to `timezone` with the offset in effect at that instant before
/// taking the date, and date-times without an offset, which are taken as
/// local already.
pub fn parse_record_date(text: &str, timezone: &Tz) -> Option<Date> {
    let text = text.trim();

    if let Ok(date) = Date::parse(text, DATE_FORMAT) {
        return Some(date);
    }

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(local_date(date_time, timezone));
    }

    match text.as_bytes().get(10) {
        Some(b'T' | b' ') => text
            .get(..10)
            .and_then(|date| Date::parse(date, DATE_FORMAT).ok()),
        _ => None,
    }
}
