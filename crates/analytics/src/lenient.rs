//! Forgiving field decoders for dirty input records.
//!
//! Each decoder accepts any JSON value and yields `None` (or an empty
//! collection) when the value has the wrong shape, so one malformed field never
//! rejects the whole record.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::model::LineItem;

/// Numbers only; strings, booleans and null become `None`.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

/// Non-empty strings only.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

/// Identifiers: non-empty strings, or numbers rendered as strings.
pub(crate) fn id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(T::from(s)),
        Some(Value::Number(n)) => Some(T::from(n.to_string())),
        _ => None,
    })
}

/// Calendar dates as `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp.
pub(crate) fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => parse_date(&s),
        _ => None,
    })
}

/// Line items: non-objects inside the array are dropped, a non-array is empty.
pub(crate) fn items<'de, D>(deserializer: D) -> Result<Vec<LineItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(raw)) = value else {
        return Ok(Vec::new());
    };

    Ok(raw
        .iter()
        .filter(|v| v.is_object())
        .filter_map(|v| LineItem::deserialize(v).ok())
        .collect())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    let head = raw.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
