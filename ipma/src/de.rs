//! Serde helpers for the loosely-typed upstream JSON.
//!
//! Numbers arrive as JSON numbers or as numeric strings depending on the
//! dataset, and `-99` stands for "not measured". Both quirks are resolved
//! here, once per field, so parsed records only ever hold `Option`s.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{Deserializer, Error};
use serde::Deserialize;

/// Upstream placeholder for a missing value.
pub const SENTINEL: f64 = -99.0;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    fn into_f64<E: Error>(self) -> Result<Option<f64>, E> {
        match self {
            RawNumber::Int(n) => Ok(Some(n as f64)),
            RawNumber::Float(n) => Ok(Some(n)),
            RawNumber::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                s.parse::<f64>()
                    .map(Some)
                    .map_err(|_| E::custom(format!("expected a number, found {s:?}")))
            }
        }
    }
}

fn is_sentinel(value: f64) -> bool {
    (value - SENTINEL).abs() < f64::EPSILON
}

/// A measurement that may be absent, empty, or the `-99` sentinel.
pub fn measurement<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) => Ok(raw.into_f64::<D::Error>()?.filter(|v| !is_sentinel(*v))),
    }
}

/// A required number, given either as a JSON number or a numeric string.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    RawNumber::deserialize(deserializer)?
        .into_f64::<D::Error>()?
        .ok_or_else(|| D::Error::custom("expected a number, found an empty string"))
}

/// A required integer, given either as a JSON number or a numeric string.
pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = number(deserializer)?;
    if value.fract() != 0.0 {
        return Err(D::Error::custom(format!("expected an integer, found {value}")));
    }
    Ok(value as i64)
}

/// A classification id where `-99` (or absence) means "no class".
pub fn class_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = measurement(deserializer)?;
    Ok(value.filter(|v| v.fract() == 0.0).map(|v| v as i64))
}

/// A non-negative numeric identifier such as `globalIdLocal`.
pub fn id<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = integer(deserializer)?;
    u32::try_from(value).map_err(|_| D::Error::custom(format!("invalid identifier {value}")))
}

/// Timestamp layouts used across datasets; all are naive UTC.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse an upstream timestamp such as `2024-05-01T12:00:00` or
/// `2024-05-01T12:00`, interpreting it as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|t| t.with_timezone(&Utc)))
}

/// A required timestamp field.
pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp {raw:?}")))
}

/// A `YYYY-MM-DD` date, also accepting a full timestamp.
pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(&raw).map(|t| t.date_naive()))
        .ok_or_else(|| D::Error::custom(format!("invalid date {raw:?}")))
}
