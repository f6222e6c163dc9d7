//! Lenient decoding of backend timestamps.
//!
//! The backend emits `LocalDateTime`, `LocalDate` and `LocalTime` values either
//! as ISO strings or as integer arrays (`[2025,4,30,9,44,22]`, `[2025,4,30]`,
//! `[6,0]`), and `java.util.Date` values as epoch milliseconds. These helpers
//! accept every form; encoding always goes through chrono's ISO output.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};

use crate::error::ApiError;

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Text(String),
    Parts(Vec<i64>),
    Millis(i64),
}

fn part(parts: &[i64], idx: usize) -> Option<u32> {
    parts.get(idx).and_then(|v| u32::try_from(*v).ok())
}

fn date_from_parts(parts: &[i64]) -> Option<NaiveDate> {
    let year = i32::try_from(*parts.first()?).ok()?;
    NaiveDate::from_ymd_opt(year, part(parts, 1)?, part(parts, 2)?)
}

fn time_from_parts(parts: &[i64]) -> Option<NaiveTime> {
    let nanos = part(parts, 3).unwrap_or(0);
    NaiveTime::from_hms_nano_opt(
        part(parts, 0)?,
        part(parts, 1).unwrap_or(0),
        part(parts, 2).unwrap_or(0),
        nanos,
    )
}

pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
        .or_else(|| parse_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    ["%H:%M:%S%.f", "%H:%M", "%I:%M %p", "%I:%M:%S %p"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

fn invalid<E: serde::de::Error>(what: &str) -> E {
    E::custom(format!("unrecognized {what} format"))
}

pub fn opt_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Raw>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let value = match raw {
        Raw::Text(s) if s.trim().is_empty() => return Ok(None),
        Raw::Text(s) => parse_datetime(&s),
        Raw::Parts(parts) => {
            date_from_parts(&parts).and_then(|d| {
                let time = if parts.len() > 3 {
                    time_from_parts(&parts[3..])?
                } else {
                    NaiveTime::MIN
                };
                Some(d.and_time(time))
            })
        }
        Raw::Millis(ms) => DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc()),
    };
    value.map(Some).ok_or_else(|| invalid("datetime"))
}

pub fn opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Raw>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let value = match raw {
        Raw::Text(s) if s.trim().is_empty() => return Ok(None),
        Raw::Text(s) => parse_date(&s),
        Raw::Parts(parts) => date_from_parts(&parts),
        Raw::Millis(ms) => DateTime::from_timestamp_millis(ms).map(|dt| dt.date_naive()),
    };
    value.map(Some).ok_or_else(|| invalid("date"))
}

pub fn opt_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Raw>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let value = match raw {
        Raw::Text(s) if s.trim().is_empty() => return Ok(None),
        Raw::Text(s) => parse_time(&s),
        Raw::Parts(parts) => time_from_parts(&parts),
        Raw::Millis(_) => None,
    };
    value.map(Some).ok_or_else(|| invalid("time"))
}

pub fn time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    opt_time(deserializer)?.ok_or_else(|| invalid("time"))
}

/// Deserialize a caller-picked time under the `normalize_booking_time` rules.
pub fn booking_time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    match Raw::deserialize(deserializer)? {
        Raw::Text(s) => normalize_booking_time(&s).map_err(serde::de::Error::custom),
        Raw::Parts(parts) => time_from_parts(&parts).ok_or_else(|| invalid("time")),
        Raw::Millis(_) => Err(invalid("time")),
    }
}

/// Normalize the booking time a customer picked into a `NaiveTime`.
///
/// Accepts `HH:MM`, `HH:MM:SS`, a bare hour (`"6"`) and the array form
/// `"[6,0]"` the time picker produces.
pub fn normalize_booking_time(raw: &str) -> Result<NaiveTime, ApiError> {
    let trimmed = raw.trim();
    let rejected = || ApiError::Validation(format!("unrecognized booking time: {raw}"));

    if let Some(inner) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        let parts = inner
            .split(',')
            .map(|p| p.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| rejected())?;
        return time_from_parts(&parts).ok_or_else(rejected);
    }
    if trimmed.contains(':') {
        return parse_time(trimmed).ok_or_else(rejected);
    }
    let hour = trimmed.parse::<u32>().map_err(|_| rejected())?;
    NaiveTime::from_hms_opt(hour, 0, 0).ok_or_else(rejected)
}
