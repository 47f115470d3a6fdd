//! Lenient deserializers for stored documents.
//!
//! Stored records drift: timestamps arrive with or without an offset, and
//! multi-valued fields are sometimes a scalar, sometimes a list, and
//! sometimes a list of lists. Everything is normalized here so the rest of
//! the system only ever sees `DateTime<Utc>` and a flat `Vec`.

use chrono::{DateTime, Datelike as _, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};

/// Naive datetime layouts accepted in addition to RFC 3339.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Four-digit years only. Keys derived from timestamps compare as strings,
/// which only orders chronologically within this range.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// Parses an ISO-8601 timestamp or date.
///
/// Accepts RFC 3339 (any offset, normalized to UTC), a naive datetime
/// (interpreted as UTC), or a bare `YYYY-MM-DD` (midnight UTC). Signed or
/// five-digit years are rejected, as is anything landing outside years
/// 0000-9999 once normalized to UTC.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    parse_any(s.trim()).filter(|dt| YEAR_RANGE.contains(&dt.year()))
}

fn parse_any(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Deserializes a required timestamp via [`parse_timestamp`].
///
/// # Errors
///
/// Fails if the value is not a string or cannot be parsed.
pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

/// Deserializes an optional timestamp via [`parse_timestamp`].
///
/// # Errors
///
/// Fails if a non-null value cannot be parsed.
pub fn option_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Element<T> {
    Scalar(T),
    List(Vec<T>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Stored<T> {
    Missing,
    Scalar(T),
    List(Vec<Element<T>>),
}

/// Deserializes a multi-valued field into a flat `Vec`.
///
/// A scalar becomes a one-element list, `null` becomes an empty list, and
/// nested lists are flattened one level.
///
/// # Errors
///
/// Fails if any leaf value cannot be deserialized as `T`.
pub fn flat_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Stored::<T>::deserialize(deserializer)? {
        Stored::Missing => Vec::new(),
        Stored::Scalar(value) => vec![value],
        Stored::List(elements) => elements
            .into_iter()
            .flat_map(|element| match element {
                Element::Scalar(value) => vec![value],
                Element::List(values) => values,
            })
            .collect(),
    })
}
