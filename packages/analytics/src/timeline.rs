//! Time-bucketed case counts.
//!
//! Each case's occurrence date (in UTC) is formatted into a bucket key whose
//! shape depends on the interval:
//!
//! | Interval | Key        | Example    |
//! |----------|------------|------------|
//! | day      | `%Y-%m-%d` | 2024-01-15 |
//! | week     | `%G-W%V`   | 2025-W01   |
//! | month    | `%Y-%m`    | 2024-01    |
//! | year     | `%Y`       | 2024       |
//!
//! Weeks use the ISO week-numbering year, so 2024-12-30 lands in 2025-W01.
//! All four shapes sort lexicographically in chronological order. Keys are
//! turned back into the first calendar day of their bucket for output.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc, Weekday};
use rights_monitor_analytics_models::{TimeInterval, TimelineData, TimelineParams};
use rights_monitor_store::RecordStore;
use rights_monitor_store_models::CaseRecord;

use crate::{
    AnalyticsError,
    filters::{RecordFilter, parse_date},
};

/// How far back the timeline reaches when no start date is given.
const DEFAULT_LOOKBACK_DAYS: i64 = 365;

const fn key_format(interval: TimeInterval) -> &'static str {
    match interval {
        TimeInterval::Day => "%Y-%m-%d",
        TimeInterval::Week => "%G-W%V",
        TimeInterval::Month => "%Y-%m",
        TimeInterval::Year => "%Y",
    }
}

/// Formats the bucket key for a timestamp.
#[must_use]
pub fn bucket_key(at: DateTime<Utc>, interval: TimeInterval) -> String {
    at.format(key_format(interval)).to_string()
}

/// Turns a bucket key back into the first day of its bucket.
///
/// Week keys map to the Monday of that ISO week, month keys to the 1st,
/// year keys to January 1st, and day keys to the day itself.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidIntervalInput`] if the key doesn't have
/// one of the four shapes or names a date that doesn't exist.
pub fn bucket_date(key: &str) -> Result<NaiveDate, AnalyticsError> {
    let invalid = || AnalyticsError::InvalidIntervalInput {
        key: key.to_string(),
    };

    if let Some((year, week)) = key.split_once("-W") {
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let week: u32 = week.parse().map_err(|_| invalid())?;
        return NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(invalid);
    }

    let mut parts = key.split('-');
    let year: i32 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(invalid)?;
    let rest = parts
        .map(|p| p.parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    let date = match rest.as_slice() {
        [] => NaiveDate::from_ymd_opt(year, 1, 1),
        [month] => NaiveDate::from_ymd_opt(year, *month, 1),
        [month, day] => NaiveDate::from_ymd_opt(year, *month, *day),
        _ => None,
    };

    date.ok_or_else(invalid)
}

/// Counts cases per bucket, in chronological order.
#[must_use]
pub fn bucket_cases(cases: &[CaseRecord], interval: TimeInterval) -> Vec<(String, u64)> {
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();

    for case in cases {
        *buckets
            .entry(bucket_key(case.date_occurred, interval))
            .or_default() += 1;
    }

    buckets.into_iter().collect()
}

/// Builds the timeline for cases matching the filters, using the current
/// time for the default date range.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if a date is invalid, a bucket key can't be
/// inverted, or the store fails.
pub async fn get_timeline(
    store: &dyn RecordStore,
    params: &TimelineParams,
) -> Result<Vec<TimelineData>, AnalyticsError> {
    get_timeline_at(store, params, Utc::now()).await
}

/// Builds the timeline for cases matching the filters.
///
/// The range defaults to the year ending at `now`. Unrecognized intervals
/// fall back to monthly buckets.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if a date is invalid, a bucket key can't be
/// inverted, or the store fails.
pub async fn get_timeline_at(
    store: &dyn RecordStore,
    params: &TimelineParams,
    now: DateTime<Utc>,
) -> Result<Vec<TimelineData>, AnalyticsError> {
    let start = match params.start_date.as_deref() {
        Some(s) => parse_date(s)?,
        None => now - Duration::days(DEFAULT_LOOKBACK_DAYS),
    };
    let end = match params.end_date.as_deref() {
        Some(s) => parse_date(s)?,
        None => now,
    };
    let interval = params.interval();

    let predicate = RecordFilter {
        start: Some(start),
        end: Some(end),
        violation_type: params.violation_type.clone(),
        ..RecordFilter::default()
    }
    .for_cases();
    log::debug!(
        "Building {interval} timeline where {}",
        predicate.describe()
    );

    let cases = store.fetch_cases(&predicate).await?;

    timeline_points(&cases, interval, params.violation_type.as_deref())
}

/// Buckets already-fetched cases into timeline points.
///
/// `violation_type` is echoed on every point; it does not filter.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidIntervalInput`] if a bucket key can't
/// be inverted.
pub fn timeline_points(
    cases: &[CaseRecord],
    interval: TimeInterval,
    violation_type: Option<&str>,
) -> Result<Vec<TimelineData>, AnalyticsError> {
    bucket_cases(cases, interval)
        .into_iter()
        .map(|(key, count)| {
            Ok(TimelineData {
                date: bucket_date(&key)?,
                count,
                violation_type: violation_type.map(ToString::to_string),
            })
        })
        .collect()
}
