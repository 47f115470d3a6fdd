#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Analytics parameter and result types.
//!
//! Defines the inputs and outputs of each dashboard aggregation: violation
//! counts, geographic clusters, timeline buckets, and the combined overview.
//! Field names are `snake_case` on the wire.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Bucket width for timeline aggregation.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimeInterval {
    /// One bucket per calendar day.
    Day,
    /// One bucket per ISO week.
    Week,
    /// One bucket per calendar month.
    #[default]
    Month,
    /// One bucket per calendar year.
    Year,
}

impl TimeInterval {
    /// Parses a request value, falling back to [`Self::Month`] for anything
    /// unrecognized or absent.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().to_ascii_lowercase().parse().ok())
            .unwrap_or_default()
    }
}

/// Filters shared by the case and report aggregations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Inclusive lower date bound (ISO 8601).
    pub start_date: Option<String>,
    /// Inclusive upper date bound (ISO 8601).
    pub end_date: Option<String>,
    /// Exact country match.
    pub country: Option<String>,
    /// Exact region match (city for reports).
    pub region: Option<String>,
    /// Violation type the record must carry.
    pub violation_type: Option<String>,
}

/// Parameters for the geographic cluster aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoParams {
    /// Exact country match.
    pub country: Option<String>,
    /// Exact region match.
    pub region: Option<String>,
    /// Violation type the case must carry.
    pub violation_type: Option<String>,
}

/// Parameters for the timeline aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineParams {
    /// Inclusive lower date bound (ISO 8601). Defaults to one year ago.
    pub start_date: Option<String>,
    /// Inclusive upper date bound (ISO 8601). Defaults to now.
    pub end_date: Option<String>,
    /// Violation type the case must carry.
    pub violation_type: Option<String>,
    /// `day`, `week`, `month`, or `year`. Anything else means `month`.
    pub interval: Option<String>,
}

impl TimelineParams {
    /// The bucket width requested.
    #[must_use]
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::from_param(self.interval.as_deref())
    }
}

/// Parameters for the combined overview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewParams {
    /// Inclusive lower date bound (ISO 8601).
    pub start_date: Option<String>,
    /// Inclusive upper date bound (ISO 8601).
    pub end_date: Option<String>,
    /// Exact country match.
    pub country: Option<String>,
    /// Exact region match (city for reports).
    pub region: Option<String>,
    /// Violation type the record must carry.
    pub violation_type: Option<String>,
    /// Also compute monthly timeline data.
    ///
    /// The timeline covers the same cases as `total_cases`: every filter
    /// applies and there is no default one-year window, unlike the
    /// standalone timeline.
    #[serde(default)]
    pub include_timeline: bool,
    /// Also compute geographic clusters over the same cases as
    /// `total_cases`, date filters included.
    #[serde(default)]
    pub include_geo: bool,
}

impl OverviewParams {
    /// The record filters, without the include flags.
    #[must_use]
    pub fn filters(&self) -> FilterParams {
        FilterParams {
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            country: self.country.clone(),
            region: self.region.clone(),
            violation_type: self.violation_type.clone(),
        }
    }
}

/// Number of occurrences of one violation type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationTypeCount {
    /// Violation type name.
    pub violation_type: String,
    /// Occurrences across matching records.
    pub count: u64,
}

/// Cases sharing one (country, region, coordinates) location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoData {
    /// Country name.
    pub country: String,
    /// Region, if recorded.
    pub region: Option<String>,
    /// `[longitude, latitude]`.
    pub coordinates: [f64; 2],
    /// Number of cases at this location.
    pub count: u64,
    /// Occurrences of each violation type across those cases.
    pub violation_types: BTreeMap<String, u64>,
}

/// Case count for one timeline bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineData {
    /// First day of the bucket (Monday for weeks).
    pub date: NaiveDate,
    /// Cases in the bucket.
    pub count: u64,
    /// The violation type filter that was applied, if any.
    pub violation_type: Option<String>,
}

/// Combined dashboard snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    /// Cases matching the filters.
    pub total_cases: u64,
    /// Reports matching the filters.
    pub total_reports: u64,
    /// All victim profiles (not filtered).
    pub total_victims: u64,
    /// Violation type counts over matching cases.
    pub violation_counts: Vec<ViolationTypeCount>,
    /// Monthly timeline, when requested.
    pub timeline_data: Option<Vec<TimelineData>>,
    /// Geographic clusters, when requested.
    pub geo_data: Option<Vec<GeoData>>,
}

/// Incident report totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAnalytics {
    /// Reports matching the filters.
    pub total_reports: u64,
    /// Violation label counts over matching reports, most frequent first.
    pub by_violation_type: Vec<ViolationTypeCount>,
    /// Matching reports per review status. Every status is present, zero
    /// counts included.
    pub by_status: BTreeMap<String, u64>,
}
