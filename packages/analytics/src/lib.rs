#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation engine for the rights monitor dashboards.
//!
//! Each public `get_*` function corresponds to one dashboard query. It
//! turns request parameters into a [`Predicate`], fetches the matching
//! records through a [`RecordStore`], and runs a pure aggregation over them:
//!
//! * [`violations`] unwinds violation types and counts them.
//! * [`geo`] clusters cases by (country, region, coordinates).
//! * [`timeline`] buckets cases by day, ISO week, month, or year.
//! * [`overview`] composes counts across cases, reports, and victims.
//! * [`reports`] summarizes incident reports by label and review status.
//!
//! Requests share no state. Each one reads whatever the store holds at the
//! moment of each round trip.
//!
//! [`Predicate`]: rights_monitor_store_models::Predicate
//! [`RecordStore`]: rights_monitor_store::RecordStore

pub mod filters;
pub mod geo;
pub mod overview;
pub mod reports;
pub mod timeline;
pub mod violations;

#[cfg(test)]
pub(crate) mod test_utils;

pub use geo::get_geo_data;
pub use overview::get_overview;
pub use reports::get_report_analytics;
pub use timeline::get_timeline;
pub use violations::get_violation_counts;

use rights_monitor_store::StoreError;
use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The record store failed or was unreachable.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A date filter wasn't valid ISO 8601.
    #[error("Invalid date '{input}'. Expected ISO 8601, e.g. 2024-01-31 or 2024-01-31T12:00:00")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// A timeline bucket key couldn't be turned back into a date.
    #[error("Invalid bucket key '{key}'")]
    InvalidIntervalInput {
        /// The rejected key.
        key: String,
    },
}
