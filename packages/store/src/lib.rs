#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Record store access for the rights monitor.
//!
//! Aggregations never talk to a storage engine directly. They go through
//! [`RecordStore`], a narrow adapter that returns the records matching a
//! [`Predicate`] and counts them. [`memory::MemoryStore`] is the bundled
//! adapter, seeded from a JSON [`snapshot::Snapshot`].
//!
//! The store is shared by concurrent readers and writers with no snapshot
//! isolation: two calls made back to back may observe different states.

pub mod connect;
pub mod memory;
pub mod snapshot;

use async_trait::async_trait;
use rights_monitor_store_models::{CaseRecord, Predicate, ReportRecord};

/// Errors that can occur while talking to the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not serve the request.
    #[error("Record store unavailable: {message}")]
    Unavailable {
        /// Description of what went wrong.
        message: String,
    },

    /// Reading a snapshot file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot file was not valid JSON or didn't match the record schema.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Named record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Case records.
    Cases,
    /// Incident reports.
    IncidentReports,
    /// Victim and witness profiles.
    Victims,
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cases => write!(f, "cases"),
            Self::IncidentReports => write!(f, "incident_reports"),
            Self::Victims => write!(f, "victims"),
        }
    }
}

/// Read access to the record collections.
///
/// Each method is a single round trip. No retries or timeouts are applied
/// at this layer.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns every case matching `predicate`.
    async fn fetch_cases(&self, predicate: &Predicate) -> Result<Vec<CaseRecord>, StoreError>;

    /// Returns every incident report matching `predicate`.
    async fn fetch_reports(&self, predicate: &Predicate)
    -> Result<Vec<ReportRecord>, StoreError>;

    /// Counts records in `collection` matching `predicate`.
    async fn count(&self, collection: Collection, predicate: &Predicate)
    -> Result<u64, StoreError>;
}
