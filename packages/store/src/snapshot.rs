//! JSON snapshots of the record collections.

use std::path::Path;

use rights_monitor_store_models::{CaseRecord, ReportRecord, VictimRecord};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Every collection's records, as written to or read from a JSON file.
///
/// Keys follow the collection names: `cases`, `incident_reports`, `victims`.
/// Missing keys load as empty collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Case records.
    #[serde(default)]
    pub cases: Vec<CaseRecord>,
    /// Incident reports.
    #[serde(default, rename = "incident_reports")]
    pub reports: Vec<ReportRecord>,
    /// Victim profiles.
    #[serde(default)]
    pub victims: Vec<VictimRecord>,
}

impl Snapshot {
    /// Parses a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Snapshot`] if the text isn't a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file can't be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let json = tokio::fs::read_to_string(path).await?;
        let snapshot = Self::from_json(&json)?;
        log::info!(
            "Loaded snapshot {}: {} cases, {} reports, {} victims",
            path.display(),
            snapshot.cases.len(),
            snapshot.reports.len(),
            snapshot.victims.len(),
        );
        Ok(snapshot)
    }
}
