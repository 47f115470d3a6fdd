//! Violation-type frequency counts.

use std::collections::BTreeMap;

use rights_monitor_analytics_models::{FilterParams, ViolationTypeCount};
use rights_monitor_store::RecordStore;
use rights_monitor_store_models::{CaseRecord, ReportRecord};

use crate::{AnalyticsError, filters::RecordFilter};

/// A record carrying zero or more violation types.
pub trait ViolationSource {
    /// The record's violation types, one item per occurrence.
    fn violation_labels(&self) -> impl Iterator<Item = &str>;
}

impl ViolationSource for CaseRecord {
    fn violation_labels(&self) -> impl Iterator<Item = &str> {
        self.violation_types.iter().map(AsRef::as_ref)
    }
}

impl ViolationSource for ReportRecord {
    fn violation_labels(&self) -> impl Iterator<Item = &str> {
        self.incident_details.violation_types.iter().map(String::as_str)
    }
}

/// Counts violation types across `records`, most frequent first.
///
/// Every (record, violation type) pair is one occurrence, so the counts sum
/// to the number of such pairs rather than the number of records. A record
/// with no violation types contributes nothing. Equal counts are ordered by
/// violation type name.
#[must_use]
pub fn count_violation_types<R: ViolationSource>(records: &[R]) -> Vec<ViolationTypeCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();

    for label in records.iter().flat_map(ViolationSource::violation_labels) {
        *counts.entry(label).or_default() += 1;
    }

    let mut result: Vec<ViolationTypeCount> = counts
        .into_iter()
        .map(|(violation_type, count)| ViolationTypeCount {
            violation_type: violation_type.to_string(),
            count,
        })
        .collect();

    result.sort_by(|a, b| b.count.cmp(&a.count));
    result
}

/// Counts violation types across cases matching the filters.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if a date filter is invalid or the store
/// fails.
pub async fn get_violation_counts(
    store: &dyn RecordStore,
    params: &FilterParams,
) -> Result<Vec<ViolationTypeCount>, AnalyticsError> {
    let predicate = RecordFilter::from_params(params)?.for_cases();
    log::debug!("Counting violation types where {}", predicate.describe());

    let cases = store.fetch_cases(&predicate).await?;
    let counts = count_violation_types(&cases);

    log::debug!(
        "{} cases produced {} violation types",
        cases.len(),
        counts.len()
    );

    Ok(counts)
}
