//! Incident report totals by violation label and review status.

use std::collections::BTreeMap;

use futures::future::try_join_all;
use rights_monitor_analytics_models::{FilterParams, ReportAnalytics};
use rights_monitor_store::{Collection, RecordStore};
use rights_monitor_store_models::{Clause, FieldPath};
use rights_monitor_violation_models::ReportStatus;

use crate::{AnalyticsError, filters::RecordFilter, violations::count_violation_types};

/// Summarizes incident reports matching the filters.
///
/// Violation labels are the reporter's free-form strings, unwound and
/// counted like case violation types. Status counts are one store count per
/// [`ReportStatus`], each narrowed from the same filters.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if a date is invalid or any store call fails.
pub async fn get_report_analytics(
    store: &dyn RecordStore,
    params: &FilterParams,
) -> Result<ReportAnalytics, AnalyticsError> {
    let predicate = RecordFilter::from_params(params)?.for_reports();
    log::debug!("Summarizing reports where {}", predicate.describe());

    let status_counts = ReportStatus::all().iter().map(|status| {
        let by_status = predicate.clone().with(Clause::Equals {
            path: FieldPath::ReportStatus,
            value: status.to_string(),
        });
        async move {
            let count = store.count(Collection::IncidentReports, &by_status).await?;
            Ok::<_, AnalyticsError>((status.to_string(), count))
        }
    });

    let (total_reports, reports, by_status) = futures::try_join!(
        async {
            store
                .count(Collection::IncidentReports, &predicate)
                .await
                .map_err(AnalyticsError::from)
        },
        async {
            store
                .fetch_reports(&predicate)
                .await
                .map_err(AnalyticsError::from)
        },
        try_join_all(status_counts),
    )?;

    let by_status: BTreeMap<String, u64> = by_status.into_iter().collect();
    log::debug!(
        "{total_reports} reports across {} statuses",
        by_status.values().filter(|n| **n > 0).count()
    );

    Ok(ReportAnalytics {
        total_reports,
        by_violation_type: count_violation_types(&reports),
        by_status,
    })
}
