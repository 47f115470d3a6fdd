//! Combined dashboard overview.
//!
//! The overview issues independent store calls for case counts, report
//! counts, victim counts, and the matching cases. They run concurrently and
//! are not isolated from one another, so a write landing between them can be
//! reflected in some figures and not others. Any single failure fails the
//! whole overview.

use rights_monitor_analytics_models::{AnalyticsOverview, OverviewParams, TimeInterval};
use rights_monitor_store::{Collection, RecordStore};
use rights_monitor_store_models::Predicate;

use crate::{
    AnalyticsError, filters::RecordFilter, geo::cluster_cases, timeline::timeline_points,
    violations::count_violation_types,
};

/// Builds the overview for the given filters.
///
/// Cases and reports are filtered by the same parameters, each through its
/// own field paths. Victims are always counted in full. The optional
/// timeline and geo sections are computed from the cases behind
/// `total_cases`, so all three agree.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if a date is invalid or any store call fails.
pub async fn get_overview(
    store: &dyn RecordStore,
    params: &OverviewParams,
) -> Result<AnalyticsOverview, AnalyticsError> {
    let filter = RecordFilter::from_params(&params.filters())?;
    let case_predicate = filter.for_cases();
    let report_predicate = filter.for_reports();
    let every_victim = Predicate::all();

    log::debug!(
        "Building overview: cases where {}; reports where {}",
        case_predicate.describe(),
        report_predicate.describe()
    );

    let (total_cases, total_reports, total_victims, cases) = futures::try_join!(
        store.count(Collection::Cases, &case_predicate),
        store.count(Collection::IncidentReports, &report_predicate),
        store.count(Collection::Victims, &every_victim),
        store.fetch_cases(&case_predicate),
    )?;

    let violation_counts = count_violation_types(&cases);

    let timeline_data = params
        .include_timeline
        .then(|| {
            timeline_points(
                &cases,
                TimeInterval::Month,
                params.violation_type.as_deref(),
            )
        })
        .transpose()?;

    let geo_data = params.include_geo.then(|| cluster_cases(&cases));

    Ok(AnalyticsOverview {
        total_cases,
        total_reports,
        total_victims,
        violation_counts,
        timeline_data,
        geo_data,
    })
}
