//! Geographic clustering of cases.
//!
//! Cases are grouped by the exact (country, region, coordinates) triple.
//! Two cases in the same region but at different points form separate
//! clusters.

use std::collections::{BTreeMap, HashMap};

use rights_monitor_analytics_models::{FilterParams, GeoData, GeoParams};
use rights_monitor_store::RecordStore;
use rights_monitor_store_models::CaseRecord;

use crate::{AnalyticsError, filters::RecordFilter, violations::ViolationSource as _};

/// Hashable cluster identity. Coordinates are compared bitwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ClusterKey<'a> {
    country: &'a str,
    region: Option<&'a str>,
    coordinates: [u64; 2],
}

/// Folds `-0.0` into `0.0` so both land in the same cluster.
fn coordinate_bits(value: f64) -> u64 {
    (value + 0.0).to_bits()
}

/// Groups cases into location clusters.
///
/// Each cluster counts its member cases and tallies every violation type
/// they carry. Cases without coordinates can't be placed on a map and are
/// left out. Clusters are returned in order of first appearance.
#[must_use]
pub fn cluster_cases(cases: &[CaseRecord]) -> Vec<GeoData> {
    let mut index: HashMap<ClusterKey<'_>, usize> = HashMap::new();
    let mut clusters: Vec<GeoData> = Vec::new();
    let mut unplaced = 0_usize;

    for case in cases {
        let Some(point) = case.location.coordinates else {
            unplaced += 1;
            continue;
        };

        let key = ClusterKey {
            country: &case.location.country,
            region: case.location.region.as_deref(),
            coordinates: [
                coordinate_bits(point.longitude()),
                coordinate_bits(point.latitude()),
            ],
        };

        let idx = *index.entry(key).or_insert_with(|| {
            clusters.push(GeoData {
                country: case.location.country.clone(),
                region: case.location.region.clone(),
                coordinates: point.coordinates,
                count: 0,
                violation_types: BTreeMap::new(),
            });
            clusters.len() - 1
        });

        let cluster = &mut clusters[idx];
        cluster.count += 1;
        for label in case.violation_labels() {
            *cluster
                .violation_types
                .entry(label.to_string())
                .or_default() += 1;
        }
    }

    if unplaced > 0 {
        log::warn!("{unplaced} cases without coordinates left out of geo clusters");
    }

    clusters
}

/// Clusters cases matching the filters by location.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the store fails.
pub async fn get_geo_data(
    store: &dyn RecordStore,
    params: &GeoParams,
) -> Result<Vec<GeoData>, AnalyticsError> {
    let predicate = RecordFilter::from_params(&FilterParams {
        country: params.country.clone(),
        region: params.region.clone(),
        violation_type: params.violation_type.clone(),
        ..FilterParams::default()
    })?
    .for_cases();
    log::debug!("Clustering cases where {}", predicate.describe());

    let cases = store.fetch_cases(&predicate).await?;
    let clusters = cluster_cases(&cases);

    log::debug!(
        "{} cases fell into {} geo clusters",
        cases.len(),
        clusters.len()
    );

    Ok(clusters)
}
