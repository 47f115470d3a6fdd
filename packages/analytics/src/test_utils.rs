//! Record fixtures shared by the aggregation tests.

use async_trait::async_trait;
use rights_monitor_store::{
    Collection, RecordStore, StoreError, memory::MemoryStore, snapshot::Snapshot,
};
use rights_monitor_store_models::{
    CaseRecord, GeoPoint, IncidentDetails, IncidentLocation, Location, Predicate, ReportRecord,
    VictimRecord, serde_helpers::parse_timestamp,
};
use rights_monitor_violation_models::{
    CaseStatus, IndividualType, Priority, ReportStatus, ReporterType, ViolationType,
};

/// A case in Darfur, Sudan at a fixed point.
pub fn case(id: &str, date: &str, types: &[ViolationType]) -> CaseRecord {
    CaseRecord {
        case_id: id.to_string(),
        title: format!("Case {id}"),
        description: String::new(),
        violation_types: types.to_vec(),
        status: CaseStatus::New,
        priority: Priority::Medium,
        location: Location {
            country: "Sudan".to_string(),
            region: Some("Darfur".to_string()),
            coordinates: Some(GeoPoint::new(24.9, 13.6)),
        },
        date_occurred: parse_timestamp(date).unwrap(),
        date_reported: None,
        victims: Vec::new(),
    }
}

/// Moves a case to another location.
pub fn located(
    mut case: CaseRecord,
    country: &str,
    region: Option<&str>,
    coordinates: Option<(f64, f64)>,
) -> CaseRecord {
    case.location = Location {
        country: country.to_string(),
        region: region.map(ToString::to_string),
        coordinates: coordinates.map(|(lon, lat)| GeoPoint::new(lon, lat)),
    };
    case
}

pub fn report(id: &str, date: &str, country: &str, types: &[&str]) -> ReportRecord {
    ReportRecord {
        report_id: id.to_string(),
        reporter_type: ReporterType::Witness,
        anonymous: false,
        incident_details: IncidentDetails {
            date: parse_timestamp(date).unwrap(),
            location: IncidentLocation {
                country: country.to_string(),
                city: "Capital".to_string(),
                coordinates: None,
            },
            description: String::new(),
            violation_types: types.iter().map(ToString::to_string).collect(),
        },
        status: ReportStatus::New,
        assigned_to: None,
    }
}

/// Moves a report to another review status.
pub fn reviewed(mut report: ReportRecord, status: ReportStatus) -> ReportRecord {
    report.status = status;
    report
}

pub fn victim(id: &str) -> VictimRecord {
    VictimRecord {
        victim_id: id.to_string(),
        kind: IndividualType::Victim,
        anonymous: false,
        pseudonym: None,
        cases_involved: Vec::new(),
    }
}

pub fn store(
    cases: Vec<CaseRecord>,
    reports: Vec<ReportRecord>,
    victims: Vec<VictimRecord>,
) -> MemoryStore {
    MemoryStore::from_snapshot(Snapshot {
        cases,
        reports,
        victims,
    })
}

/// A store whose every call fails.
pub struct UnavailableStore;

/// Serves from `inner` except for counts on one collection, which fail.
pub struct FailingCount {
    pub inner: MemoryStore,
    pub collection: Collection,
}

#[async_trait]
impl RecordStore for FailingCount {
    async fn fetch_cases(&self, predicate: &Predicate) -> Result<Vec<CaseRecord>, StoreError> {
        self.inner.fetch_cases(predicate).await
    }

    async fn fetch_reports(&self, predicate: &Predicate) -> Result<Vec<ReportRecord>, StoreError> {
        self.inner.fetch_reports(predicate).await
    }

    async fn count(&self, collection: Collection, predicate: &Predicate) -> Result<u64, StoreError> {
        if collection == self.collection {
            return Err(unavailable());
        }
        self.inner.count(collection, predicate).await
    }
}

fn unavailable() -> StoreError {
    StoreError::Unavailable {
        message: "connection refused".to_string(),
    }
}

#[async_trait]
impl RecordStore for UnavailableStore {
    async fn fetch_cases(&self, _predicate: &Predicate) -> Result<Vec<CaseRecord>, StoreError> {
        Err(unavailable())
    }

    async fn fetch_reports(
        &self,
        _predicate: &Predicate,
    ) -> Result<Vec<ReportRecord>, StoreError> {
        Err(unavailable())
    }

    async fn count(
        &self,
        _collection: Collection,
        _predicate: &Predicate,
    ) -> Result<u64, StoreError> {
        Err(unavailable())
    }
}
