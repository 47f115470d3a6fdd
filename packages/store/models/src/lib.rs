#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Record types and query predicates for the rights monitor store.
//!
//! These types represent cases, incident reports, and victim profiles as
//! stored in the record store. Multi-valued and timestamp fields are
//! normalized on the way in (see [`serde_helpers`]) so downstream
//! aggregation never branches on storage shape.

pub mod predicate;
pub mod serde_helpers;

use chrono::{DateTime, Utc};
use rights_monitor_violation_models::{
    CaseStatus, IndividualType, Priority, ReportStatus, ReporterType, ViolationType,
};
use serde::{Deserialize, Serialize};

pub use predicate::{Clause, Document, FieldPath, Predicate};

/// A GeoJSON point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// GeoJSON geometry type; always `"Point"`.
    #[serde(rename = "type", skip_deserializing)]
    kind: PointKind,
    /// `[longitude, latitude]` in WGS84.
    pub coordinates: [f64; 2],
}

/// Marker for the GeoJSON `type` member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PointKind;

impl Serialize for PointKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("Point")
    }
}

impl GeoPoint {
    /// Creates a point from longitude and latitude.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: PointKind,
            coordinates: [longitude, latitude],
        }
    }

    /// Longitude (WGS84).
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    /// Latitude (WGS84).
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Where a case took place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Country name.
    pub country: String,
    /// Region, province, or district.
    #[serde(default)]
    pub region: Option<String>,
    /// Point location, if known.
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
}

/// A documented human-rights violation case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Immutable identifier assigned at creation (e.g. `HRM-2024-0001`).
    pub case_id: String,
    /// Short title.
    pub title: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Violation kinds attached to this case.
    #[serde(default, deserialize_with = "serde_helpers::flat_list")]
    pub violation_types: Vec<ViolationType>,
    /// Lifecycle state.
    #[serde(default)]
    pub status: CaseStatus,
    /// Handling priority.
    #[serde(default)]
    pub priority: Priority,
    /// Where it happened.
    pub location: Location,
    /// When it happened.
    #[serde(deserialize_with = "serde_helpers::timestamp")]
    pub date_occurred: DateTime<Utc>,
    /// When it was reported.
    #[serde(default, deserialize_with = "serde_helpers::option_timestamp")]
    pub date_reported: Option<DateTime<Utc>>,
    /// Linked victim IDs.
    #[serde(default)]
    pub victims: Vec<String>,
}

impl Document for CaseRecord {
    fn timestamp_at(&self, path: FieldPath) -> Option<DateTime<Utc>> {
        match path {
            FieldPath::DateOccurred => Some(self.date_occurred),
            _ => None,
        }
    }

    fn text_at(&self, path: FieldPath) -> Option<&str> {
        match path {
            FieldPath::LocationCountry => Some(&self.location.country),
            FieldPath::LocationRegion => self.location.region.as_deref(),
            _ => None,
        }
    }

    fn contains_at(&self, path: FieldPath, value: &str) -> bool {
        path == FieldPath::ViolationTypes
            && self.violation_types.iter().any(|vt| vt.as_ref() == value)
    }
}

/// Where a reported incident took place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentLocation {
    /// Country name.
    pub country: String,
    /// City or town.
    pub city: String,
    /// Reporter-supplied position, kept as stored.
    ///
    /// Reports arrive from many intake channels, so this may be a GeoJSON
    /// point, a `{lat, lng}` object, a pair, or anything else.
    #[serde(default)]
    pub coordinates: Option<serde_json::Value>,
}

/// The incident described by a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentDetails {
    /// When it happened.
    #[serde(deserialize_with = "serde_helpers::timestamp")]
    pub date: DateTime<Utc>,
    /// Where it happened.
    pub location: IncidentLocation,
    /// What happened.
    #[serde(default)]
    pub description: String,
    /// Free-form violation labels supplied by the reporter.
    #[serde(default, deserialize_with = "serde_helpers::flat_list")]
    pub violation_types: Vec<String>,
}

/// An incident report filed by a victim, witness, or organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Report identifier (e.g. `IR-2024-0001`).
    pub report_id: String,
    /// Who filed it.
    #[serde(default)]
    pub reporter_type: ReporterType,
    /// Whether the reporter asked to stay anonymous.
    #[serde(default)]
    pub anonymous: bool,
    /// The incident itself.
    pub incident_details: IncidentDetails,
    /// Review state.
    #[serde(default)]
    pub status: ReportStatus,
    /// Assigned reviewer.
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl Document for ReportRecord {
    fn timestamp_at(&self, path: FieldPath) -> Option<DateTime<Utc>> {
        match path {
            FieldPath::IncidentDate => Some(self.incident_details.date),
            _ => None,
        }
    }

    fn text_at(&self, path: FieldPath) -> Option<&str> {
        match path {
            FieldPath::IncidentCountry => Some(&self.incident_details.location.country),
            FieldPath::IncidentCity => Some(&self.incident_details.location.city),
            FieldPath::ReportStatus => Some(self.status.as_ref()),
            _ => None,
        }
    }

    fn contains_at(&self, path: FieldPath, value: &str) -> bool {
        path == FieldPath::IncidentViolationTypes
            && self
                .incident_details
                .violation_types
                .iter()
                .any(|vt| vt == value)
    }
}

/// A victim or witness profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictimRecord {
    /// Profile identifier.
    pub victim_id: String,
    /// Victim, witness, or both.
    #[serde(rename = "type", default)]
    pub kind: IndividualType,
    /// Whether identity is withheld.
    #[serde(default)]
    pub anonymous: bool,
    /// Name used when anonymous.
    #[serde(default)]
    pub pseudonym: Option<String>,
    /// Case IDs this person is involved in.
    #[serde(default)]
    pub cases_involved: Vec<String>,
}

impl Document for VictimRecord {
    fn timestamp_at(&self, _path: FieldPath) -> Option<DateTime<Utc>> {
        None
    }

    fn text_at(&self, _path: FieldPath) -> Option<&str> {
        None
    }

    fn contains_at(&self, _path: FieldPath, _value: &str) -> bool {
        false
    }
}
