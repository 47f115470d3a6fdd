//! Translates request filters into record predicates.
//!
//! Cases and reports store the same concepts under different paths, so a
//! [`RecordFilter`] is rendered against a [`FieldPaths`] table: either
//! [`CASE_FIELDS`] or [`REPORT_FIELDS`].

use chrono::{DateTime, Utc};
use rights_monitor_analytics_models::FilterParams;
use rights_monitor_store_models::{Clause, FieldPath, Predicate, serde_helpers::parse_timestamp};

use crate::AnalyticsError;

/// Where a record collection keeps each filterable concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPaths {
    /// Occurrence timestamp.
    pub date: FieldPath,
    /// Country name.
    pub country: FieldPath,
    /// Sub-national area (region for cases, city for reports).
    pub region: FieldPath,
    /// Multi-valued violation types.
    pub violation_types: FieldPath,
}

/// Field paths for case records.
pub const CASE_FIELDS: FieldPaths = FieldPaths {
    date: FieldPath::DateOccurred,
    country: FieldPath::LocationCountry,
    region: FieldPath::LocationRegion,
    violation_types: FieldPath::ViolationTypes,
};

/// Field paths for incident reports.
pub const REPORT_FIELDS: FieldPaths = FieldPaths {
    date: FieldPath::IncidentDate,
    country: FieldPath::IncidentCountry,
    region: FieldPath::IncidentCity,
    violation_types: FieldPath::IncidentViolationTypes,
};

/// Parses an ISO-8601 date or datetime filter value.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidDate`] if the value can't be parsed.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, AnalyticsError> {
    parse_timestamp(s).ok_or_else(|| AnalyticsError::InvalidDate {
        input: s.to_string(),
    })
}

/// Parsed, collection-independent filter values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Inclusive lower bound on the occurrence date.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the occurrence date.
    pub end: Option<DateTime<Utc>>,
    /// Exact country.
    pub country: Option<String>,
    /// Exact region (city for reports).
    pub region: Option<String>,
    /// Required violation type.
    pub violation_type: Option<String>,
}

impl RecordFilter {
    /// Parses request parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidDate`] if either date bound is not
    /// valid ISO 8601.
    pub fn from_params(params: &FilterParams) -> Result<Self, AnalyticsError> {
        Ok(Self {
            start: params.start_date.as_deref().map(parse_date).transpose()?,
            end: params.end_date.as_deref().map(parse_date).transpose()?,
            country: params.country.clone(),
            region: params.region.clone(),
            violation_type: params.violation_type.clone(),
        })
    }

    /// Renders this filter against a collection's field paths.
    #[must_use]
    pub fn predicate(&self, fields: &FieldPaths) -> Predicate {
        let mut predicate = Predicate::all();

        if let Some(at) = self.start {
            predicate.push(Clause::DateFrom {
                path: fields.date,
                at,
            });
        }

        if let Some(at) = self.end {
            predicate.push(Clause::DateTo {
                path: fields.date,
                at,
            });
        }

        if let Some(country) = &self.country {
            predicate.push(Clause::Equals {
                path: fields.country,
                value: country.clone(),
            });
        }

        if let Some(region) = &self.region {
            predicate.push(Clause::Equals {
                path: fields.region,
                value: region.clone(),
            });
        }

        if let Some(violation_type) = &self.violation_type {
            predicate.push(Clause::Contains {
                path: fields.violation_types,
                value: violation_type.clone(),
            });
        }

        predicate
    }

    /// [`Self::predicate`] for case records.
    #[must_use]
    pub fn for_cases(&self) -> Predicate {
        self.predicate(&CASE_FIELDS)
    }

    /// [`Self::predicate`] for incident reports.
    #[must_use]
    pub fn for_reports(&self) -> Predicate {
        self.predicate(&REPORT_FIELDS)
    }
}

/// Builds the case predicate for request parameters.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidDate`] on an unparseable date.
pub fn case_predicate(params: &FilterParams) -> Result<Predicate, AnalyticsError> {
    Ok(RecordFilter::from_params(params)?.for_cases())
}

/// Builds the report predicate for request parameters.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidDate`] on an unparseable date.
pub fn report_predicate(params: &FilterParams) -> Result<Predicate, AnalyticsError> {
    Ok(RecordFilter::from_params(params)?.for_reports())
}
