//! Store-agnostic record predicates.
//!
//! A [`Predicate`] is an AND of [`Clause`]s over named [`FieldPath`]s. Store
//! adapters may translate it into their own query language or evaluate it
//! in memory with [`Predicate::matches`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named field in a stored document.
///
/// Cases keep location, date, and violation types at the top level; reports
/// nest the same concepts under `incident_details`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPath {
    /// `date_occurred` on a case.
    DateOccurred,
    /// `location.country` on a case.
    LocationCountry,
    /// `location.region` on a case.
    LocationRegion,
    /// `violation_types` on a case.
    ViolationTypes,
    /// `incident_details.date` on a report.
    IncidentDate,
    /// `incident_details.location.country` on a report.
    IncidentCountry,
    /// `incident_details.location.city` on a report.
    IncidentCity,
    /// `incident_details.violation_types` on a report.
    IncidentViolationTypes,
    /// `status` on a report.
    ReportStatus,
}

impl FieldPath {
    /// Dotted document path for this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DateOccurred => "date_occurred",
            Self::LocationCountry => "location.country",
            Self::LocationRegion => "location.region",
            Self::ViolationTypes => "violation_types",
            Self::IncidentDate => "incident_details.date",
            Self::IncidentCountry => "incident_details.location.country",
            Self::IncidentCity => "incident_details.location.city",
            Self::IncidentViolationTypes => "incident_details.violation_types",
            Self::ReportStatus => "status",
        }
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single condition on a document field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum Clause {
    /// Timestamp field is at or after `at`.
    DateFrom {
        /// Field to compare.
        path: FieldPath,
        /// Inclusive lower bound.
        at: DateTime<Utc>,
    },
    /// Timestamp field is at or before `at`.
    DateTo {
        /// Field to compare.
        path: FieldPath,
        /// Inclusive upper bound.
        at: DateTime<Utc>,
    },
    /// Scalar text field equals `value` exactly.
    Equals {
        /// Field to compare.
        path: FieldPath,
        /// Expected value.
        value: String,
    },
    /// Multi-valued field contains `value`.
    Contains {
        /// Field to search.
        path: FieldPath,
        /// Member to look for.
        value: String,
    },
}

impl Clause {
    fn matches<D: Document + ?Sized>(&self, doc: &D) -> bool {
        match self {
            Self::DateFrom { path, at } => doc.timestamp_at(*path).is_some_and(|t| t >= *at),
            Self::DateTo { path, at } => doc.timestamp_at(*path).is_some_and(|t| t <= *at),
            Self::Equals { path, value } => doc.text_at(*path) == Some(value.as_str()),
            Self::Contains { path, value } => doc.contains_at(*path, value),
        }
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateFrom { path, at } => write!(f, "{path} >= {}", at.to_rfc3339()),
            Self::DateTo { path, at } => write!(f, "{path} <= {}", at.to_rfc3339()),
            Self::Equals { path, value } => write!(f, "{path} = {value:?}"),
            Self::Contains { path, value } => write!(f, "{value:?} IN {path}"),
        }
    }
}

/// Conjunction of clauses. An empty predicate matches every document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// A predicate that matches every document.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Adds a clause.
    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Builder-style [`Self::push`].
    #[must_use]
    pub fn with(mut self, clause: Clause) -> Self {
        self.push(clause);
        self
    }

    /// The clauses, in insertion order.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Whether this predicate has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluates the predicate against a document.
    ///
    /// A clause on a field the document doesn't have never matches.
    #[must_use]
    pub fn matches<D: Document + ?Sized>(&self, doc: &D) -> bool {
        self.clauses.iter().all(|clause| clause.matches(doc))
    }

    /// Human-readable rendering for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.clauses.is_empty() {
            "all documents".to_string()
        } else {
            self.clauses
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" AND ")
        }
    }
}

/// Field access for predicate evaluation.
pub trait Document {
    /// Timestamp stored at `path`, if this document has one there.
    fn timestamp_at(&self, path: FieldPath) -> Option<DateTime<Utc>>;

    /// Scalar text stored at `path`, if this document has one there.
    fn text_at(&self, path: FieldPath) -> Option<&str>;

    /// Whether the multi-valued field at `path` contains `value`.
    fn contains_at(&self, path: FieldPath, value: &str) -> bool;
}
