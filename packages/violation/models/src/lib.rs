#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Violation-type taxonomy and lifecycle enums.
//!
//! This crate defines the canonical set of human-rights violation kinds
//! recorded against cases, plus the status/priority enums carried by case,
//! report, and victim records. Wire names are `snake_case` everywhere.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Kind of human-rights violation attached to a case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViolationType {
    /// Forced removal of people from their homes or land
    ForcedDisplacement,
    /// Deliberate destruction of homes, land, or belongings
    PropertyDestruction,
    /// Detention without due process
    ArbitraryDetention,
    /// Torture or cruel, inhuman treatment
    Torture,
    /// Killing outside any judicial process
    ExtrajudicialKilling,
    /// Detention followed by refusal to disclose fate or whereabouts
    EnforcedDisappearance,
    /// Rape and other sexual violence
    SexualViolence,
    /// Recruitment or use of children by armed groups
    ChildRecruitment,
    /// Anything not covered above
    Other,
}

impl ViolationType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ForcedDisplacement,
            Self::PropertyDestruction,
            Self::ArbitraryDetention,
            Self::Torture,
            Self::ExtrajudicialKilling,
            Self::EnforcedDisappearance,
            Self::SexualViolence,
            Self::ChildRecruitment,
            Self::Other,
        ]
    }
}

/// Lifecycle state of a case.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CaseStatus {
    /// Just recorded
    #[default]
    New,
    /// Actively being investigated
    UnderInvestigation,
    /// Waiting on evidence
    PendingEvidence,
    /// Legal proceedings under way
    LegalAction,
    /// Outcome reached
    Resolved,
    /// No further work
    Closed,
}

/// Handling priority of a case.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
    /// Low
    Low,
    /// Medium
    #[default]
    Medium,
    /// High
    High,
    /// Urgent
    Urgent,
}

/// Review state of an incident report.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReportStatus {
    /// Not yet reviewed
    #[default]
    New,
    /// Being reviewed
    UnderReview,
    /// Confirmed
    Verified,
    /// Rejected as unfounded or duplicate
    Rejected,
    /// Merged into an existing case
    Merged,
}

impl ReportStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::New,
            Self::UnderReview,
            Self::Verified,
            Self::Rejected,
            Self::Merged,
        ]
    }
}

/// Who filed an incident report.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReporterType {
    /// The victim themself
    Victim,
    /// A witness
    Witness,
    /// Non-governmental organization
    Ngo,
    /// Journalist
    Journalist,
    /// Reporter withheld identity
    #[default]
    Anonymous,
    /// Other
    Other,
}

/// Role of a person in a victim profile.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IndividualType {
    /// Victim
    #[default]
    Victim,
    /// Witness
    Witness,
    /// Both victim and witness
    Both,
}
