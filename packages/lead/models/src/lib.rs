#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Lead row types shared across the crash-leads workspace.
//!
//! A *lead* is one occupant of one crash report, annotated with the
//! document-level fields (case number, department, crash date) and the
//! heuristic labels (not-at-fault, commercial vehicle, fatality). The
//! parser produces [`LeadRow`]s, the exporter serializes them, and the CLI
//! renders them together with a [`LeadSummary`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Name written into the placeholder row of a document without any parsed
/// occupants.
pub const NO_OCCUPANTS_PLACEHOLDER: &str = "(no occupants parsed)";

/// Sheet name used by spreadsheet exports.
pub const LEADS_SHEET_NAME: &str = "Leads";

/// Output column headers, in export order.
pub const COLUMNS: [&str; 7] = [
    "Case Number",
    "Police Dept",
    "Date of Crash",
    "Name",
    "NotAtFault (heuristic)",
    "CommercialVehicleFlag",
    "FatalFlag",
];

/// Document-scoped fields matched from fixed numbered form labels.
///
/// `None` means the label was not found (or its value did not match the
/// expected shape). Values are kept as literal matched text; the crash date
/// in particular is never parsed into a date type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Report case number (field 1).
    pub case_number: Option<String>,
    /// Reporting police department (field 2).
    pub police_dept: Option<String>,
    /// Crash date as printed on the form (field 4).
    pub crash_date: Option<String>,
}

/// Heuristic guess whether an occupant was *not* the charged driver.
///
/// This is a triage label, not a legal determination.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum NotAtFault {
    /// No charged-driver hint matched this occupant.
    Yes,
    /// The charged-driver hint matched this occupant's name.
    No,
    /// No occupant to judge (placeholder rows), or the profile asks for an
    /// empty label when no charged-driver hint exists.
    #[serde(rename = "")]
    #[strum(serialize = "")]
    Unknown,
}

/// A yes/no risk flag as rendered in exports.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Flag {
    /// The flag condition was detected.
    Yes,
    /// The flag condition was not detected.
    No,
}

impl Flag {
    /// Returns `true` for [`Flag::Yes`].
    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

/// One exported lead: a (document, occupant) pair, or the placeholder row
/// for a document with no parsed occupants.
///
/// Serialized field names match [`COLUMNS`] so CSV and JSON exports carry
/// the same header as the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRow {
    /// Case number, or empty when not found.
    #[serde(rename = "Case Number")]
    pub case_number: String,
    /// Police department, or empty when not found.
    #[serde(rename = "Police Dept")]
    pub police_dept: String,
    /// Crash date text, or empty when not found.
    #[serde(rename = "Date of Crash")]
    pub crash_date: String,
    /// Occupant name, or [`NO_OCCUPANTS_PLACEHOLDER`].
    #[serde(rename = "Name")]
    pub name: String,
    /// Not-at-fault heuristic label.
    #[serde(rename = "NotAtFault (heuristic)")]
    pub not_at_fault: NotAtFault,
    /// Commercial vehicle involvement flag.
    #[serde(rename = "CommercialVehicleFlag")]
    pub commercial_vehicle: Flag,
    /// Fatality flag.
    #[serde(rename = "FatalFlag")]
    pub fatal: Flag,
}

impl LeadRow {
    /// Returns the rendered cell values in [`COLUMNS`] order.
    #[must_use]
    pub fn cells(&self) -> [&str; 7] {
        [
            self.case_number.as_str(),
            self.police_dept.as_str(),
            self.crash_date.as_str(),
            self.name.as_str(),
            self.not_at_fault.as_ref(),
            self.commercial_vehicle.as_ref(),
            self.fatal.as_ref(),
        ]
    }

    /// Returns `true` if this is the placeholder row of a document with no
    /// parsed occupants.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.name == NO_OCCUPANTS_PLACEHOLDER
    }
}

/// Aggregate metrics over a batch of lead rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadSummary {
    /// Number of documents processed.
    pub documents: usize,
    /// Total number of rows.
    pub rows: usize,
    /// Rows labeled not-at-fault "Yes".
    pub likely_not_at_fault: usize,
    /// Rows flagged as involving a commercial vehicle.
    pub commercial: usize,
    /// Rows flagged as fatal.
    pub fatal: usize,
}

impl LeadSummary {
    /// Computes the summary metrics for `rows` produced from `documents`
    /// documents.
    #[must_use]
    pub fn from_rows(documents: usize, rows: &[LeadRow]) -> Self {
        Self {
            documents,
            rows: rows.len(),
            likely_not_at_fault: rows
                .iter()
                .filter(|r| r.not_at_fault == NotAtFault::Yes)
                .count(),
            commercial: rows.iter().filter(|r| r.commercial_vehicle.is_yes()).count(),
            fatal: rows.iter().filter(|r| r.fatal.is_yes()).count(),
        }
    }
}
