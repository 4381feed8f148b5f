#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Heuristic crash report parser.
//!
//! Turns the extracted text of one police crash report into lead rows. The
//! pipeline has independent stages that all read the same text:
//!
//! * [`fields`] matches numbered form labels (case number, department,
//!   crash date).
//! * [`occupants`] cuts the occupants block into candidate names.
//! * [`heuristics`] finds the charged driver and the commercial/fatal
//!   flags.
//!
//! [`assemble`] then combines their outputs into [`LeadRow`]s. All anchors,
//! windows and patterns come from a [`ReportProfile`]; the default is the
//! embedded NJTR-1 profile.
//!
//! Parsing is a pure function of the input text: the same text always
//! yields the same rows.

pub mod assemble;
pub mod fields;
pub mod heuristics;
pub mod occupants;
pub mod profile;
pub mod window;

use crash_leads_lead_models::{ExtractedFields, LeadRow};
use regex::Regex;

use fields::FieldMatchers;
pub use profile::{ProfileError, ReportProfile};

/// Everything the parser learned about one document, before row assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReport {
    /// Document-level fields.
    pub fields: ExtractedFields,
    /// Unique candidate occupant names, in document order.
    pub occupants: Vec<String>,
    /// Name found near the charges section, if any.
    pub charged_driver_hint: Option<String>,
    /// Whether a commercial-vehicle keyword appeared.
    pub commercial: bool,
    /// Whether a non-zero killed count appeared.
    pub fatal: bool,
}

/// A report profile with its patterns compiled.
///
/// Immutable once built; share it across documents (and threads) freely.
#[derive(Debug, Clone)]
pub struct ReportParser {
    profile: ReportProfile,
    fields: FieldMatchers,
    fatal_count: Regex,
    commercial_keywords: Vec<String>,
}

impl ReportParser {
    /// Compiles `profile` into a parser.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] if any profile pattern fails to compile.
    pub fn new(profile: ReportProfile) -> Result<Self, ProfileError> {
        let fields = FieldMatchers::compile(&profile.fields)?;
        let fatal_count = Regex::new(&profile.fatal.count_pattern).map_err(|source| {
            ProfileError::Regex {
                field: "fatal.count_pattern",
                source,
            }
        })?;
        let commercial_keywords = profile
            .commercial
            .keywords
            .iter()
            .map(|k| k.to_uppercase())
            .collect();

        Ok(Self {
            profile,
            fields,
            fatal_count,
            commercial_keywords,
        })
    }

    /// A parser for the embedded NJTR-1 profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] if the embedded profile fails to compile.
    pub fn njtr1() -> Result<Self, ProfileError> {
        Self::new(ReportProfile::njtr1())
    }

    /// The profile this parser was built from.
    #[must_use]
    pub const fn profile(&self) -> &ReportProfile {
        &self.profile
    }

    /// Runs every extraction stage over `text`.
    #[must_use]
    pub fn parse(&self, text: &str) -> ParsedReport {
        ParsedReport {
            fields: self.fields.extract(text),
            occupants: occupants::parse_occupants(text, &self.profile.occupants),
            charged_driver_hint: heuristics::charged_driver_hint(
                text,
                &self.profile.charged_driver,
            ),
            commercial: heuristics::is_commercial(text, &self.commercial_keywords),
            fatal: heuristics::is_fatal(text, &self.profile.fatal.marker, &self.fatal_count),
        }
    }

    /// Assembles the lead rows of an already parsed report.
    #[must_use]
    pub fn rows(&self, report: &ParsedReport) -> Vec<LeadRow> {
        assemble::assemble_rows(report, self.profile.not_at_fault)
    }

    /// Parses `text` and assembles its lead rows.
    #[must_use]
    pub fn parse_document(&self, text: &str) -> Vec<LeadRow> {
        self.rows(&self.parse(text))
    }
}
