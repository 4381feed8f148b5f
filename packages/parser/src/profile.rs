//! Report profiles: the anchors, windows, patterns and keyword lists of one
//! crash report form.
//!
//! Profiles are defined in TOML files under `profiles/` and embedded at
//! compile time. A profile can also be loaded from a user-supplied file to
//! tune the heuristics without rebuilding.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading or compiling a report profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The profile TOML is malformed.
    #[error("Failed to parse report profile: {0}")]
    Toml(#[from] toml::de::Error),

    /// A pattern in the profile failed to compile.
    #[error("Invalid regex for {field}: {source}")]
    Regex {
        /// Dotted profile key of the offending pattern.
        field: &'static str,
        /// Underlying compile error.
        #[source]
        source: regex::Error,
    },

    /// The profile parsed but its values are inconsistent.
    #[error("Invalid report profile: {0}")]
    Invalid(String),

    /// Reading a profile file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A report form description loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportProfile {
    /// Unique identifier (e.g., `"njtr1"`).
    pub id: String,
    /// Human-readable form name.
    pub name: String,
    /// Patterns for document-level fields.
    pub fields: FieldPatterns,
    /// Occupant block segmentation rules.
    pub occupants: OccupantRules,
    /// Charged-driver hint rules.
    pub charged_driver: ChargedDriverRules,
    /// Commercial vehicle keyword scan.
    pub commercial: CommercialRules,
    /// Fatality detection rules.
    pub fatal: FatalRules,
    /// Not-at-fault labeling policy.
    #[serde(default)]
    pub not_at_fault: NotAtFaultRules,
}

/// Regex patterns whose first capture group is the field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPatterns {
    /// Case number pattern.
    pub case_number: String,
    /// Police department pattern.
    pub police_dept: String,
    /// Crash date pattern.
    pub crash_date: String,
}

/// Rules for cutting candidate names out of the occupants block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupantRules {
    /// Phrase that opens the occupants block.
    pub anchor: String,
    /// Number of characters scanned from the anchor onward.
    pub window_chars: usize,
    /// Lines containing any of these are labels, not names.
    #[serde(default)]
    pub skip_markers: Vec<String>,
    /// Fewest whitespace tokens an accepted name may have.
    pub min_name_tokens: usize,
    /// Most whitespace tokens an accepted name may have.
    pub max_name_tokens: usize,
    /// Cap on names kept per document.
    pub max_occupants: usize,
}

/// Rules for locating the name near the charges section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargedDriverRules {
    /// Literal marker of the charges section.
    pub anchor: String,
    /// Characters scanned before the anchor.
    pub chars_before: usize,
    /// Characters scanned from the anchor onward.
    pub chars_after: usize,
    /// Fewest words an accepted hint may have.
    pub min_words: usize,
    /// Most words an accepted hint may have.
    pub max_words: usize,
}

/// Keywords whose presence marks a commercial vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommercialRules {
    /// Matched as case-insensitive substrings.
    pub keywords: Vec<String>,
}

/// Rules for detecting a non-zero fatality count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatalRules {
    /// Literal that must appear somewhere in the text.
    pub marker: String,
    /// Pattern matching the killed-count box with a non-zero count.
    pub count_pattern: String,
}

/// Not-at-fault labeling policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotAtFaultRules {
    /// Label every occupant with an empty value (instead of "Yes") when no
    /// charged-driver hint was found.
    #[serde(default)]
    pub unknown_without_charge_hint: bool,
}

// ── Compile-time embedded TOML files ────────────────────────────────

const PROFILE_TOMLS: &[(&str, &str)] = &[("njtr1", include_str!("../profiles/njtr1.toml"))];

/// Identifier of the default profile.
pub const DEFAULT_PROFILE_ID: &str = "njtr1";

/// Returns every built-in profile.
///
/// # Panics
///
/// Panics if any embedded TOML profile is malformed (the profiles are
/// compiled into the binary, so this is caught by the tests).
#[must_use]
pub fn all_profiles() -> Vec<ReportProfile> {
    PROFILE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            ReportProfile::from_toml_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse report profile '{name}': {e}"))
        })
        .collect()
}

/// Returns the built-in profile with the given identifier.
#[must_use]
pub fn builtin_profile(id: &str) -> Option<ReportProfile> {
    all_profiles().into_iter().find(|p| p.id == id)
}

impl ReportProfile {
    /// Parses and validates a profile from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Toml`] if the text is not a valid profile,
    /// or [`ProfileError::Invalid`] if its limits are inconsistent.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ProfileError> {
        let profile: Self = toml::from_str(toml_str)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Loads a profile from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Io`] if the file cannot be read, or any error
    /// of [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let contents = std::fs::read_to_string(path)?;
        let profile = Self::from_toml_str(&contents)?;
        log::info!(
            "Loaded report profile '{}' from {}",
            profile.id,
            path.display()
        );
        Ok(profile)
    }

    /// The default NJTR-1 profile.
    ///
    /// # Panics
    ///
    /// Panics if the embedded NJTR-1 profile is missing or malformed.
    #[must_use]
    pub fn njtr1() -> Self {
        builtin_profile(DEFAULT_PROFILE_ID)
            .unwrap_or_else(|| panic!("missing built-in profile '{DEFAULT_PROFILE_ID}'"))
    }

    /// Renders the profile back to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn validate(&self) -> Result<(), ProfileError> {
        let occ = &self.occupants;
        if occ.anchor.is_empty() {
            return Err(ProfileError::Invalid("occupants.anchor is empty".to_string()));
        }
        if occ.min_name_tokens == 0 || occ.min_name_tokens > occ.max_name_tokens {
            return Err(ProfileError::Invalid(format!(
                "occupants name token range {}..={} is empty",
                occ.min_name_tokens, occ.max_name_tokens
            )));
        }

        let charged = &self.charged_driver;
        if charged.anchor.is_empty() {
            return Err(ProfileError::Invalid(
                "charged_driver.anchor is empty".to_string(),
            ));
        }
        if charged.min_words == 0 || charged.min_words > charged.max_words {
            return Err(ProfileError::Invalid(format!(
                "charged_driver word range {}..={} is empty",
                charged.min_words, charged.max_words
            )));
        }

        if self.commercial.keywords.iter().any(String::is_empty) {
            return Err(ProfileError::Invalid(
                "commercial.keywords contains an empty keyword".to_string(),
            ));
        }

        Ok(())
    }
}
