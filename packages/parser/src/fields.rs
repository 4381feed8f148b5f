//! Document-level field matchers.
//!
//! Each matcher scans the full document text for one numbered form label
//! and returns the first capture group of the first match. A missing label
//! yields `None`, never an error.

use crash_leads_lead_models::ExtractedFields;
use regex::Regex;

use crate::profile::{FieldPatterns, ProfileError};

/// Compiled field patterns of a report profile.
#[derive(Debug, Clone)]
pub struct FieldMatchers {
    case_number: Regex,
    police_dept: Regex,
    crash_date: Regex,
}

impl FieldMatchers {
    /// Compiles the patterns of a profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Regex`] if a pattern fails to compile, or
    /// [`ProfileError::Invalid`] if it has no capture group.
    pub fn compile(patterns: &FieldPatterns) -> Result<Self, ProfileError> {
        Ok(Self {
            case_number: compile_field("fields.case_number", &patterns.case_number)?,
            police_dept: compile_field("fields.police_dept", &patterns.police_dept)?,
            crash_date: compile_field("fields.crash_date", &patterns.crash_date)?,
        })
    }

    /// Matches every field against `text`.
    #[must_use]
    pub fn extract(&self, text: &str) -> ExtractedFields {
        ExtractedFields {
            case_number: first_capture(&self.case_number, text),
            police_dept: first_capture(&self.police_dept, text),
            crash_date: first_capture(&self.crash_date, text),
        }
    }
}

fn compile_field(field: &'static str, pattern: &str) -> Result<Regex, ProfileError> {
    let re = Regex::new(pattern).map_err(|source| ProfileError::Regex { field, source })?;
    if re.captures_len() < 2 {
        return Err(ProfileError::Invalid(format!(
            "{field} pattern has no capture group"
        )));
    }
    Ok(re)
}

/// Returns the trimmed first capture group of the first match of `re`, or
/// `None` if there is no match or the capture is blank.
#[must_use]
pub fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ReportProfile;

    fn matchers() -> FieldMatchers {
        FieldMatchers::compile(&ReportProfile::njtr1().fields).unwrap()
    }

    #[test]
    fn case_number_after_newline() {
        let fields = matchers().extract("1 Case Number\nABC123\n");
        assert_eq!(fields.case_number.as_deref(), Some("ABC123"));
    }

    #[test]
    fn case_number_is_case_insensitive_and_keeps_hyphens() {
        let fields = matchers().extract("header\n1 CASE NUMBER 2023-00417 more");
        assert_eq!(fields.case_number.as_deref(), Some("2023-00417"));
    }

    #[test]
    fn police_dept_stops_at_line_end() {
        let fields = matchers().extract("2 Police Dept of TEST CITY PD\n3 Station\n");
        assert_eq!(fields.police_dept.as_deref(), Some("TEST CITY PD"));
    }

    #[test]
    fn police_dept_allows_punctuation() {
        let fields = matchers().extract("2 Police Dept of\nST. JOHN'S TWP\n");
        // The apostrophe is outside the allowed value characters.
        assert_eq!(fields.police_dept.as_deref(), Some("ST. JOHN"));

        let fields = matchers().extract("2 Police Dept of N.J. STATE POLICE / TROOP C & D\n");
        assert_eq!(
            fields.police_dept.as_deref(),
            Some("N.J. STATE POLICE / TROOP C & D")
        );
    }

    #[test]
    fn crash_date_requires_two_digit_groups() {
        let fields = matchers().extract("4 Date of Crash 01/02/23");
        assert_eq!(fields.crash_date.as_deref(), Some("01/02/23"));

        let fields = matchers().extract("4 Date of Crash 1/2/23");
        assert_eq!(fields.crash_date, None);
    }

    #[test]
    fn missing_labels_are_none() {
        assert_eq!(matchers().extract("nothing here"), ExtractedFields::default());
        assert_eq!(matchers().extract(""), ExtractedFields::default());
    }

    #[test]
    fn rejects_pattern_without_group() {
        let mut patterns = ReportProfile::njtr1().fields;
        patterns.crash_date = r"4 Date of Crash".to_string();
        assert!(matches!(
            FieldMatchers::compile(&patterns),
            Err(ProfileError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_invalid_regex() {
        let mut patterns = ReportProfile::njtr1().fields;
        patterns.case_number = r"(unclosed".to_string();
        assert!(matches!(
            FieldMatchers::compile(&patterns),
            Err(ProfileError::Regex {
                field: "fields.case_number",
                ..
            })
        ));
    }
}
