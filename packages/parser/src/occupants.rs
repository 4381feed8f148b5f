//! Occupant block segmentation.
//!
//! Finds the occupants block of a report and cuts it into candidate person
//! names. This is a lead generator, not a validated parser:
//!
//! * **False positives** are expected. Any line in the window that looks
//!   like two or more words (street names, vehicle makes, labels that
//!   extraction split oddly) can be emitted as a "name".
//! * **False negatives** happen for single-token names, names longer than
//!   the token cap, names glued to a label on one line, and occupants that
//!   fall past the end of the window.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::profile::OccupantRules;
use crate::window;

/// Every line boundary text extraction may emit: CRLF, LF, a lone CR,
/// vertical tab, form feed, the file/group/record separators, NEL, and the
/// Unicode line and paragraph separators.
static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c-\x1e\x85\u{2028}\u{2029}]").expect("valid regex")
});

/// Lines made only of digits, hyphens and spaces (IDs, dates, phone
/// numbers).
static NUMERIC_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\- ]+$").expect("valid regex"));

/// A run of two or more letters, whitespace, then another letter.
static TWO_WORDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]{2,}\s+[A-Za-z]").expect("valid regex"));

/// A hyphen together with any whitespace around it.
static HYPHEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*-\s*").expect("valid regex"));

/// Two or more consecutive whitespace characters.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// A standalone number of two or more digits (house number, ID, zip).
static NUMBER_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{2,}\b").expect("valid regex"));

/// Extracts unique candidate occupant names from `text`.
///
/// Returns names in first-seen order, at most `rules.max_occupants` of
/// them. Returns an empty list when the anchor phrase is absent.
#[must_use]
pub fn parse_occupants(text: &str, rules: &OccupantRules) -> Vec<String> {
    let Some(anchor) = text.find(&rules.anchor) else {
        log::debug!("Occupants anchor '{}' not found", rules.anchor);
        return Vec::new();
    };

    let block = window::starting_at(text, anchor, rules.window_chars);

    let mut seen = BTreeSet::new();
    let mut names = Vec::new();

    for line in LINE_BREAK_RE
        .split(block)
        .map(str::trim)
        .filter(|l| !l.is_empty())
    {
        if names.len() >= rules.max_occupants {
            break;
        }
        if let Some(name) = candidate_name(line, rules)
            && seen.insert(name.clone())
        {
            names.push(name);
        }
    }

    log::debug!("Parsed {} occupant candidate(s)", names.len());

    names
}

/// Turns one trimmed line of the occupants block into a candidate name.
///
/// Returns `None` for label lines, numeric lines, lines that do not look
/// like two words, and candidates outside the configured token range.
#[must_use]
pub fn candidate_name(line: &str, rules: &OccupantRules) -> Option<String> {
    if rules.skip_markers.iter().any(|m| line.contains(m.as_str())) {
        return None;
    }
    if NUMERIC_LINE_RE.is_match(line) || !TWO_WORDS_RE.is_match(line) {
        return None;
    }

    let cleaned = clean_line(line);
    let name = NUMBER_TOKEN_RE
        .find(&cleaned)
        .map_or(cleaned.as_str(), |m| cleaned[..m.start()].trim());

    let tokens = name.split_whitespace().count();
    (rules.min_name_tokens..=rules.max_name_tokens)
        .contains(&tokens)
        .then(|| name.to_string())
}

/// Replaces hyphens (and the whitespace around them) with a single space,
/// collapses whitespace runs, and trims spaces and hyphens from both ends.
#[must_use]
pub fn clean_line(line: &str) -> String {
    let no_hyphens = HYPHEN_RE.replace_all(line, " ");
    let collapsed = WHITESPACE_RE.replace_all(&no_hyphens, " ");
    collapsed.trim_matches([' ', '-']).to_string()
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;

    use super::*;
    use crate::profile::ReportProfile;

    fn rules() -> OccupantRules {
        ReportProfile::njtr1().occupants
    }

    #[test]
    fn missing_anchor_yields_nothing() {
        assert!(parse_occupants("JOHN SMITH 123 MAIN ST", &rules()).is_empty());
        assert!(parse_occupants("", &rules()).is_empty());
    }

    #[test]
    fn truncates_at_address_number() {
        let text = "Names & Addresses of Occupants\nJOHN SMITH 123 MAIN ST\n";
        assert_eq!(parse_occupants(text, &rules()), vec!["JOHN SMITH"]);
    }

    #[test]
    fn skips_labels_and_numeric_lines() {
        let text = "Names & Addresses of Occupants\n\
            If Deceased, Date of Death\n\
            07-15-1980\n\
            555 123 4567\n\
            MARY ANN JONES\n";
        assert_eq!(parse_occupants(text, &rules()), vec!["MARY ANN JONES"]);
    }

    #[test]
    fn cleans_hyphens_and_spacing() {
        assert_eq!(clean_line("- SMITH  -  JONES ,  ANNA -"), "SMITH JONES , ANNA");
        assert_eq!(clean_line("ANNA SMITH-JONES"), "ANNA SMITH JONES");
    }

    #[test]
    fn enforces_token_range() {
        let text = "Names & Addresses of Occupants\n\
            PRINCE\n\
            AB CD EF GH IJ KL\n\
            AL B\n";
        // "PRINCE" has one token, the second line has six.
        assert_eq!(parse_occupants(text, &rules()), vec!["AL B"]);
    }

    #[test]
    fn line_starting_with_number_is_dropped() {
        let text = "Names & Addresses of Occupants\n12 OAK LANE APT 4\n";
        // Truncating before "12" leaves nothing.
        assert!(parse_occupants(text, &rules()).is_empty());
    }

    #[test]
    fn deduplicates_in_first_seen_order() {
        let text = "Names & Addresses of Occupants\n\
            JOHN SMITH 10 ELM ST\n\
            JANE DOE\n\
            JOHN SMITH 10 ELM ST\n\
            JANE DOE 44 OAK AVE\n";
        assert_eq!(parse_occupants(text, &rules()), vec!["JOHN SMITH", "JANE DOE"]);
    }

    #[test]
    fn caps_at_max_occupants() {
        let mut text = String::from("Names & Addresses of Occupants\n");
        for i in 0..50 {
            let first = char::from(b'A' + u8::try_from(i % 26).unwrap());
            let second = char::from(b'A' + u8::try_from(i / 26).unwrap());
            writeln!(text, "PERSON {first}{second} LAST").unwrap();
        }
        let names = parse_occupants(&text, &rules());
        assert_eq!(names.len(), 30);
        assert_eq!(names[0], "PERSON AA LAST");

        let unique: BTreeSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        for name in &names {
            let tokens = name.split_whitespace().count();
            assert!((2..=5).contains(&tokens), "{name}");
        }
    }

    #[test]
    fn ignores_text_past_the_window() {
        let mut text = String::from("Names & Addresses of Occupants\n");
        text.push_str(&"x".repeat(9000));
        text.push_str("\nLATE ARRIVAL\n");
        assert!(parse_occupants(&text, &rules()).is_empty());
    }

    #[test]
    fn repeated_anchor_lines_are_skipped() {
        let text = "Names & Addresses of Occupants\nFIRST PERSON\n\
            Names & Addresses of Occupants\nSECOND PERSON\n";
        assert_eq!(
            parse_occupants(text, &rules()),
            vec!["FIRST PERSON", "SECOND PERSON"]
        );
    }

    #[test]
    fn splits_on_carriage_returns_and_form_feeds() {
        let expected = vec!["JOHN SMITH", "JANE DOE"];
        for sep in ["\r", "\x0c", "\r\n", "\x0b", "\u{85}", "\u{2028}", "\x1e"] {
            let text = format!("Names & Addresses of Occupants{sep}JOHN SMITH{sep}JANE DOE{sep}");
            assert_eq!(parse_occupants(&text, &rules()), expected, "{sep:?}");
        }
    }
}
