//! Fault and risk-flag heuristics.
//!
//! Each heuristic is a plain substring or pattern scan over the full
//! document text. None of them understand the form's layout, so each
//! documents how it can be wrong.

use std::sync::LazyLock;

use regex::Regex;

use crate::profile::ChargedDriverRules;
use crate::window;

/// A whole line of uppercase letters, spaces, hyphens and apostrophes.
///
/// Case-sensitive on purpose: printed names on the form are uppercase while
/// most labels are not.
static CAPS_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n([A-Z][A-Z \-']{4,60})\n").expect("valid regex"));

/// Finds the likely charged driver's name near the charges section.
///
/// Looks at a window around the first occurrence of `rules.anchor` and
/// returns the first full uppercase line with an acceptable word count,
/// whitespace-normalized.
///
/// * **False positives**: any uppercase line near the anchor (a street, a
///   statute title, a municipality) is accepted if its word count fits.
/// * **False negatives**: names with digits or lowercase letters, names
///   sharing a line with other text, and consecutive uppercase lines (a
///   newline consumed by one match cannot open the next).
#[must_use]
pub fn charged_driver_hint(text: &str, rules: &ChargedDriverRules) -> Option<String> {
    let anchor = text.find(&rules.anchor)?;
    let snippet = window::around(text, anchor, rules.chars_before, rules.chars_after);

    CAPS_LINE_RE
        .captures_iter(snippet)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .find(|candidate| {
            let words = candidate.split_whitespace().count();
            (rules.min_words..=rules.max_words).contains(&words)
        })
}

/// Returns `true` if any keyword appears in the upper-cased text.
///
/// `keywords` must already be upper-cased. Matching is by substring, so
/// "TRUCK" also fires on "TRUCKEE" or a pickup truck (false positives are
/// accepted); carriers identified only by an unlisted name are missed.
#[must_use]
pub fn is_commercial(text: &str, keywords: &[String]) -> bool {
    let upper = text.to_uppercase();
    keywords.iter().any(|k| upper.contains(k.as_str()))
}

/// Returns `true` if the text contains `marker` and the killed-count box
/// pattern matches a non-zero count.
///
/// Misses fatalities when extraction separates the count from its label by
/// other text; a stray digit after the label produces a false positive.
#[must_use]
pub fn is_fatal(text: &str, marker: &str, count_re: &Regex) -> bool {
    text.contains(marker) && count_re.is_match(text)
}
