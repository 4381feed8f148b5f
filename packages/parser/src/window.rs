//! Character-bounded text windows around anchor positions.
//!
//! Window sizes are counted in characters, not bytes, so a window never
//! splits a multi-byte character in extracted text.

/// Returns up to `len` characters of `text` starting at byte offset `at`.
///
/// `at` must lie on a character boundary (as returned by [`str::find`]).
#[must_use]
pub fn starting_at(text: &str, at: usize, len: usize) -> &str {
    let rest = &text[at..];
    let end = rest.char_indices().nth(len).map_or(rest.len(), |(i, _)| i);
    &rest[..end]
}

/// Returns up to `before` characters preceding byte offset `at` plus up to
/// `after` characters from `at` onward.
#[must_use]
pub fn around(text: &str, at: usize, before: usize, after: usize) -> &str {
    let start = text[..at]
        .char_indices()
        .rev()
        .take(before)
        .last()
        .map_or(at, |(i, _)| i);
    let end = at + starting_at(text, at, after).len();
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_at_clamps_to_end() {
        assert_eq!(starting_at("abcdef", 2, 3), "cde");
        assert_eq!(starting_at("abcdef", 2, 100), "cdef");
        assert_eq!(starting_at("abcdef", 6, 3), "");
    }

    #[test]
    fn around_clamps_both_sides() {
        let text = "0123456789";
        assert_eq!(around(text, 5, 2, 3), "34567");
        assert_eq!(around(text, 1, 5, 2), "012");
        assert_eq!(around(text, 8, 0, 50), "89");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "ÉÉÉxÉÉÉ";
        let at = text.find('x').unwrap();
        assert_eq!(around(text, at, 2, 2), "ÉÉxÉ");
        assert_eq!(starting_at(text, 0, 4), "ÉÉÉx");
    }
}
