//! Text normalization shared by the extractors.
//!
//! Handles apostrophe variants, whitespace collapsing, list-marker cleanup
//! and the keys used for case-insensitive comparison.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex to collapse runs of whitespace into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Leading list numbering like "1. " or "2) ". Bare quantities ("2 jars") are kept.
static LIST_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+").unwrap());

/// Anything that is not a lowercase letter or digit.
static NON_ALNUM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Characters typed or auto-inserted as bullets.
pub const BULLET_CHARS: &[char] = &['•', '·', '-', '*', '◦', '▪', '‣', '○'];

/// Apostrophe-like characters.
const APOSTROPHE_CHARS: &[char] = &['\u{2019}', '\u{2018}', '\u{02BC}', '`'];

/// Punctuation that separates a vocabulary term from its definition.
pub const SEPARATOR_CHARS: &[char] = &[':', '-', '–', '—'];

/// Replace typographic apostrophes with `'`.
pub fn normalize_apostrophes(text: &str) -> String {
    text.chars()
        .map(|c| if APOSTROPHE_CHARS.contains(&c) { '\'' } else { c })
        .collect()
}

/// Collapse whitespace runs (including line breaks) and trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_COLLAPSE_REGEX
        .replace_all(text, " ")
        .trim()
        .to_string()
}

/// Form used for trigger matching: apostrophes unified, lowercase,
/// whitespace collapsed.
pub fn normalize_for_matching(text: &str) -> String {
    collapse_whitespace(&normalize_apostrophes(text)).to_lowercase()
}

/// Lowercase and reduce every non-alphanumeric run to a single space.
pub fn normalize_phrase(text: &str) -> String {
    NON_ALNUM_REGEX
        .replace_all(&text.to_lowercase(), " ")
        .trim()
        .to_string()
}

/// Deduplication key for vocabulary terms.
pub fn term_key(name: &str) -> String {
    let composed: String = name.nfkc().collect();
    collapse_whitespace(&normalize_apostrophes(&composed)).to_lowercase()
}

/// Whether text starts with list numbering ("1." / "2)").
pub fn has_number_prefix(text: &str) -> bool {
    LIST_NUMBER_REGEX.is_match(text.trim_start())
}

/// Whether text starts with a bullet glyph.
pub fn has_bullet_prefix(text: &str) -> bool {
    text.trim_start()
        .chars()
        .next()
        .map(|c| BULLET_CHARS.contains(&c))
        .unwrap_or(false)
}

/// Remove list numbering and bullet glyphs, collapse whitespace.
pub fn clean_list_item(text: &str) -> String {
    let text = collapse_whitespace(text);
    let text = LIST_NUMBER_REGEX.replace(&text, "");
    text.trim_start_matches(BULLET_CHARS).trim().to_string()
}

/// Trim whitespace and separator punctuation from the start of text.
pub fn strip_leading_separator(text: &str) -> &str {
    text.trim_start()
        .trim_start_matches(SEPARATOR_CHARS)
        .trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_apostrophes() {
        assert_eq!(
            normalize_apostrophes("In today\u{2019}s session"),
            "In today's session"
        );
        assert_eq!(normalize_apostrophes("don't"), "don't");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("Hello    world"), "Hello world");
        assert_eq!(collapse_whitespace("  Hello \n world\t"), "Hello world");
    }

    #[test]
    fn test_normalize_for_matching() {
        assert_eq!(
            normalize_for_matching("In Today\u{2019}s  Session,\nYou Will:"),
            "in today's session, you will:"
        );
    }

    #[test]
    fn test_normalize_phrase() {
        assert_eq!(
            normalize_phrase("Direct Instruction, Procedure"),
            "direct instruction procedure"
        );
        assert_eq!(normalize_phrase("FA/KC"), "fa kc");
        assert_eq!(normalize_phrase("!!!"), "");
    }

    #[test]
    fn test_term_key() {
        assert_eq!(term_key("Kinetic  Energy"), "kinetic energy");
        assert_eq!(term_key("KINETIC ENERGY"), "kinetic energy");
        // Full-width letters fold under NFKC
        assert_eq!(term_key("\u{FF21}tom"), "atom");
    }

    #[test]
    fn test_list_prefixes() {
        assert!(has_number_prefix("1. Measure the sample"));
        assert!(has_number_prefix("  12) Record"));
        assert!(!has_number_prefix("2 worksheets"));
        assert!(has_bullet_prefix("• Safety goggles"));
        assert!(!has_bullet_prefix("Safety goggles"));
    }

    #[test]
    fn test_clean_list_item() {
        assert_eq!(clean_list_item("1. Measure the sample"), "Measure the sample");
        assert_eq!(clean_list_item("2) Record results"), "Record results");
        assert_eq!(clean_list_item("• Safety goggles"), "Safety goggles");
        // Quantities survive
        assert_eq!(clean_list_item("2 worksheets"), "2 worksheets");
        assert_eq!(clean_list_item("16 oz jar"), "16 oz jar");
    }

    #[test]
    fn test_strip_leading_separator() {
        assert_eq!(strip_leading_separator(": the smallest unit"), "the smallest unit");
        assert_eq!(strip_leading_separator(" – a force"), "a force");
        assert_eq!(strip_leading_separator("plain"), "plain");
    }
}
