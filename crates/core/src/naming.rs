//! Filename conventions: `<ACRONYM>_Session_<N>[...].pptx`.

use crate::items::SessionKey;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Acronym used when no filename yields one.
pub const FALLBACK_ACRONYM: &str = "UNKN";

/// Suffix of the generated document name.
pub const OUTPUT_SUFFIX: &str = "_Doc Updates & Tickets.docx";

/// Matches the session number in names like `MATS_Session_3_v2`.
static SESSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)session[ _-]*(\d+)").unwrap());

/// Strip directory components and the extension.
fn file_stem(filename: &str) -> &str {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
}

/// Derive the module acronym from a filename.
///
/// Takes the part before the first underscore and keeps its first four
/// letters, uppercased.
pub fn acronym_from_filename(filename: &str) -> Option<String> {
    let prefix = file_stem(filename).split('_').next().unwrap_or_default();
    let acronym: String = prefix
        .chars()
        .filter(|c| c.is_alphabetic())
        .take(4)
        .collect::<String>()
        .to_uppercase();

    if acronym.is_empty() {
        None
    } else {
        Some(acronym)
    }
}

/// Resolve the acronym for a run: an explicit override wins, then the first
/// filename that yields one, then [`FALLBACK_ACRONYM`].
pub fn resolve_acronym<'a>(
    override_acronym: Option<&str>,
    filenames: impl IntoIterator<Item = &'a str>,
) -> String {
    if let Some(acronym) = override_acronym.map(str::trim).filter(|a| !a.is_empty()) {
        return acronym.to_uppercase();
    }
    filenames
        .into_iter()
        .find_map(acronym_from_filename)
        .unwrap_or_else(|| FALLBACK_ACRONYM.to_string())
}

/// Session grouping key: the number after `Session`, or the file stem.
pub fn session_key(filename: &str) -> SessionKey {
    let stem = file_stem(filename);
    match SESSION_REGEX.captures(stem) {
        Some(caps) => {
            let number = caps[1].trim_start_matches('0');
            SessionKey::new(if number.is_empty() { "0" } else { number })
        }
        None => SessionKey::new(stem),
    }
}

/// Processing order of inputs: by session, then by name, so
/// `Session_2` comes before `Session_10`.
pub fn input_order(a: &str, b: &str) -> Ordering {
    session_key(a).cmp(&session_key(b)).then_with(|| a.cmp(b))
}

/// Default output document name for an acronym.
pub fn output_filename(acronym: &str) -> String {
    format!("{}{}", acronym, OUTPUT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acronym_from_filename() {
        assert_eq!(
            acronym_from_filename("MATS_Session_1.pptx"),
            Some("MATS".to_string())
        );
        assert_eq!(
            acronym_from_filename("chem_Session_2_final.pptx"),
            Some("CHEM".to_string())
        );
        assert_eq!(
            acronym_from_filename("/tmp/decks/PHYSICS_Session_1.pptx"),
            Some("PHYS".to_string())
        );
        assert_eq!(acronym_from_filename("_Session_1.pptx"), None);
    }

    #[test]
    fn test_resolve_acronym() {
        let files = ["MATS_Session_1.pptx", "MATS_Session_2.pptx"];
        assert_eq!(resolve_acronym(None, files), "MATS");
        assert_eq!(resolve_acronym(Some("chem"), files), "CHEM");
        assert_eq!(resolve_acronym(Some("  "), files), "MATS");
        assert_eq!(resolve_acronym(None, ["123.pptx"]), "UNKN");
    }

    #[test]
    fn test_session_key() {
        assert_eq!(session_key("MATS_Session_1.pptx").as_str(), "1");
        assert_eq!(session_key("MATS_Session_12_revised.pptx").as_str(), "12");
        assert_eq!(session_key("MATS_session-03.pptx").as_str(), "3");
        assert_eq!(session_key("Overview.pptx").as_str(), "Overview");
    }

    #[test]
    fn test_input_order() {
        let mut names = vec![
            "MATS_Session_10.pptx",
            "Overview.pptx",
            "MATS_Session_2_v2.pptx",
            "MATS_Session_2.pptx",
            "MATS_Session_1.pptx",
        ];
        names.sort_by(|a, b| input_order(a, b));
        assert_eq!(
            names,
            vec![
                "MATS_Session_1.pptx",
                "MATS_Session_2.pptx",
                "MATS_Session_2_v2.pptx",
                "MATS_Session_10.pptx",
                "Overview.pptx",
            ]
        );
    }

    #[test]
    fn test_output_filename() {
        // Every session file of a module maps to the same document
        let names: Vec<String> = (1..=7)
            .map(|n| format!("MATS_Session_{}.pptx", n))
            .collect();
        let acronym = resolve_acronym(None, names.iter().map(String::as_str));
        assert_eq!(output_filename(&acronym), "MATS_Doc Updates & Tickets.docx");
    }
}
