//! Vocabulary extraction: bold blue/turquoise runs followed by a definition.

use crate::classify::StyleClassifier;
use crate::items::RunDiagnostic;
use crate::normalize::{collapse_whitespace, normalize_phrase, strip_leading_separator, SEPARATOR_CHARS};
use crate::types::{Paragraph, Slide, TextShape};

/// Slide-layout headings that are styled like vocabulary but never are.
const PLACEHOLDER_PHRASES: &[&str] = &[
    "direct instruction",
    "procedure",
    "worksheet",
    "vocab definition",
    "module guide",
    "activity lead in",
    "gather",
    "clean up",
    "summary",
    "goals",
    "objectives",
    "assessment",
    "careers",
    "related careers",
    "materials",
    "session materials",
    "fa kc",
    "post test",
    "intro",
    "insert slide",
    "insert media",
    "insert layout",
    "locate the following",
];

/// Leading words that mark layout placeholders.
const PLACEHOLDER_PREFIXES: &[&str] = &["insert", "post", "direct", "procedure", "vocab", "gather", "clean"];

/// Trailing words that mark layout placeholders.
const PLACEHOLDER_SUFFIXES: &[&str] = &["worksheet", "definition"];

/// Rejects candidate terms that are really slide furniture.
#[derive(Debug, Clone)]
pub struct PlaceholderFilter {
    phrases: Vec<String>,
}

impl Default for PlaceholderFilter {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl PlaceholderFilter {
    /// Built-in phrases plus caller-supplied ones.
    pub fn new(extra: &[String]) -> Self {
        let phrases = PLACEHOLDER_PHRASES
            .iter()
            .map(|p| p.to_string())
            .chain(extra.iter().map(|p| normalize_phrase(p)))
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    pub fn excludes(&self, candidate: &str) -> bool {
        let normalized = normalize_phrase(candidate);
        if normalized.chars().count() <= 2 || candidate.trim().chars().count() <= 2 {
            return true;
        }

        let padded = format!(" {} ", normalized);
        if self
            .phrases
            .iter()
            .any(|phrase| padded.contains(&format!(" {} ", phrase)))
        {
            return true;
        }

        PLACEHOLDER_PREFIXES
            .iter()
            .any(|w| normalized.starts_with(&format!("{} ", w)))
            || PLACEHOLDER_SUFFIXES
                .iter()
                .any(|w| normalized.ends_with(&format!(" {}", w)))
    }
}

/// A term and definition found on one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub name: String,
    pub definition: String,
}

/// Finds vocabulary terms from run formatting.
#[derive(Debug, Clone, Default)]
pub struct VocabularyExtractor {
    classifier: StyleClassifier,
    filter: PlaceholderFilter,
}

impl VocabularyExtractor {
    pub fn new(classifier: StyleClassifier, filter: PlaceholderFilter) -> Self {
        Self { classifier, filter }
    }

    pub fn classifier(&self) -> &StyleClassifier {
        &self.classifier
    }

    /// Extract entries from one slide.
    pub fn extract_slide(&self, slide: &Slide) -> Vec<VocabularyEntry> {
        slide
            .shapes
            .iter()
            .flat_map(|shape| self.extract_shape(shape))
            .collect()
    }

    /// One classification record per non-blank run of the slide.
    pub fn diagnose_slide(&self, slide: &Slide, file: &str) -> Vec<RunDiagnostic> {
        slide
            .paragraphs()
            .flat_map(|p| p.runs.iter())
            .filter(|run| !run.text.trim().is_empty())
            .map(|run| RunDiagnostic {
                file: file.to_string(),
                slide: slide.number,
                text: run.text.trim().to_string(),
                color: run.color,
                bold: run.bold,
                is_marker: self.classifier.is_marker(run),
            })
            .collect()
    }

    fn extract_shape(&self, shape: &TextShape) -> Vec<VocabularyEntry> {
        let mut entries = Vec::new();
        let paragraphs = &shape.paragraphs;
        let mut idx = 0;

        while idx < paragraphs.len() {
            let paragraph = &paragraphs[idx];
            idx += 1;

            let Some((start, end)) = self.marker_span(paragraph) else {
                continue;
            };

            let raw_name: String = paragraph.runs[start..=end]
                .iter()
                .map(|r| r.text.as_str())
                .collect();
            let raw_name = collapse_whitespace(&raw_name);
            let mut separated = raw_name.ends_with(SEPARATOR_CHARS);
            let name = raw_name
                .trim_end_matches(|c: char| SEPARATOR_CHARS.contains(&c) || c.is_whitespace())
                .to_string();

            if self.filter.excludes(&name) {
                log::debug!("Skipping placeholder heading: {}", name);
                continue;
            }

            let remainder: String = paragraph.runs[end + 1..]
                .iter()
                .map(|r| r.text.as_str())
                .collect();
            let remainder = remainder.trim();
            if remainder.starts_with(SEPARATOR_CHARS) {
                separated = true;
            }
            let mut definition = collapse_whitespace(strip_leading_separator(remainder));

            // "Term:" alone on its line takes the next paragraph as definition
            if definition.is_empty() && separated {
                if let Some(offset) = paragraphs[idx..].iter().position(|p| !p.is_blank()) {
                    let next = &paragraphs[idx + offset];
                    if self.marker_span(next).is_none() {
                        definition = collapse_whitespace(&next.text());
                        idx += offset + 1;
                    }
                }
            }

            entries.push(VocabularyEntry { name, definition });
        }

        entries
    }

    /// First span of contiguous marker runs. Whitespace-only runs between
    /// marker runs stay inside the span.
    fn marker_span(&self, paragraph: &Paragraph) -> Option<(usize, usize)> {
        let mut span: Option<(usize, usize)> = None;

        for (i, run) in paragraph.runs.iter().enumerate() {
            if self.classifier.is_marker(run) {
                span = Some(match span {
                    Some((start, _)) => (start, i),
                    None => (i, i),
                });
            } else if run.text.trim().is_empty() {
                continue;
            } else if span.is_some() {
                break;
            }
        }

        span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rgb, TextRun};

    const BLUE: Rgb = Rgb::new(0x00, 0x70, 0xC0);
    const BLACK: Rgb = Rgb::new(0, 0, 0);

    fn marker(text: &str) -> TextRun {
        TextRun::styled(text, Some(true), Some(BLUE))
    }

    fn slide(paragraphs: Vec<Paragraph>) -> Slide {
        let mut slide = Slide::new(1);
        slide.add_shape(TextShape::new(paragraphs));
        slide
    }

    fn extract(paragraphs: Vec<Paragraph>) -> Vec<VocabularyEntry> {
        VocabularyExtractor::default().extract_slide(&slide(paragraphs))
    }

    fn entry(name: &str, definition: &str) -> VocabularyEntry {
        VocabularyEntry {
            name: name.to_string(),
            definition: definition.to_string(),
        }
    }

    #[test]
    fn test_term_with_inline_definition() {
        let entries = extract(vec![Paragraph::new(vec![
            marker("Atom"),
            TextRun::plain(": the smallest unit of an element."),
        ])]);
        assert_eq!(entries, vec![entry("Atom", "the smallest unit of an element.")]);
    }

    #[test]
    fn test_slate_text_is_not_a_term() {
        let slate = Rgb::new(0x44, 0x54, 0x6A);
        let entries = extract(vec![Paragraph::new(vec![
            TextRun::styled("Lab Overview", Some(true), Some(slate)),
            TextRun::plain(" for today"),
        ])]);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_split_marker_runs_join() {
        let entries = extract(vec![Paragraph::new(vec![
            marker("Kinetic"),
            TextRun::plain(" "),
            marker("Energy"),
            TextRun::plain(" - energy of motion"),
        ])]);
        assert_eq!(entries, vec![entry("Kinetic Energy", "energy of motion")]);
    }

    #[test]
    fn test_separator_inside_term_uses_next_paragraph() {
        let entries = extract(vec![
            Paragraph::new(vec![marker("Density:")]),
            Paragraph::plain("Mass per unit volume."),
            Paragraph::new(vec![marker("Volume"), TextRun::plain(" – space occupied.")]),
        ]);
        assert_eq!(
            entries,
            vec![
                entry("Density", "Mass per unit volume."),
                entry("Volume", "space occupied.")
            ]
        );
    }

    #[test]
    fn test_term_without_definition_is_kept() {
        let entries = extract(vec![Paragraph::new(vec![marker("Photosynthesis")])]);
        assert_eq!(entries, vec![entry("Photosynthesis", "")]);
    }

    #[test]
    fn test_next_paragraph_with_term_is_not_a_definition() {
        let entries = extract(vec![
            Paragraph::new(vec![marker("Mass:")]),
            Paragraph::new(vec![marker("Weight"), TextRun::plain(": force of gravity")]),
        ]);
        assert_eq!(
            entries,
            vec![entry("Mass", ""), entry("Weight", "force of gravity")]
        );
    }

    #[test]
    fn test_no_markers_no_terms() {
        let entries = extract(vec![
            Paragraph::new(vec![
                TextRun::styled("Bold only", Some(true), Some(BLACK)),
                TextRun::styled(" blue only", Some(false), Some(BLUE)),
                TextRun::styled(" unset", None, Some(BLUE)),
            ]),
            Paragraph::plain("Plain text: nothing special"),
        ]);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_placeholder_headings_skipped() {
        let entries = extract(vec![
            Paragraph::new(vec![marker("Direct Instruction, Procedure")]),
            Paragraph::new(vec![marker("Session Goals")]),
            Paragraph::new(vec![marker("Insert slide type")]),
            Paragraph::new(vec![marker("Ox")]),
            Paragraph::new(vec![marker("Introduction"), TextRun::plain(": kept")]),
        ]);
        assert_eq!(entries, vec![entry("Introduction", "kept")]);
    }

    #[test]
    fn test_extra_excluded_terms() {
        let extractor = VocabularyExtractor::new(
            StyleClassifier::default(),
            PlaceholderFilter::new(&["Lab Safety".to_string()]),
        );
        let slide = slide(vec![Paragraph::new(vec![marker("Lab Safety")])]);
        assert!(extractor.extract_slide(&slide).is_empty());
    }

    #[test]
    fn test_diagnose_slide() {
        let extractor = VocabularyExtractor::default();
        let slide = slide(vec![Paragraph::new(vec![
            marker("Atom"),
            TextRun::plain(" "),
            TextRun::plain("definition"),
        ])]);
        let diagnostics = extractor.diagnose_slide(&slide, "MATS_Session_1.pptx");
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].is_marker);
        assert_eq!(diagnostics[0].color, Some(BLUE));
        assert!(!diagnostics[1].is_marker);
        assert_eq!(diagnostics[1].bold, None);
    }
}
