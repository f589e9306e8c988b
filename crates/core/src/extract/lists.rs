//! Trigger-then-list collection shared by the goals, assessments, careers
//! and materials extractors.

use crate::error::{Error, Result};
use crate::normalize::{clean_list_item, has_bullet_prefix, has_number_prefix, normalize_for_matching};
use crate::types::{ListStyle, Paragraph, Slide};
use regex::Regex;

/// List style of a paragraph, falling back to typed markers ("•", "1.")
/// when the reader found no bullet formatting.
pub fn effective_list_style(paragraph: &Paragraph) -> ListStyle {
    if paragraph.list_style.is_list() {
        return paragraph.list_style;
    }
    let text = paragraph.text();
    if has_number_prefix(&text) {
        ListStyle::Numbered
    } else if has_bullet_prefix(&text) {
        ListStyle::Bullet
    } else {
        ListStyle::None
    }
}

/// Which list paragraphs a collection accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bulleted,
    Numbered,
    Any,
}

impl ListKind {
    pub fn accepts(self, style: ListStyle) -> bool {
        match self {
            ListKind::Bulleted => style == ListStyle::Bullet,
            ListKind::Numbered => style == ListStyle::Numbered,
            ListKind::Any => style.is_list(),
        }
    }
}

/// How trigger phrases are located in a paragraph.
#[derive(Debug, Clone)]
enum PhraseMatcher {
    /// Case-insensitive substring of the normalized paragraph text.
    Substring(Vec<String>),
    /// Case-insensitive whole-word match.
    WholeWord(Vec<Regex>),
}

/// A set of trigger phrases plus the list kind collected after them.
#[derive(Debug, Clone)]
pub struct TriggeredList {
    matcher: PhraseMatcher,
    kind: ListKind,
    /// Only non-list paragraphs can trigger.
    headings_only: bool,
}

impl TriggeredList {
    /// Triggers matched as substrings.
    pub fn substring(phrases: &[String], kind: ListKind) -> Self {
        let phrases = phrases
            .iter()
            .map(|p| normalize_for_matching(p))
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            matcher: PhraseMatcher::Substring(phrases),
            kind,
            headings_only: false,
        }
    }

    /// Triggers matched as whole words, e.g. "Careers" but not "Careerswise".
    pub fn whole_word(phrases: &[String], kind: ListKind) -> Result<Self> {
        let patterns = phrases
            .iter()
            .map(|p| normalize_for_matching(p))
            .filter(|p| !p.is_empty())
            .map(|p| {
                Regex::new(&format!(r"\b{}\b", regex::escape(&p)))
                    .map_err(|e| Error::ConfigError(format!("invalid trigger '{}': {}", p, e)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            matcher: PhraseMatcher::WholeWord(patterns),
            kind,
            headings_only: false,
        })
    }

    /// Ignore triggers inside list items, so a goal bullet that mentions
    /// "careers" does not start a careers list.
    pub fn headings_only(mut self) -> Self {
        self.headings_only = true;
        self
    }

    /// Whether the paragraph text contains a trigger.
    pub fn is_trigger(&self, text: &str) -> bool {
        let normalized = normalize_for_matching(text);
        match &self.matcher {
            PhraseMatcher::Substring(phrases) => {
                phrases.iter().any(|p| normalized.contains(p.as_str()))
            }
            PhraseMatcher::WholeWord(patterns) => patterns.iter().any(|re| re.is_match(&normalized)),
        }
    }

    /// Collect the cleaned list items that follow each trigger on a slide.
    ///
    /// Collection stops at the first non-list paragraph or the end of the
    /// slide. Blank paragraphs are skipped without ending a collection, and
    /// a trigger met while collecting simply starts the next one.
    pub fn collect(&self, slide: &Slide) -> Vec<String> {
        let mut items = Vec::new();
        let mut collecting = false;

        for paragraph in slide.paragraphs() {
            if paragraph.is_blank() {
                continue;
            }
            let text = paragraph.text();
            let style = effective_list_style(paragraph);

            if (!self.headings_only || !style.is_list()) && self.is_trigger(&text) {
                collecting = true;
                continue;
            }
            if !collecting {
                continue;
            }

            if self.kind.accepts(style) {
                let item = clean_list_item(&text);
                if !item.is_empty() {
                    items.push(item);
                }
            } else {
                collecting = false;
            }
        }

        items
    }
}
