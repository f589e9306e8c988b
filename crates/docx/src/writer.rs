//! Renders an [`AggregatedDocument`] as the documentation-updates report.

use crate::package::package;
use crate::xml::{document_xml, Block, Style};
use docup_core::{AggregatedDocument, Error, Result, SessionKey};
use std::collections::BTreeMap;
use std::path::Path;

/// Blank paragraphs left under each manual-entry heading.
const MANUAL_ENTRY_LINES: usize = 8;

const NO_ITEMS: &str = "No items found.";

/// Builds the report body and packages it as a `.docx`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentWriter;

impl DocumentWriter {
    pub fn new() -> Self {
        Self
    }

    /// Render the report to DOCX bytes.
    pub fn render(&self, acronym: &str, document: &AggregatedDocument) -> Result<Vec<u8>> {
        let blocks = self.blocks(acronym, document);
        log::debug!("Rendering {} blocks for {}", blocks.len(), acronym);
        package(&document_xml(&blocks))
    }

    /// Render the report and write it to `path`.
    pub fn save(&self, path: &Path, acronym: &str, document: &AggregatedDocument) -> Result<()> {
        let bytes = self.render(acronym, document)?;
        std::fs::write(path, bytes)
            .map_err(|e| Error::WriteError(format!("Failed to write '{}': {}", path.display(), e)))
    }

    /// Body content in reading order.
    pub fn blocks(&self, acronym: &str, document: &AggregatedDocument) -> Vec<Block> {
        let mut blocks = vec![
            Block::styled(Style::Title, format!("{} - Documentation Updates & Tickets", acronym)).centered(),
            Block::styled(Style::Subtitle, format!("Extracted from {} PowerPoint Sessions", acronym)).centered(),
            Block::Blank,
            summary(document).centered(),
        ];

        blocks.push(Block::PageBreak);
        blocks.push(Block::styled(Style::Heading1, "Vocabulary Terms"));
        if document.terms.is_empty() {
            blocks.push(Block::italic(NO_ITEMS));
        }
        for (i, term) in document.terms.iter().enumerate() {
            if i > 0 {
                blocks.push(Block::Blank);
            }
            blocks.push(Block::styled(Style::Heading2, format!("{}. {}", i + 1, term.name)));
            blocks.push(Block::text(term.definition.as_str()));
            blocks.push(Block::italic(format!("Source: {}", term.source_file)));
        }

        push_sessions(&mut blocks, "Session Goals", &document.goals, |g| &g.text, true);
        push_sessions(&mut blocks, "Assessment Items", &document.assessments, |a| &a.text, true);
        push_sessions(&mut blocks, "Related Careers", &document.careers, |c| &c.text, false);
        push_sessions(&mut blocks, "Session Materials", &document.materials, |m| &m.text, false);

        blocks.push(Block::PageBreak);
        for heading in ["QA Tickets", "Notes"] {
            blocks.push(Block::styled(Style::Heading1, heading));
            blocks.extend(std::iter::repeat(Block::Blank).take(MANUAL_ENTRY_LINES));
        }

        blocks
    }
}

fn summary(document: &AggregatedDocument) -> Block {
    let counts = document.counts();
    let lines = vec![
        "Content Summary:".to_string(),
        format!("• Vocabulary Terms: {}", counts.vocabulary),
        format!("• Session Goals: {}", counts.goals),
        format!("• Assessment Items: {}", counts.assessments),
        format!("• Related Careers: {}", counts.careers),
        format!("• Session Materials: {}", counts.materials),
        "• QA Tickets: (Manual entry section)".to_string(),
        "• Notes: (Manual entry section)".to_string(),
    ];
    Block::Paragraph {
        style: Style::Normal,
        lines,
        italic: false,
        centered: false,
    }
}

/// A top-level section with one numbered list per session. Optional
/// sections are left out entirely when they have no items.
fn push_sessions<T>(
    blocks: &mut Vec<Block>,
    heading: &str,
    sessions: &BTreeMap<SessionKey, Vec<T>>,
    text: impl Fn(&T) -> &String,
    always: bool,
) {
    let has_items = sessions.values().any(|items| !items.is_empty());
    if !has_items && !always {
        return;
    }

    blocks.push(Block::PageBreak);
    blocks.push(Block::styled(Style::Heading1, heading));
    if !has_items {
        blocks.push(Block::italic(NO_ITEMS));
        return;
    }

    for (session, items) in sessions.iter().filter(|(_, items)| !items.is_empty()) {
        blocks.push(Block::styled(Style::Heading2, format!("Session {}", session)));
        for (i, item) in items.iter().enumerate() {
            blocks.push(Block::text(format!("{}. {}", i + 1, text(item))));
        }
        blocks.push(Block::Blank);
    }
}
