//! WordprocessingML fragments for the handful of block kinds the document uses.

use quick_xml::escape::escape;

/// Paragraph styles defined in `word/styles.xml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Normal,
    Title,
    Subtitle,
    Heading1,
    Heading2,
}

impl Style {
    fn id(self) -> Option<&'static str> {
        match self {
            Style::Normal => None,
            Style::Title => Some("Title"),
            Style::Subtitle => Some("Subtitle"),
            Style::Heading1 => Some("Heading1"),
            Style::Heading2 => Some("Heading2"),
        }
    }
}

/// One block of body content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A paragraph whose lines are separated by line breaks.
    Paragraph {
        style: Style,
        lines: Vec<String>,
        italic: bool,
        centered: bool,
    },
    /// An empty paragraph.
    Blank,
    PageBreak,
}

impl Block {
    pub fn styled(style: Style, text: impl Into<String>) -> Self {
        Block::Paragraph {
            style,
            lines: vec![text.into()],
            italic: false,
            centered: false,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::styled(Style::Normal, text)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Block::Paragraph {
            style: Style::Normal,
            lines: vec![text.into()],
            italic: true,
            centered: false,
        }
    }

    /// Center a paragraph. Other blocks are returned unchanged.
    pub fn centered(self) -> Self {
        match self {
            Block::Paragraph {
                style,
                lines,
                italic,
                ..
            } => Block::Paragraph {
                style,
                lines,
                italic,
                centered: true,
            },
            other => other,
        }
    }

    pub fn write_xml(&self, out: &mut String) {
        match self {
            Block::Paragraph {
                style,
                lines,
                italic,
                centered,
            } => {
                out.push_str("<w:p>");
                if style.id().is_some() || *centered {
                    out.push_str("<w:pPr>");
                    if let Some(id) = style.id() {
                        out.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, id));
                    }
                    if *centered {
                        out.push_str(r#"<w:jc w:val="center"/>"#);
                    }
                    out.push_str("</w:pPr>");
                }
                out.push_str("<w:r>");
                if *italic {
                    out.push_str("<w:rPr><w:i/></w:rPr>");
                }
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        out.push_str("<w:br/>");
                    }
                    out.push_str(&format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape(line.as_str())));
                }
                out.push_str("</w:r></w:p>");
            }
            Block::Blank => out.push_str("<w:p/>"),
            Block::PageBreak => out.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#),
        }
    }
}

/// Wrap body blocks into a complete `word/document.xml`.
pub fn document_xml(blocks: &[Block]) -> String {
    let mut body = String::new();
    for block in blocks {
        block.write_xml(&mut body);
    }
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            "<w:body>{}",
            r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/>"#,
            r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/>"#,
            "</w:sectPr></w:body></w:document>"
        ),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xml(block: Block) -> String {
        let mut out = String::new();
        block.write_xml(&mut out);
        out
    }

    #[test]
    fn test_text_is_escaped() {
        let out = xml(Block::styled(Style::Title, "MATS - Documentation Updates & Tickets"));
        assert!(out.contains(r#"<w:pStyle w:val="Title"/>"#));
        assert!(out.contains("Updates &amp; Tickets"));
        assert!(!out.contains("& Tickets"));
    }

    #[test]
    fn test_multi_line_paragraph() {
        let out = xml(Block::Paragraph {
            style: Style::Normal,
            lines: vec!["Content Summary:".into(), "• Vocabulary Terms: 3".into()],
            italic: false,
            centered: true,
        });
        assert!(out.contains(r#"<w:jc w:val="center"/>"#));
        assert_eq!(out.matches("<w:br/>").count(), 1);
    }

    #[test]
    fn test_italic_and_breaks() {
        assert!(xml(Block::italic("Source: a.pptx")).contains("<w:rPr><w:i/></w:rPr>"));
        assert_eq!(xml(Block::Blank), "<w:p/>");
        assert!(xml(Block::PageBreak).contains(r#"w:type="page""#));
        assert!(!xml(Block::text("plain")).contains("<w:pPr>"));
    }
}
