//! Slide model produced by the presentation readers.
//!
//! The extractors only ever see this model: shapes, paragraphs and runs with
//! the formatting attributes the heuristics need (color, boldness, list style).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents an entire presentation with its slide content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    /// Original filename (without path).
    pub filename: String,

    /// Detected format of the source file.
    pub format: PresentationFormat,

    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl Presentation {
    /// Create a new presentation with the given filename and format.
    pub fn new(filename: impl Into<String>, format: PresentationFormat) -> Self {
        Self {
            filename: filename.into(),
            format,
            slides: Vec::new(),
        }
    }

    /// Add a slide to the presentation.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }
}

/// The format of the source presentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationFormat {
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Legacy PPT (OLE/CFB binary). Detected only so it can be rejected.
    Ppt,
}

impl PresentationFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pptx" => Some(Self::Pptx),
            "ppt" => Some(Self::Ppt),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        // PPT is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.len() >= 8
            && bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        {
            return Some(Self::Ppt);
        }

        None
    }
}

/// A single slide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based slide number.
    pub number: usize,

    /// Text-bearing shapes in document order.
    pub shapes: Vec<TextShape>,
}

impl Slide {
    /// Create a new slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            shapes: Vec::new(),
        }
    }

    /// Add a shape to this slide.
    pub fn add_shape(&mut self, shape: TextShape) {
        self.shapes.push(shape);
    }

    /// Iterate over every paragraph of every shape, in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.shapes.iter().flat_map(|s| s.paragraphs.iter())
    }
}

/// A text frame: the body of a shape, placeholder or table cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextShape {
    pub paragraphs: Vec<Paragraph>,
}

impl TextShape {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Shape text with paragraphs joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// How a paragraph is formatted as a list item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListStyle {
    /// Not a list item.
    #[default]
    None,
    /// Bulleted list item.
    Bullet,
    /// Auto-numbered list item.
    Numbered,
}

impl ListStyle {
    pub fn is_list(self) -> bool {
        self != ListStyle::None
    }
}

/// A paragraph made of formatted runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Runs in order.
    pub runs: Vec<TextRun>,

    /// List formatting resolved by the reader (explicit or inherited).
    pub list_style: ListStyle,

    /// Indentation level (0-based).
    pub level: u8,
}

impl Paragraph {
    /// Create a plain paragraph from runs.
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            list_style: ListStyle::None,
            level: 0,
        }
    }

    /// Create a single-run, unformatted paragraph.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![TextRun::plain(text)])
    }

    /// Set the list style.
    pub fn with_list_style(mut self, list_style: ListStyle) -> Self {
        self.list_style = list_style;
        self
    }

    /// Full paragraph text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Whether the paragraph has no visible text.
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

/// A run of text sharing one set of character properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The run text.
    pub text: String,

    /// Explicit bold flag. `None` when unset or inherited.
    pub bold: Option<bool>,

    /// Effective color. `None` when unset or unresolvable.
    pub color: Option<Rgb>,
}

impl TextRun {
    /// Create an unformatted run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: None,
            color: None,
        }
    }

    /// Create a run with explicit formatting.
    pub fn styled(text: impl Into<String>, bold: Option<bool>, color: Option<Rgb>) -> Self {
        Self {
            text: text.into(),
            bold,
            color,
        }
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `RRGGBB` hex string as found in OOXML `val` attributes.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Hue in degrees, saturation and value in `0.0..=1.0`.
    pub fn to_hsv(self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (((g - b) / delta).rem_euclid(6.0))
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let saturation = if max == 0.0 { 0.0 } else { delta / max };

        (hue, saturation, max)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}
