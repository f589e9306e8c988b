//! Items found by the extractors and the per-file bundle that carries them.

use crate::types::Rgb;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A vocabulary term with its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Display form (first-seen casing).
    pub name: String,
    /// Definition text; empty when none was found.
    pub definition: String,
    /// File the term was first seen in.
    pub source_file: String,
}

/// A goal listed under a session-goals trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGoal {
    pub session: SessionKey,
    pub text: String,
}

/// An item listed under an instructor-evaluation trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentItem {
    pub session: SessionKey,
    pub text: String,
}

/// A related career entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Career {
    pub text: String,
    pub source_file: String,
}

/// A session material entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub text: String,
    pub source_file: String,
}

/// Identifier of a curriculum session, derived from the input filename.
///
/// Keys that parse as integers order numerically and before any
/// non-numeric key; the rest order lexically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl Ord for SessionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for SessionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classification record for one text run, reported in debug mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDiagnostic {
    pub file: String,
    pub slide: usize,
    pub text: String,
    pub color: Option<Rgb>,
    pub bold: Option<bool>,
    pub is_marker: bool,
}

impl fmt::Display for RunDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = self
            .color
            .map(|c| c.to_string())
            .unwrap_or_else(|| "None".to_string());
        let bold = self
            .bold
            .map(|b| b.to_string())
            .unwrap_or_else(|| "unset".to_string());
        write!(
            f,
            "{} slide {}: '{}' | Bold: {} | Color: {} | Marker: {}",
            self.file, self.slide, self.text, bold, color, self.is_marker
        )
    }
}

/// Everything extracted from one presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub source_file: String,
    pub session: SessionKey,
    pub terms: Vec<Term>,
    pub goals: Vec<SessionGoal>,
    pub assessments: Vec<AssessmentItem>,
    pub careers: Vec<Career>,
    pub materials: Vec<MaterialItem>,
    /// Per-run classification records; empty unless debug mode is on.
    pub diagnostics: Vec<RunDiagnostic>,
}

impl ExtractionResult {
    pub fn new(source_file: impl Into<String>, session: SessionKey) -> Self {
        Self {
            source_file: source_file.into(),
            session,
            terms: Vec::new(),
            goals: Vec::new(),
            assessments: Vec::new(),
            careers: Vec::new(),
            materials: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Whether no extractor found anything.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
            && self.goals.is_empty()
            && self.assessments.is_empty()
            && self.careers.is_empty()
            && self.materials.is_empty()
    }
}

/// A file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub filename: String,
    pub reason: String,
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.filename, self.reason)
    }
}
