//! One extraction run: validate, parse, extract and aggregate each input.
//!
//! Inputs are processed one at a time. A file that cannot be used is
//! recorded as a [`FileFailure`] and the run carries on with the rest.

use crate::aggregate::{AggregatedDocument, Aggregator, ContentCounts};
use crate::config::{ExtractorConfig, RunConfig};
use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::items::{FileFailure, RunDiagnostic};
use crate::naming::{input_order, resolve_acronym};
use crate::types::{Presentation, PresentationFormat};
use serde::{Deserialize, Serialize};

/// Reads presentation bytes into the slide model.
pub trait DeckParser {
    fn parse(&self, data: &[u8], filename: &str) -> Result<Presentation>;
}

/// A named input held in memory.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Per-file outcome for a successfully processed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub filename: String,
    pub slide_count: usize,
    pub counts: ContentCounts,
}

/// Result of a whole run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub acronym: String,
    pub document: AggregatedDocument,
    pub files: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
    pub diagnostics: Vec<RunDiagnostic>,
}

/// Drives extraction for one run.
pub struct Pipeline<'a, P: DeckParser + ?Sized> {
    parser: &'a P,
    extractor: Extractor,
    max_files: usize,
    debug: bool,
    acronym_override: Option<String>,
    aggregator: Aggregator,
    seen: Vec<String>,
    files: Vec<FileReport>,
    failures: Vec<FileFailure>,
    diagnostics: Vec<RunDiagnostic>,
}

impl<'a, P: DeckParser + ?Sized> Pipeline<'a, P> {
    pub fn new(parser: &'a P, config: &ExtractorConfig, run: &RunConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            parser,
            extractor: Extractor::new(config)?,
            max_files: config.max_files,
            debug: run.debug,
            acronym_override: run.acronym_override.clone(),
            aggregator: Aggregator::new(),
            seen: Vec::new(),
            files: Vec::new(),
            failures: Vec::new(),
            diagnostics: Vec::new(),
        })
    }

    /// Reject runs with more inputs than allowed.
    pub fn ensure_input_count(&self, count: usize) -> Result<()> {
        if count > self.max_files {
            return Err(Error::TooManyInputs {
                given: count,
                max: self.max_files,
            });
        }
        Ok(())
    }

    /// Process one input. Failures are recorded, never returned.
    pub fn process(&mut self, filename: &str, data: &[u8]) {
        self.seen.push(filename.to_string());

        let presentation = match self.open(filename, data) {
            Ok(presentation) => presentation,
            Err(e) => {
                self.push_failure(filename, &e);
                return;
            }
        };

        let mut result = self.extractor.extract(&presentation, self.debug);
        if result.is_empty() {
            log::warn!("No content extracted from {}", filename);
        }

        let counts = ContentCounts {
            vocabulary: result.terms.len(),
            goals: result.goals.len(),
            assessments: result.assessments.len(),
            careers: result.careers.len(),
            materials: result.materials.len(),
        };
        self.files.push(FileReport {
            filename: filename.to_string(),
            slide_count: presentation.slides.len(),
            counts,
        });
        self.diagnostics.append(&mut result.diagnostics);
        self.aggregator.merge(result);
    }

    /// Record an input that failed before it reached the pipeline
    /// (for example, it could not be read from disk).
    pub fn record_failure(&mut self, filename: &str, error: &Error) {
        self.seen.push(filename.to_string());
        self.push_failure(filename, error);
    }

    /// Process a batch of in-memory inputs in session order, then finish.
    pub fn run(mut self, mut inputs: Vec<InputFile>) -> Result<RunReport> {
        self.ensure_input_count(inputs.len())?;
        inputs.sort_by(|a, b| input_order(&a.name, &b.name));
        for input in &inputs {
            self.process(&input.name, &input.data);
        }
        Ok(self.finish())
    }

    pub fn finish(self) -> RunReport {
        let acronym = resolve_acronym(
            self.acronym_override.as_deref(),
            self.seen.iter().map(String::as_str),
        );
        RunReport {
            acronym,
            document: self.aggregator.finish(),
            files: self.files,
            failures: self.failures,
            diagnostics: self.diagnostics,
        }
    }

    fn open(&self, filename: &str, data: &[u8]) -> Result<Presentation> {
        let extension = filename.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        match PresentationFormat::from_extension(extension) {
            Some(PresentationFormat::Pptx) => {}
            _ => {
                return Err(Error::UnsupportedFormat(format!(
                    "expected a .pptx file, got '{}'",
                    filename
                )))
            }
        }

        match PresentationFormat::from_magic(data) {
            Some(PresentationFormat::Pptx) => {}
            Some(PresentationFormat::Ppt) => {
                return Err(Error::UnsupportedFormat(
                    "legacy binary PowerPoint (.ppt) saved with a .pptx name".into(),
                ))
            }
            None => {
                return Err(Error::UnsupportedFormat(
                    "not a PPTX archive (missing ZIP header)".into(),
                ))
            }
        }

        log::debug!("Parsing {} as PPTX", filename);
        self.parser.parse(data, filename)
    }

    fn push_failure(&mut self, filename: &str, error: &Error) {
        log::warn!("Skipping {}: {}", filename, error);
        self.failures.push(FileFailure {
            filename: filename.to_string(),
            reason: error.to_string(),
        });
    }
}
