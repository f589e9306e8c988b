//! Error types for documentation extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting documentation updates.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read an input or output file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// Failed to parse the PPTX file structure.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),

    /// ZIP archive error (reading PPTX or writing DOCX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// Invalid extractor configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// More input files than a single run accepts.
    #[error("Too many input files: {given} given, at most {max} allowed")]
    TooManyInputs { given: usize, max: usize },

    /// Failed to produce the output document.
    #[error("Failed to write output document: {0}")]
    WriteError(String),
}
