//! Core domain types, extraction heuristics and aggregation for building
//! documentation updates from curriculum slide decks.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod items;
pub mod naming;
pub mod normalize;
pub mod pipeline;
pub mod types;

pub use aggregate::{AggregatedDocument, Aggregator, ContentCounts};
pub use classify::StyleClassifier;
pub use config::{ClassifierConfig, ExtractorConfig, RunConfig, TriggerConfig};
pub use error::{Error, Result};
pub use extract::Extractor;
pub use items::{
    AssessmentItem, Career, ExtractionResult, FileFailure, MaterialItem, RunDiagnostic,
    SessionGoal, SessionKey, Term,
};
pub use pipeline::{DeckParser, FileReport, InputFile, Pipeline, RunReport};
pub use types::{ListStyle, Paragraph, Presentation, PresentationFormat, Rgb, Slide, TextRun, TextShape};
