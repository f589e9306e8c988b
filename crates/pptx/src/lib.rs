//! PPTX (Office Open XML) reader for curriculum slide decks.
//!
//! Parses .pptx files, which are ZIP archives of XML parts, into the slide
//! model of `docup-core`. Run formatting is kept: explicit bold flags,
//! colors resolved through the theme and bullets inherited from the master.

pub mod parser;
pub mod theme;

#[cfg(any(test, feature = "test-util"))]
pub mod fixture;

pub use parser::PptxParser;
