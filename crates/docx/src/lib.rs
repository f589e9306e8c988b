//! DOCX writer for the documentation-updates report.
//!
//! Produces a minimal WordprocessingML package: title, summary, one section
//! per content category and blank manual-entry sections.

pub mod package;
pub mod writer;
pub mod xml;

pub use writer::DocumentWriter;
