//! WASM-compatible wrapper for building documentation updates.
//!
//! This crate exposes the extraction pipeline to JavaScript so the web
//! upload page can turn up to seven decks into a report without a server
//! round trip. Each call is independent.

use docup_core::{
    naming, ContentCounts, ExtractorConfig, FileFailure, FileReport, InputFile, Pipeline, RunConfig,
    RunDiagnostic,
};
use docup_docx::DocumentWriter;
use docup_pptx::PptxParser;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Everything returned to JavaScript except the document bytes.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractionSummary {
    /// Suggested download name for the document.
    pub filename: String,
    /// Acronym the document was generated for.
    pub acronym: String,
    /// Files that could not be used, with the reason.
    pub failures: Vec<FileFailure>,
    /// Per-run formatting details. Empty unless debug was requested.
    pub diagnostics: Vec<RunDiagnostic>,
    /// Item totals across all files.
    pub counts: ContentCounts,
    /// Per-file breakdown of processed files.
    pub files: Vec<FileReport>,
}

/// Build the report for uploaded files.
///
/// # Arguments
/// * `files` - Array of `{ name: string, data: Uint8Array }`, at most seven
/// * `acronym` - Optional acronym override
/// * `debug` - Collect per-run diagnostics
///
/// # Returns
/// `{ filename, document: Uint8Array, failures, diagnostics, counts, files }`,
/// or throws when the input is malformed or the document cannot be written.
#[wasm_bindgen]
pub fn extract_documentation(
    files: js_sys::Array,
    acronym: Option<String>,
    debug: bool,
) -> Result<JsValue, JsValue> {
    let mut inputs = Vec::with_capacity(files.length() as usize);
    for item in files.iter() {
        let name = js_sys::Reflect::get(&item, &JsValue::from_str("name"))?
            .as_string()
            .ok_or_else(|| JsValue::from_str("Each file needs a string 'name'"))?;
        let data = js_sys::Reflect::get(&item, &JsValue::from_str("data"))?;
        if !data.is_instance_of::<js_sys::Uint8Array>() {
            return Err(JsValue::from_str(&format!("File '{}' needs Uint8Array 'data'", name)));
        }
        inputs.push(InputFile::new(name, js_sys::Uint8Array::new(&data).to_vec()));
    }

    let (summary, document) =
        extract_documentation_impl(inputs, acronym, debug).map_err(|e| JsValue::from_str(&e))?;

    let value = serde_wasm_bindgen::to_value(&summary)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))?;
    js_sys::Reflect::set(
        &value,
        &JsValue::from_str("document"),
        &js_sys::Uint8Array::from(document.as_slice()),
    )?;
    Ok(value)
}

fn extract_documentation_impl(
    inputs: Vec<InputFile>,
    acronym: Option<String>,
    debug: bool,
) -> Result<(ExtractionSummary, Vec<u8>), String> {
    let parser = PptxParser::new();
    let config = ExtractorConfig::default();
    let run = RunConfig::default()
        .with_acronym(acronym.filter(|a| !a.trim().is_empty()))
        .with_debug(debug);

    let report = Pipeline::new(&parser, &config, &run)
        .and_then(|pipeline| pipeline.run(inputs))
        .map_err(|e| e.to_string())?;

    let document = DocumentWriter::new()
        .render(&report.acronym, &report.document)
        .map_err(|e| format!("Document generation error: {}", e))?;

    let summary = ExtractionSummary {
        filename: naming::output_filename(&report.acronym),
        counts: report.document.counts(),
        acronym: report.acronym,
        failures: report.failures,
        diagnostics: report.diagnostics,
        files: report.files,
    };
    Ok((summary, document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docup_pptx::fixture::{marker, numbered, para, run, text_box, PptxBuilder};

    fn deck(term: &str) -> Vec<u8> {
        PptxBuilder::new()
            .slide(text_box(&[para(&[marker(term), run(" - a definition")])]))
            .slide(text_box(&[
                para(&[run("Your instructor will be evaluating you on the following:")]),
                numbered("Safe handling"),
                numbered("Clean station"),
            ]))
            .build()
    }

    #[test]
    fn test_extract_documentation() {
        let (summary, document) = extract_documentation_impl(
            vec![
                InputFile::new("MATS_Session_2.pptx", deck("Density")),
                InputFile::new("MATS_Session_1.pptx", deck("Atom")),
                InputFile::new("MATS_Session_3.ppt", b"legacy".to_vec()),
            ],
            None,
            false,
        )
        .unwrap();

        assert_eq!(summary.filename, "MATS_Doc Updates & Tickets.docx");
        assert_eq!(summary.counts.vocabulary, 2);
        assert_eq!(summary.counts.assessments, 4);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].filename, "MATS_Session_3.ppt");
        assert!(summary.diagnostics.is_empty());
        assert!(document.starts_with(b"PK"));
    }

    #[test]
    fn test_acronym_override_and_debug() {
        let (summary, _) = extract_documentation_impl(
            vec![InputFile::new("MATS_Session_1.pptx", deck("Atom"))],
            Some("chem".to_string()),
            true,
        )
        .unwrap();
        assert_eq!(summary.acronym, "CHEM");
        assert_eq!(summary.filename, "CHEM_Doc Updates & Tickets.docx");
        assert!(summary.diagnostics.iter().any(|d| d.is_marker && d.text == "Atom"));
    }

    #[test]
    fn test_same_input_same_document() {
        let inputs = || vec![InputFile::new("MATS_Session_1.pptx", deck("Atom"))];
        let (_, first) = extract_documentation_impl(inputs(), None, false).unwrap();
        let (_, second) = extract_documentation_impl(inputs(), None, false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_too_many_files() {
        let inputs = (1..=8)
            .map(|n| InputFile::new(format!("MATS_Session_{}.pptx", n), deck("Atom")))
            .collect();
        let err = extract_documentation_impl(inputs, None, false).unwrap_err();
        assert!(err.contains('8'));
    }
}
