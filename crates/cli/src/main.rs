//! CLI tool for building documentation updates from curriculum slide decks.

use anyhow::{Context, Result};
use clap::Parser;
use docup_core::{naming, Error, ExtractorConfig, Pipeline, RunConfig, RunReport};
use docup_docx::DocumentWriter;
use docup_pptx::PptxParser;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Longest goal/assessment/material text shown in the breakdown.
const PREVIEW_CHARS: usize = 50;

/// Extract vocabulary, goals, assessments, careers and materials from
/// PowerPoint sessions into a Word document.
#[derive(Parser, Debug)]
#[command(name = "doc-updates")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input presentation file(s) (.pptx). Scans the directory when omitted.
    files: Vec<PathBuf>,

    /// Directory containing the presentations; the document is written here
    #[arg(short, long, default_value = ".")]
    directory: PathBuf,

    /// Module acronym (default: derived from the first file name)
    #[arg(short, long)]
    acronym: Option<String>,

    /// Output document filename (default: "<ACRONYM>_Doc Updates & Tickets.docx")
    #[arg(short, long)]
    output: Option<String>,

    /// Print color and formatting details for every run
    #[arg(long)]
    debug: bool,

    /// TOML file overriding the extraction heuristics
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose || args.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = match &args.config {
        Some(path) => ExtractorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExtractorConfig::default(),
    };
    let run = RunConfig::new(&args.directory)
        .with_acronym(args.acronym.clone())
        .with_output_name(args.output.clone())
        .with_debug(args.debug);

    let inputs = collect_inputs(&args.directory, &args.files)?;
    if inputs.is_empty() {
        anyhow::bail!("No .pptx files found in {}", args.directory.display());
    }

    println!("Scanning directory: {}", args.directory.display());
    let report = extract(&inputs, &config, &run, args.verbose)?;

    report_problems(&report, &mut std::io::stderr().lock())?;

    if report.document.is_empty() {
        println!("No content found in any PowerPoint files.");
        return Ok(());
    }

    let output_path = write_document(&report, &run)?;
    print_summary(&report, &output_path);

    Ok(())
}

/// Inputs for the run in session order. Relative paths are taken
/// relative to `directory`.
fn collect_inputs(directory: &Path, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut inputs: Vec<PathBuf> = if files.is_empty() {
        let entries = std::fs::read_dir(directory)
            .with_context(|| format!("Failed to read directory {}", directory.display()))?;
        let mut found = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to read directory {}", directory.display()))?
                .path();
            let is_pptx = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pptx"));
            if path.is_file() && is_pptx {
                found.push(path);
            }
        }
        found
    } else {
        files
            .iter()
            .map(|f| if f.is_absolute() { f.clone() } else { directory.join(f) })
            .collect()
    };

    inputs.sort_by(|a, b| naming::input_order(&file_name(a), &file_name(b)));
    Ok(inputs)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Read and process every input. Unreadable or unusable files are recorded
/// as failures; only an oversized run is an error.
fn extract(inputs: &[PathBuf], config: &ExtractorConfig, run: &RunConfig, verbose: bool) -> Result<RunReport> {
    let parser = PptxParser::new();
    let mut pipeline = Pipeline::new(&parser, config, run)?;
    pipeline.ensure_input_count(inputs.len())?;

    for path in inputs {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        if verbose {
            eprintln!("Processing: {}", path.display());
        }

        match std::fs::read(path) {
            Ok(data) => pipeline.process(&filename, &data),
            Err(e) => pipeline.record_failure(&filename, &Error::IoError(e)),
        }
    }

    Ok(pipeline.finish())
}

/// Write run diagnostics (only collected under `--debug`) and skipped
/// files, one line each.
fn report_problems(report: &RunReport, out: &mut impl Write) -> std::io::Result<()> {
    for diagnostic in &report.diagnostics {
        writeln!(out, "{}", diagnostic)?;
    }
    for failure in &report.failures {
        writeln!(out, "Skipped {}", failure)?;
    }
    Ok(())
}

/// Write the report document. Failing to write is fatal.
fn write_document(report: &RunReport, run: &RunConfig) -> Result<PathBuf> {
    let output_path = run.output_path(&report.acronym);
    DocumentWriter::new()
        .save(&output_path, &report.acronym, &report.document)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    println!("\nWord document saved as: {}", output_path.display());
    Ok(output_path)
}

fn print_summary(report: &RunReport, output_path: &Path) {
    let counts = report.document.counts();
    let output_name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    println!("\nSummary:");
    println!("  - Files processed: {}", report.files.len());
    println!("  - Files skipped: {}", report.failures.len());
    println!("  - Total vocabulary terms extracted: {}", counts.vocabulary);
    println!("  - Total session goals extracted: {}", counts.goals);
    println!("  - Total assessment items extracted: {}", counts.assessments);
    println!("  - Total careers extracted: {}", counts.careers);
    println!("  - Total session materials extracted: {}", counts.materials);
    println!("  - Output file: {}", output_name);

    println!("\nDetailed breakdown:");
    for file in &report.files {
        let c = &file.counts;
        println!(
            "  {}: {} slides, {} vocab, {} goals, {} assessments, {} careers, {} materials",
            file.filename, file.slide_count, c.vocabulary, c.goals, c.assessments, c.careers, c.materials
        );
        for term in report.document.terms.iter().filter(|t| t.source_file == file.filename) {
            println!("    • Vocab: {}", term.name);
        }
    }

    let document = &report.document;
    for (label, items) in [
        ("Goal", session_texts(&document.goals, |g| &g.text)),
        ("Assessment", session_texts(&document.assessments, |a| &a.text)),
        ("Career", session_texts(&document.careers, |c| &c.text)),
        ("Material", session_texts(&document.materials, |m| &m.text)),
    ] {
        for (session, text) in items {
            println!("    • Session {} {}: {}", session, label, preview(&text));
        }
    }
}

fn session_texts<T>(
    sessions: &std::collections::BTreeMap<docup_core::SessionKey, Vec<T>>,
    text: impl Fn(&T) -> &String,
) -> Vec<(String, String)> {
    let text = &text;
    sessions
        .iter()
        .flat_map(|(session, items)| items.iter().map(move |item| (session.to_string(), text(item).clone())))
        .collect()
}

/// Shorten long text for the console.
fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let short: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", short)
    } else {
        text.to_string()
    }
}
