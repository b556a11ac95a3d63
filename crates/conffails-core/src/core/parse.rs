//! Parses one OMEGA conformational-search log into a filtered warning report.
//!
//! The log format has no formal grammar; molecules are delimited by `Title`
//! lines, warnings by lines containing `Warning`, and each warning block is
//! closed by a `---` separator line. Matching is deliberately literal
//! substring matching, byte-for-byte compatible with the reports produced by
//! the original triage script, including two legacy quirks that downstream
//! numbers depend on:
//!
//! - a `Title` line arriving before the current warning block is closed
//!   silently discards that block;
//! - the `Number of Molecules Failed` summary counts occurrences of the
//!   literal substring `failed` in the report text, so a paragraph containing
//!   the word more than once is counted more than once.

use std::io::{self, BufRead};
use thiserror::Error;

/// Suffix appended to a library name to form its report file name.
pub const REPORT_SUFFIX: &str = "_Fails.txt";

/// Extension a log file name must carry; the part before it is the library name.
pub const LOG_EXTENSION: &str = ".txt";

const FAILED_MARKER: &str = "FAILED \n";
const SEPARATOR_LINE: &str = "----------------------------------\n";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Title line {line} has no '=' before the molecule ID: '{content}'")]
    TitleWithoutId { line: usize, content: String },
    #[error("Log file name '{name}' does not end in '{LOG_EXTENSION}'")]
    UnrecognizedLogName { name: String },
}

/// The outcome of parsing a single log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSummary {
    /// Number of `Title` lines seen.
    pub molecules: usize,
    /// Number of closed warning paragraphs.
    pub warnings: usize,
    /// The failed count written into the report summary. Derived by counting
    /// the substring `failed` in the report text, not by counting paragraphs.
    pub reported_fails: usize,
    /// IDs of molecules whose warning paragraph contained `failed`, in order
    /// of detection. Duplicates are possible.
    pub failed_molecules: Vec<String>,
    /// The full report text, written verbatim to `<library>_Fails.txt`.
    pub report: String,
}

/// Derives the library name from a log file name.
///
/// The library is the prefix before the first `.txt`; a name without it is a
/// hard error rather than a skip.
pub fn library_name(file_name: &str) -> Result<&str, ParseError> {
    match file_name.find(LOG_EXTENSION) {
        Some(end) => Ok(&file_name[..end]),
        None => Err(ParseError::UnrecognizedLogName {
            name: file_name.to_string(),
        }),
    }
}

/// Extracts the molecule ID from a `Title` line.
///
/// The ID starts one byte after `= ` and runs to the first occurrence of two
/// consecutive spaces anywhere in the line, or to the end of the line.
/// Degenerate ranges (double-space before the `=`, or an `=` at the very end)
/// yield an empty ID.
pub fn extract_molecule_id(line: &str) -> Option<&str> {
    let start = line.find('=')? + 2;
    let end = line.find("  ").unwrap_or(line.len());
    Some(line.get(start..end).unwrap_or(""))
}

/// Parses one log from a buffered reader in a single forward pass.
///
/// The per-line checks are independent, not mutually exclusive: a line is
/// tested against every marker in order, matching the legacy segmentation
/// exactly.
pub fn parse_log(reader: &mut impl BufRead) -> Result<LogSummary, ParseError> {
    let mut summary = LogSummary {
        molecules: 0,
        warnings: 0,
        reported_fails: 0,
        failed_molecules: Vec::new(),
        report: String::new(),
    };
    let mut paragraph = String::new();
    let mut molecule = String::new();

    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;

        if line.contains("Title") {
            // Overwrites any unflushed paragraph; see module docs.
            let id = extract_molecule_id(&line).ok_or_else(|| ParseError::TitleWithoutId {
                line: line_num + 1,
                content: line.clone(),
            })?;
            molecule = id.to_string();
            paragraph = format!("Molecule: {}\n", molecule);
            summary.molecules += 1;
        }
        if line.contains("Warning") {
            paragraph.push_str(&line);
            paragraph.push('\n');
        }
        if line.contains("---") && paragraph.contains("Warning") {
            if paragraph.contains("failed") {
                paragraph.insert_str(0, FAILED_MARKER);
                summary.failed_molecules.push(molecule.clone());
            }
            paragraph.push_str(SEPARATOR_LINE);
            summary.report.push_str(&paragraph);
            summary.warnings += 1;
            paragraph.clear();
        }
        if line.contains("Processed") {
            summary.reported_fails = summary.report.matches("failed").count();
            summary.report.push_str(&line);
            summary.report.push('\n');
            summary
                .report
                .push_str(&format!("Number of Warnings = {}\n", summary.warnings));
            summary.report.push_str(&format!(
                "Number of Molecules Failed = {}",
                summary.reported_fails
            ));
        }
    }

    Ok(summary)
}
