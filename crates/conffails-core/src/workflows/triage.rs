//! The complete triage procedure: parse every log, then collect structures.
//!
//! Two phases over one [`FailureIndex`]. Phase one parses each log file and
//! writes its `<library>_Fails.txt` report next to it; phase two copies the
//! structure files of every recorded failure. The index is built entirely
//! before collection starts, matching the batch semantics of the original
//! tool. Any error aborts the run immediately; reports already written stay
//! on disk, since the tool is rerunnable.

use crate::core::collect::{self, CollectError};
use crate::core::index::FailureIndex;
use crate::core::parse::{self, LogSummary, ParseError, REPORT_SUFFIX};
use crate::core::scan::{self, ScanError};
use crate::progress::{Progress, ProgressReporter};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Log scan failed: {0}")]
    Scan(#[from] ScanError),

    #[error("Failed to parse log '{path}': {source}", path = path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to write report '{path}': {source}", path = path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Structure collection failed: {0}")]
    Collect(#[from] CollectError),
}

/// One parsed log and where its report landed.
#[derive(Debug, Clone)]
pub struct LibraryReport {
    pub library: String,
    pub report_path: PathBuf,
    pub summary: LogSummary,
}

/// The outcome of a full triage run.
#[derive(Debug, Clone)]
pub struct TriageReport {
    pub libraries: Vec<LibraryReport>,
    pub structures_copied: usize,
}

/// Runs the full triage over `log_folder`, pulling structure files from
/// `structures_root`.
#[instrument(skip_all, name = "triage_workflow")]
pub fn run(
    log_folder: &Path,
    structures_root: &Path,
    reporter: &ProgressReporter,
) -> Result<TriageReport, TriageError> {
    // === Phase 1: parse every log and build the failure index ===
    reporter.report(Progress::PhaseStart {
        name: "Parsing logs",
    });
    let log_files = scan::list_log_files(log_folder)?;
    info!("Found {} log file(s) to parse.", log_files.len());

    let mut index = FailureIndex::new();
    let mut libraries = Vec::with_capacity(log_files.len());
    for log_path in &log_files {
        libraries.push(parse_one(log_path, log_folder, &mut index, reporter)?);
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: collect structure files of the recorded failures ===
    reporter.report(Progress::PhaseStart {
        name: "Collecting structures",
    });
    let structures_copied =
        collect::collect_structures(&index, structures_root, log_folder, reporter)?;
    reporter.report(Progress::PhaseFinish);

    info!(
        "Triage complete: {} library(ies), {} failed molecule(s), {} structure file(s) copied.",
        libraries.len(),
        index.total_failed(),
        structures_copied
    );
    Ok(TriageReport {
        libraries,
        structures_copied,
    })
}

fn parse_one(
    log_path: &Path,
    log_folder: &Path,
    index: &mut FailureIndex,
    reporter: &ProgressReporter,
) -> Result<LibraryReport, TriageError> {
    let file_name = log_path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or(std::borrow::Cow::Borrowed(""));
    let library = parse::library_name(&file_name)
        .map_err(|source| TriageError::Parse {
            path: log_path.to_path_buf(),
            source,
        })?
        .to_string();

    reporter.report(Progress::LibraryStart {
        library: library.clone(),
    });

    let file = File::open(log_path).map_err(|source| TriageError::Parse {
        path: log_path.to_path_buf(),
        source: ParseError::Io(source),
    })?;
    let summary = parse::parse_log(&mut BufReader::new(file)).map_err(|source| {
        TriageError::Parse {
            path: log_path.to_path_buf(),
            source,
        }
    })?;

    let report_path = log_folder.join(format!("{}{}", library, REPORT_SUFFIX));
    fs::write(&report_path, &summary.report).map_err(|source| TriageError::ReportWrite {
        path: report_path.clone(),
        source,
    })?;

    info!(
        "Parsed '{}': {} molecule(s), {} warning paragraph(s), {} failed.",
        library,
        summary.molecules,
        summary.warnings,
        summary.failed_molecules.len()
    );
    index.record(library.clone(), summary.failed_molecules.clone());
    reporter.report(Progress::LibraryDone {
        library: library.clone(),
    });

    Ok(LibraryReport {
        library,
        report_path,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_MOLECULE_LOG: &str = "Title = MOL1  rotatable bonds: 4\n\
                                    Warning: strained ring\n\
                                    ------------------\n\
                                    Title = MOL2\n\
                                    Warning: omega failed on input\n\
                                    ------------------\n\
                                    Processed 2 molecules\n";

    fn write_log(folder: &Path, name: &str, body: &str) {
        let mut f = File::create(folder.join(name)).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    fn write_structure(root: &Path, library: &str, molecule: &str) {
        let dir = root.join(library);
        fs::create_dir_all(&dir).unwrap();
        File::create(dir.join(format!("{}.pdb", molecule))).unwrap();
    }

    #[test]
    fn end_to_end_two_molecule_scenario() {
        let logs = tempfile::tempdir().unwrap();
        let structures = tempfile::tempdir().unwrap();
        write_log(logs.path(), "LibA.txt", TWO_MOLECULE_LOG);
        write_structure(structures.path(), "LibA", "MOL2");

        let result = run(logs.path(), structures.path(), &ProgressReporter::new()).unwrap();

        assert_eq!(result.libraries.len(), 1);
        assert_eq!(result.structures_copied, 1);
        let summary = &result.libraries[0].summary;
        assert_eq!(summary.warnings, 2);
        assert_eq!(summary.failed_molecules, vec!["MOL2".to_string()]);

        let report = fs::read_to_string(logs.path().join("LibA_Fails.txt")).unwrap();
        assert_eq!(report.matches("----------------------------------\n").count(), 2);
        assert_eq!(report.matches("FAILED \n").count(), 1);
        assert!(logs.path().join("LibA/MOL2.pdb").is_file());
    }

    #[test]
    fn report_files_from_prior_runs_are_not_reparsed() {
        let logs = tempfile::tempdir().unwrap();
        let structures = tempfile::tempdir().unwrap();
        write_log(logs.path(), "LibA.txt", "Processed 0 molecules\n");
        write_log(logs.path(), "LibA_Fails.txt", "stale report");

        let result = run(logs.path(), structures.path(), &ProgressReporter::new()).unwrap();
        assert_eq!(result.libraries.len(), 1);
        assert_eq!(result.libraries[0].library, "LibA");
    }

    #[test]
    fn missing_structure_aborts_after_reports_are_written() {
        let logs = tempfile::tempdir().unwrap();
        let structures = tempfile::tempdir().unwrap();
        write_log(logs.path(), "LibA.txt", TWO_MOLECULE_LOG);
        fs::create_dir_all(structures.path().join("LibA")).unwrap();

        let err = run(logs.path(), structures.path(), &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, TriageError::Collect(_)));
        // Phase one completed before the abort, so the report is on disk.
        assert!(logs.path().join("LibA_Fails.txt").is_file());
    }

    #[test]
    fn log_without_txt_extension_is_fatal() {
        let logs = tempfile::tempdir().unwrap();
        let structures = tempfile::tempdir().unwrap();
        write_log(logs.path(), "LibA.log", "Processed 0 molecules\n");

        let err = run(logs.path(), structures.path(), &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            TriageError::Parse {
                source: ParseError::UnrecognizedLogName { .. },
                ..
            }
        ));
    }

    #[test]
    fn library_parsed_twice_is_overwritten_not_merged() {
        // Two log files for the same library name prefix: "LibA.txt" and
        // "LibA.txt.old" both derive library "LibA"; the later one wins.
        let logs = tempfile::tempdir().unwrap();
        let structures = tempfile::tempdir().unwrap();
        write_log(
            logs.path(),
            "LibA.txt",
            "Title = M1\nWarning: failed\n---\nProcessed 1\n",
        );
        write_log(logs.path(), "LibA.txt.old", "Processed 0\n");
        write_structure(structures.path(), "LibA", "M1");

        let result = run(logs.path(), structures.path(), &ProgressReporter::new()).unwrap();
        assert_eq!(result.libraries.len(), 2);
        // "LibA.txt.old" sorts after "LibA.txt" and records an empty list.
        assert_eq!(result.structures_copied, 0);
    }

    #[test]
    fn progress_events_follow_the_two_phases() {
        use std::sync::Mutex;

        let logs = tempfile::tempdir().unwrap();
        let structures = tempfile::tempdir().unwrap();
        write_log(logs.path(), "LibA.txt", "Processed 0 molecules\n");

        let events: Mutex<Vec<String>> = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let tag = match event {
                Progress::PhaseStart { name } => format!("start:{}", name),
                Progress::PhaseFinish => "finish".to_string(),
                Progress::LibraryStart { library } => format!("lib:{}", library),
                Progress::LibraryDone { library } => format!("done:{}", library),
                Progress::Message(_) => "msg".to_string(),
            };
            events.lock().unwrap().push(tag);
        }));

        run(logs.path(), structures.path(), &reporter).unwrap();
        drop(reporter);
        let events = events.into_inner().unwrap();
        assert_eq!(
            events,
            vec![
                "start:Parsing logs",
                "lib:LibA",
                "done:LibA",
                "finish",
                "start:Collecting structures",
                "msg",
                "done:LibA",
                "finish",
            ]
        );
    }
}
