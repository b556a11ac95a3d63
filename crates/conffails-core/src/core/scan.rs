//! Lists the log files eligible for parsing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Report files written by earlier runs carry this marker and are skipped.
const REPORT_MARKER: &str = "Fails";

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Cannot read log folder '{path}': {source}", path = path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Returns the regular files in `folder` whose names do not contain `Fails`,
/// sorted by file name. Listing order is not significant to the pipeline;
/// sorting keeps reruns deterministic.
pub fn list_log_files(folder: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let entries = fs::read_dir(folder).map_err(|source| ScanError::Unreadable {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ScanError::Unreadable {
            path: folder.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().contains(REPORT_MARKER) {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}
