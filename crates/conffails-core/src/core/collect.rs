//! Copies the structure files of failed molecules next to their logs.

use crate::core::index::FailureIndex;
use crate::progress::{Progress, ProgressReporter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File extension of the 3-D structure files.
const STRUCTURE_EXTENSION: &str = "pdb";

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Cannot create output folder '{path}': {source}", path = path.display())]
    OutputFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot copy structure file '{path}': {source}", path = path.display())]
    CopyFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// For every library in the index, ensures `<log_folder>/<library>/` exists
/// and copies `<structures_root>/<library>/<id>.pdb` into it for each failed
/// molecule. Existing copies are overwritten, so a rerun converges to the
/// same folder contents. A missing source file aborts the whole run.
///
/// Returns the number of files copied.
pub fn collect_structures(
    index: &FailureIndex,
    structures_root: &Path,
    log_folder: &Path,
    reporter: &ProgressReporter,
) -> Result<usize, CollectError> {
    let mut copied = 0;
    for (library, molecules) in index.iter() {
        reporter.report(Progress::Message(format!(
            "Collecting .pdb files of failed molecules in {}...",
            library
        )));
        let library_structures = structures_root.join(library);
        let output_folder = log_folder.join(library);
        fs::create_dir_all(&output_folder).map_err(|source| CollectError::OutputFolder {
            path: output_folder.clone(),
            source,
        })?;

        for molecule in molecules {
            let file_name = format!("{}.{}", molecule, STRUCTURE_EXTENSION);
            let source_path = library_structures.join(&file_name);
            let target_path = output_folder.join(&file_name);
            debug!(
                "Copying '{}' to '{}'",
                source_path.display(),
                target_path.display()
            );
            fs::copy(&source_path, &target_path).map_err(|source| CollectError::CopyFailed {
                path: source_path.clone(),
                source,
            })?;
            copied += 1;
        }
        reporter.report(Progress::LibraryDone {
            library: library.to_string(),
        });
    }
    Ok(copied)
}
