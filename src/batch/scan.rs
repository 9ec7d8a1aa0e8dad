//! Enumerates the tree files of an input folder.

use crate::batch::error::BatchError;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Returns every regular file directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into. Entries that are not files, or
/// cannot be inspected, are skipped with a warning. Symbolic links count as
/// what they point to.
///
/// # Errors
/// * [BatchError::InputNotFound] / [BatchError::NotADirectory] for a bad `dir`
/// * [BatchError::Scan] if `dir` itself cannot be read
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.exists() {
        return Err(BatchError::InputNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(BatchError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(entry) => {
                warn!(path = %entry.path().display(), "Skipping non-file entry");
            }
            Err(e) if e.depth() == 0 => {
                return Err(BatchError::Scan {
                    path: dir.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
            }
        }
    }

    Ok(files)
}
