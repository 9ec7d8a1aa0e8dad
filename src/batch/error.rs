//! Error types for batch runs.

use crate::classify::ClassifyError;
use crate::parser::ParsingError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a batch run as a whole.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("input folder not found: {0}")]
    InputNotFound(PathBuf),

    #[error("input path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to list input folder {path}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to create output directory {path}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write summary {path}")]
    WriteSummary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What went wrong with a single input file.
#[derive(Error, Debug)]
pub enum ProcessingErrorKind {
    #[error(transparent)]
    Parse(#[from] ParsingError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("failed to copy into '{bucket}': {source}")]
    Copy {
        bucket: String,
        #[source]
        source: std::io::Error,
    },
}

/// A per-file failure; the batch continues with the next file.
#[derive(Error, Debug)]
#[error("Error processing {file}: {kind}")]
pub struct ProcessingError {
    /// File name (without directory) of the offending input.
    pub file: String,
    #[source]
    pub kind: ProcessingErrorKind,
}

impl ProcessingError {
    pub fn new(file: impl Into<String>, kind: impl Into<ProcessingErrorKind>) -> Self {
        Self {
            file: file.into(),
            kind: kind.into(),
        }
    }
}
