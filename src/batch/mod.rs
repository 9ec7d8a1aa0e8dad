//! Batch classification of a folder of Newick files.
//!
//! [run_batch] lists the input folder, parses and classifies every file
//! (sequentially or on a worker pool), merges the results in a
//! [ClassificationRecorder], copies each classified file into the bucket of
//! its label and writes the summary CSV.
//!
//! A file that fails to parse or classify is logged and skipped; only
//! problems with the folders themselves or the summary abort the run.

pub mod error;
pub(crate) mod pool;
pub mod scan;
pub mod sink;

pub use error::{BatchError, ProcessingError, ProcessingErrorKind};
pub use scan::list_input_files;
pub use sink::{DEFAULT_SUMMARY_NAME, OutputSink};

use crate::classify::{Classification, ClassificationRecorder, ClassifyError, Classifier, Label};
use crate::newick;
use crate::taxonomy::Taxonomy;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

// =#========================================================================#=
// BATCH CONFIG
// =#========================================================================$=
/// Settings of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Folder whose files are classified (not recursive).
    pub input_folder: PathBuf,
    /// Folder receiving the label buckets and the summary CSV.
    pub output_base: PathBuf,
    /// Number of worker threads; `1` processes files on the calling thread.
    pub jobs: usize,
    /// Whether to copy classified files into label buckets.
    pub copy_files: bool,
    /// File name of the summary CSV inside `output_base`.
    pub summary_name: String,
}

impl BatchConfig {
    /// Configuration with one job, bucket copies and the default summary name.
    pub fn new(input_folder: impl Into<PathBuf>, output_base: impl Into<PathBuf>) -> Self {
        Self {
            input_folder: input_folder.into(),
            output_base: output_base.into(),
            jobs: 1,
            copy_files: true,
            summary_name: DEFAULT_SUMMARY_NAME.to_string(),
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_copy_files(mut self, copy_files: bool) -> Self {
        self.copy_files = copy_files;
        self
    }

    pub fn with_summary_name(mut self, summary_name: impl Into<String>) -> Self {
        self.summary_name = summary_name.into();
        self
    }
}

// =#========================================================================#=
// BATCH REPORT
// =#========================================================================$=
/// Outcome of [run_batch].
#[derive(Debug)]
pub struct BatchReport {
    /// Final label of every classified file, sorted by file name.
    pub labels: BTreeMap<String, Label>,
    /// Per-file failures, in the order they were detected.
    pub errors: Vec<ProcessingError>,
    /// Location of the written summary CSV.
    pub summary_path: PathBuf,
}

impl BatchReport {
    /// Number of classified files per label. Every final label of the
    /// taxonomy is present, possibly with count zero.
    pub fn counts(&self, num_signatures: usize) -> BTreeMap<Label, usize> {
        let mut counts: BTreeMap<Label, usize> = Label::final_labels(num_signatures)
            .into_iter()
            .map(|label| (label, 0))
            .collect();
        for label in self.labels.values() {
            *counts.entry(*label).or_insert(0) += 1;
        }
        counts
    }
}

// ============================================================================
// Running (pub)
// ============================================================================
/// Parses and classifies a single tree file.
///
/// # Returns
/// The file name (without directory) and the classification.
pub fn classify_file(
    path: &Path,
    classifier: &Classifier<'_>,
) -> Result<(String, Classification), ProcessingError> {
    let file = file_name_of(path);
    let tree = newick::parse_file(path).map_err(|e| ProcessingError::new(&file, e))?;
    let classification = classifier
        .classify(&tree)
        .map_err(|e| ProcessingError::new(&file, e))?;
    Ok((file, classification))
}

/// Classifies every file of `config.input_folder` against `taxonomy`.
///
/// # Errors
/// Returns a [BatchError] if the input folder cannot be listed, the output
/// directories cannot be created or the summary cannot be written.
/// Failures of individual files end up in [BatchReport::errors].
pub fn run_batch(config: &BatchConfig, taxonomy: &Taxonomy) -> Result<BatchReport, BatchError> {
    info!(
        input = %config.input_folder.display(),
        output = %config.output_base.display(),
        jobs = config.jobs,
        groups = taxonomy.num_groups(),
        "Starting classification"
    );

    let files = list_input_files(&config.input_folder)?;
    info!(files = files.len(), "Found input files");

    let final_labels = Label::final_labels(taxonomy.signatures().len());
    let sink = OutputSink::create(
        &config.output_base,
        &config.summary_name,
        &final_labels,
        config.copy_files,
    )?;

    let classifier = Classifier::new(taxonomy);
    let results = pool::process_all(files, config.jobs, |path| classify_file(path, &classifier));

    let mut recorder = ClassificationRecorder::new();
    let mut sources: HashMap<String, PathBuf> = HashMap::with_capacity(results.len());
    let mut errors = Vec::new();

    for (path, result) in results {
        match result {
            Ok((file, classification)) => {
                debug!(file = %file, label = %classification.label(), "Classified");
                if let Err(e) = recorder.record(&file, &classification) {
                    let err = ProcessingError::new(&file, e);
                    error!(file = %err.file, "{}", err);
                    errors.push(err);
                }
                sources.insert(file, path);
            }
            Err(err) => {
                error!(file = %err.file, "{}", err);
                errors.push(err);
            }
        }
    }

    let finalized = recorder.finalize();
    for file in finalized.unresolved {
        let err = ProcessingError::new(file.as_str(), ClassifyError::Unresolved(file.clone()));
        error!(file = %err.file, "{}", err);
        errors.push(err);
    }

    if config.copy_files {
        for (file, label) in &finalized.labels {
            let Some(source) = sources.get(file) else {
                continue;
            };
            if let Err(source_err) = sink.copy_into_bucket(source, *label) {
                let err = ProcessingError::new(
                    file.as_str(),
                    ProcessingErrorKind::Copy {
                        bucket: label.to_string(),
                        source: source_err,
                    },
                );
                error!(file = %err.file, "{}", err);
                errors.push(err);
            }
        }
    }

    let summary_path = sink.write_summary(&finalized.labels)?;

    let report = BatchReport {
        labels: finalized.labels,
        errors,
        summary_path,
    };

    for (label, count) in report.counts(taxonomy.signatures().len()) {
        info!(label = %label, count, "Files per label");
    }
    info!(
        summary = %report.summary_path.display(),
        classified = report.labels.len(),
        errors = report.errors.len(),
        "Classification complete"
    );

    Ok(report)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
