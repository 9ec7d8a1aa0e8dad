//! Merges the labels of both stages into one mapping of file to label.

use crate::classify::error::ClassifyError;
use crate::classify::label::Label;
use crate::classify::Classification;
use std::collections::BTreeMap;

// =#========================================================================#=
// CLASSIFICATION RECORDER
// =#========================================================================$=
/// Collects per-file labels across both classification stages.
///
/// The monophyly stage records [Label::Unclassified] or [Label::Tree].
/// The topology stage may only refine a pending [Label::Tree] entry and
/// overwrites it. [finalize](Self::finalize) drops entries that stayed
/// pending and reports them.
///
/// Entries are kept sorted by file name.
///
/// # Example
/// ```
/// use cladesort::classify::{ClassificationRecorder, Label};
///
/// let mut recorder = ClassificationRecorder::new();
/// recorder.record_monophyly("a.nwk", Label::Unclassified).unwrap();
/// recorder.record_monophyly("b.nwk", Label::Tree).unwrap();
/// recorder.record_topology("b.nwk", Label::Signature(2)).unwrap();
///
/// let report = recorder.finalize();
/// assert_eq!(report.labels["b.nwk"], Label::Signature(2));
/// assert!(report.unresolved.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct ClassificationRecorder {
    labels: BTreeMap<String, Label>,
}

/// Final mapping produced by [ClassificationRecorder::finalize].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FinalLabels {
    /// File name to final label, sorted by file name.
    pub labels: BTreeMap<String, Label>,
    /// Files that passed the monophyly stage but never got a topology label.
    pub unresolved: Vec<String>,
}

impl FinalLabels {
    /// Number of files per final label.
    pub fn counts(&self) -> BTreeMap<Label, usize> {
        let mut counts = BTreeMap::new();
        for label in self.labels.values() {
            *counts.entry(*label).or_insert(0) += 1;
        }
        counts
    }
}

impl ClassificationRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the monophyly stage label of `file`, replacing any earlier entry.
    ///
    /// # Errors
    /// [ClassifyError::InvalidStageLabel] unless `label` is
    /// [Label::Unclassified] or [Label::Tree].
    pub fn record_monophyly(&mut self, file: &str, label: Label) -> Result<(), ClassifyError> {
        if !matches!(label, Label::Unclassified | Label::Tree) {
            return Err(ClassifyError::InvalidStageLabel {
                label,
                stage: "monophyly",
            });
        }
        self.labels.insert(file.to_string(), label);
        Ok(())
    }

    /// Overwrites the pending entry of `file` with its topology stage label.
    ///
    /// # Errors
    /// * [ClassifyError::InvalidStageLabel] unless `label` is `tree{k}` or [Label::Other]
    /// * [ClassifyError::NotPending] if `file` is not recorded as [Label::Tree]
    pub fn record_topology(&mut self, file: &str, label: Label) -> Result<(), ClassifyError> {
        if !matches!(label, Label::Signature(_) | Label::Other) {
            return Err(ClassifyError::InvalidStageLabel {
                label,
                stage: "topology",
            });
        }
        match self.labels.get_mut(file) {
            Some(entry) if *entry == Label::Tree => {
                *entry = label;
                Ok(())
            }
            _ => Err(ClassifyError::NotPending(file.to_string())),
        }
    }

    /// Records both stages of a finished [Classification].
    pub fn record(&mut self, file: &str, classification: &Classification) -> Result<(), ClassifyError> {
        self.record_monophyly(file, classification.monophyly.label())?;
        if let Some(topology) = &classification.topology {
            self.record_topology(file, topology.label())?;
        }
        Ok(())
    }

    /// Current label of `file`, if recorded.
    pub fn get(&self, file: &str) -> Option<Label> {
        self.labels.get(file).copied()
    }

    /// Number of recorded files.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Consumes the recorder and returns the final labels.
    ///
    /// Entries still at [Label::Tree] are removed and listed in
    /// [FinalLabels::unresolved].
    pub fn finalize(self) -> FinalLabels {
        let mut report = FinalLabels::default();
        for (file, label) in self.labels {
            if label.is_final() {
                report.labels.insert(file, label);
            } else {
                report.unresolved.push(file);
            }
        }
        report
    }
}
