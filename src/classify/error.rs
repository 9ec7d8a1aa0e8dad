//! Error types for classification.

use crate::classify::label::Label;
use thiserror::Error;

/// Errors that prevent a tree from being classified or recorded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("taxon '{taxon}' of group '{group}' not found in tree")]
    TaxonNotFound { taxon: String, group: String },
    #[error("group '{0}' has no taxa")]
    EmptyGroup(String),
    #[error("label '{label}' is not a result of the {stage} stage")]
    InvalidStageLabel { label: Label, stage: &'static str },
    #[error("'{0}' has no pending monophyly result to refine")]
    NotPending(String),
    #[error("'{0}' never received a topology label")]
    Unresolved(String),
}
