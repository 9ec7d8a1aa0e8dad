//! Two-stage topology classification of rooted trees.
//!
//! 1. [monophyly]: every group of the [Taxonomy] must form a clade. If one
//!    does not, the tree is [Label::Unclassified].
//! 2. [topology]: for trees passing stage 1, the first clade in post-order
//!    that equals the union of two groups decides the label `tree{k}`;
//!    without such a clade the tree is [Label::Other].
//!
//! [Classifier] runs both stages on one tree; [ClassificationRecorder]
//! merges per-file stage labels into the final mapping.
//!
//! # Example
//! ```
//! use cladesort::classify::{Classifier, Label};
//! use cladesort::newick::parse_str;
//! use cladesort::taxonomy::Taxonomy;
//!
//! let taxonomy = Taxonomy::from_pairs([
//!     ("x1", "X"), ("x2", "X"),
//!     ("y1", "Y"), ("y2", "Y"),
//!     ("z1", "Z"), ("z2", "Z"),
//! ]).unwrap();
//! let classifier = Classifier::new(&taxonomy);
//!
//! let tree = parse_str("((x1,x2),((y1,y2),(z1,z2)));").unwrap();
//! assert_eq!(classifier.classify(&tree).unwrap().label(), Label::Signature(3));
//!
//! let tree = parse_str("((x1,y1),(x2,y2),(z1,z2));").unwrap();
//! assert_eq!(classifier.classify(&tree).unwrap().label(), Label::Unclassified);
//! ```

pub mod error;
pub mod label;
pub mod monophyly;
pub mod recorder;
pub mod topology;

pub use error::ClassifyError;
pub use label::Label;
pub use monophyly::{MonophylyFailure, MonophylyOutcome, check_monophyly};
pub use recorder::{ClassificationRecorder, FinalLabels};
pub use topology::{TopologyOutcome, match_signature};

use crate::model::CladeTree;
use crate::taxonomy::Taxonomy;

/// Outcome of both stages for one tree, with supporting evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Result of the monophyly stage.
    pub monophyly: MonophylyOutcome,
    /// Result of the topology stage; `None` if the monophyly stage failed.
    pub topology: Option<TopologyOutcome>,
}

impl Classification {
    /// The final label of the tree.
    pub fn label(&self) -> Label {
        match &self.topology {
            Some(topology) => topology.label(),
            None => self.monophyly.label(),
        }
    }
}

/// Runs both classification stages against a shared [Taxonomy].
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> Classifier<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &'a Taxonomy {
        self.taxonomy
    }

    /// Classifies `tree`.
    ///
    /// # Errors
    /// [ClassifyError::TaxonNotFound] if a taxon of the taxonomy is missing
    /// from the tree; such a tree gets no label.
    pub fn classify<T: CladeTree>(&self, tree: &T) -> Result<Classification, ClassifyError> {
        let monophyly = check_monophyly(tree, self.taxonomy)?;
        let topology = match monophyly {
            MonophylyOutcome::AllMonophyletic => Some(match_signature(tree, self.taxonomy)),
            MonophylyOutcome::NotMonophyletic(_) => None,
        };
        Ok(Classification {
            monophyly,
            topology,
        })
    }
}
