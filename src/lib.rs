//! Cladesort classifies rooted phylogenetic trees by the topology of
//! predefined taxon groups.
//!
//! Each tree (one Newick file) is classified in two stages:
//! 1. **Monophyly**: every group (e.g. a genus) of the [Taxonomy] must form a
//!    clade of its own. Otherwise the tree is `unclassified`.
//! 2. **Sister groups**: walking the tree bottom-up, the first clade that
//!    consists of exactly two groups decides the label `tree1`, `tree2`, ...
//!    (one per pair of groups, in lexicographic order). If no such clade
//!    exists, e.g. because all groups meet in one polytomy, the tree is `other`.
//!
//! Core functionality provided:
//! - [newick]: Newick parser for rooted trees with polytomies, quoted labels,
//!   comments and internal labels.
//! - [model]: arena tree [PhyloTree] and the [CladeTree] queries classification needs.
//! - [taxonomy]: taxon → group registry, built-in fungal table, TOML loading.
//! - [classify]: both stages, their evidence and the [ClassificationRecorder].
//! - [batch]: folder runs with optional worker pool, label buckets and
//!   summary CSV.
//!
//! # Example
//! ```
//! use cladesort::{Classifier, Label, Taxonomy, parse_newick_str};
//!
//! let taxonomy = Taxonomy::default();
//! let tree = parse_newick_str(
//!     "(((AFL,Aoli,Acon,Airi,Amus,Apse,Asin,Asph,Aver),\
//!        (DEN,Dcio,Dcio1,Dcio2,Ddre,Dhap,Dlep,Dpar,Dque,Dtib)),\
//!       (Dste,Ddac,Dcoe,Dbro));",
//! ).unwrap();
//!
//! let classification = Classifier::new(&taxonomy).classify(&tree).unwrap();
//! assert_eq!(classification.label(), Label::Signature(1));
//! assert_eq!(classification.label().to_string(), "tree1");
//! ```

pub mod batch;
pub mod classify;
pub mod model;
pub mod newick;
pub mod parser;
pub mod taxonomy;

pub use classify::{ClassificationRecorder, Classifier, Label};
pub use model::{CladeTree, PhyloTree};
pub use taxonomy::Taxonomy;

use crate::parser::ParsingError;
use std::path::Path;

/// Parses a string holding exactly one Newick tree.
///
/// See [newick::parse_str].
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    newick::parse_str(newick)
}

/// Parses a file holding exactly one Newick tree.
///
/// See [newick::parse_file].
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<PhyloTree, ParsingError> {
    newick::parse_file(path)
}
