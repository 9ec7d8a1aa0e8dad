//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [PhyloTree], which uses the arena pattern to store
//! [Vertex] nodes. Each vertex is either a `Root`, `Internal`, or `Leaf`,
//! referenced by [VertexIndex]. Internal vertices may have more than two
//! children.
//!
//! # Building trees
//! Trees are typically constructed during parsing via the [TreeBuilder]
//! trait, which decouples the parser from concrete tree types.
//! [PhyloTreeBuilder] builds a [PhyloTree].
//!
//! # Querying clades
//! [CladeTree] bundles the queries classification relies on
//! (leaf names, common ancestors, leaf sets beneath vertices, post-order).

pub mod clade;
pub mod phylo_tree_builder;
pub mod tree;
pub mod tree_builder;
pub mod vertex;

pub use clade::{CladeError, CladeTree, LeafSet};
pub use phylo_tree_builder::PhyloTreeBuilder;
pub use tree::{PhyloTree, VertexIndex};
pub use tree_builder::TreeBuilder;
pub use vertex::{BranchLength, Vertex};
