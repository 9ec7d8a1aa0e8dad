//! Trait for constructing phylogenetic trees during parsing.
//!
//! The [`TreeBuilder`] trait decouples the Newick parser from concrete tree
//! representations. The parser calls builder methods as it reads the Newick
//! string bottom-up, and the builder assembles whatever tree structure it wants.
//!
//! # Built-in implementation
//! * [`PhyloTreeBuilder`](crate::model::PhyloTreeBuilder) - Builds
//!   [`PhyloTree`](crate::model::PhyloTree) with names stored directly in leaves
//!
//! # Builder lifecycle
//! A builder can construct multiple trees sequentially:
//!
//! ```text
//! Empty ──→ init_next() ──→ Building ──→ add_*/set_name ──→ finish_tree() ──→ Empty
//!   ↑                                                                           │
//!   └───────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::model::vertex::BranchLength;

// =#========================================================================#=
// TREE BUILDER (trait)
// =#========================================================================T=
/// Abstraction for constructing trees during parsing.
///
/// The parser drives the lifecycle:
///
/// 1. [`init_next`](Self::init_next) -> prepare for a new tree
/// 2. [`add_leaf`](Self::add_leaf), [`add_internal`](Self::add_internal),
///    [`add_root`](Self::add_root) -> build structure
/// 3. [`set_name`](Self::set_name) -> optionally assign a name
/// 4. [`finish_tree`](Self::finish_tree) -> finalize and return the tree
pub trait TreeBuilder {
    /// The type used to identify vertices during construction.
    ///
    /// Returned by the `add_*` methods, then passed to subsequent calls to
    /// connect parent-child relationships.
    type VertexIdx: Copy;

    /// The tree type produced by this builder.
    type Tree;

    /// Prepares the builder for constructing a new tree.
    ///
    /// # Arguments
    /// * `num_leaves` - Expected number of leaves (hint for allocation)
    fn init_next(&mut self, num_leaves: usize);

    /// Adds a leaf vertex to the tree under construction.
    ///
    /// # Arguments
    /// * `branch_len` - Branch length to parent, if specified in the Newick
    /// * `name` - Taxon name as read from the Newick string
    fn add_leaf(&mut self, branch_len: Option<BranchLength>, name: String) -> Self::VertexIdx;

    /// Adds an internal (non-root) vertex with one or more children.
    ///
    /// # Arguments
    /// * `children` - Indices of the child vertices in input order
    /// * `label` - Label after the closing parenthesis, if any
    /// * `branch_len` - Branch length to parent, if specified
    fn add_internal(
        &mut self,
        children: Vec<Self::VertexIdx>,
        label: Option<String>,
        branch_len: Option<BranchLength>,
    ) -> Self::VertexIdx;

    /// Adds the root vertex, completing the tree structure.
    ///
    /// After this, only [`set_name`](Self::set_name)
    /// and [`finish_tree`](Self::finish_tree) remain.
    fn add_root(
        &mut self,
        children: Vec<Self::VertexIdx>,
        label: Option<String>,
        branch_len: Option<BranchLength>,
    ) -> Self::VertexIdx;

    /// Sets the name of the currently constructed tree.
    fn set_name(&mut self, tree_name: String);

    /// Finalizes the building process and returns the resulting tree,
    /// or `None` if no complete tree was built.
    ///
    /// Transitions builder from a "construction" state to an "empty" state.
    fn finish_tree(&mut self) -> Option<Self::Tree>;
}
